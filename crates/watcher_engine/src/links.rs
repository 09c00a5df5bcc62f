use std::collections::BTreeSet;

use scraper::{ElementRef, Html};
use url::Url;

const DEFAULT_MAX_LINKS: usize = 5_000;

/// Pulls listing-detail links out of a search-results page.
#[derive(Debug, Clone)]
pub struct ListingLinkExtractor {
    origin: Url,
    path_marker: String,
    max_links_per_page: usize,
}

impl ListingLinkExtractor {
    pub fn new(origin: Url, path_marker: impl Into<String>) -> Self {
        Self::with_max_links(origin, path_marker, DEFAULT_MAX_LINKS)
    }

    pub fn with_max_links(
        origin: Url,
        path_marker: impl Into<String>,
        max_links_per_page: usize,
    ) -> Self {
        Self {
            origin,
            path_marker: path_marker.into(),
            max_links_per_page,
        }
    }

    /// Absolute URLs of every `<a href>` containing the path marker, deduplicated.
    pub fn extract(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let mut found = BTreeSet::new();

        let anchors = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|element| element.value().name().eq_ignore_ascii_case("a"));

        for anchor in anchors {
            if found.len() >= self.max_links_per_page {
                break;
            }
            let Some(href) = anchor.value().attr("href").map(str::trim) else {
                continue;
            };
            if !href.contains(self.path_marker.as_str()) {
                continue;
            }
            if let Some(url) = resolve_url(href, &self.origin) {
                found.insert(String::from(url));
            }
        }

        found.into_iter().collect()
    }
}

fn resolve_url(reference: &str, base: &Url) -> Option<Url> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with("javascript:") {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url);
    }
    base.join(trimmed).ok()
}
