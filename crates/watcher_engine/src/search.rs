use async_trait::async_trait;
use url::Url;
use watcher_logging::{watch_debug, watch_warn};

use crate::{decode_html, FailureKind, FetchError, Fetcher, ListingLinkExtractor};

/// Source of listing references, one result page at a time.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Listings on `page` (1-based). An empty vector means the results are exhausted.
    async fn fetch_page(&self, page: u32) -> Result<Vec<String>, FetchError>;
}

/// Search-results URL plus the query parameter that selects the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTarget {
    search_url: Url,
    page_param: String,
}

impl SearchTarget {
    pub fn new(search_url: Url, page_param: impl Into<String>) -> Self {
        Self {
            search_url,
            page_param: page_param.into(),
        }
    }

    /// Appends the page parameter; the existing query is kept byte for byte.
    pub fn page_url(&self, page: u32) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair(&self.page_param, &page.to_string());
        url
    }
}

pub struct HttpPageSource {
    fetcher: Box<dyn Fetcher>,
    target: SearchTarget,
    extractor: ListingLinkExtractor,
}

impl HttpPageSource {
    pub fn new(
        fetcher: Box<dyn Fetcher>,
        target: SearchTarget,
        extractor: ListingLinkExtractor,
    ) -> Self {
        Self {
            fetcher,
            target,
            extractor,
        }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, page: u32) -> Result<Vec<String>, FetchError> {
        let url = self.target.page_url(page);
        watch_debug!("GET {}", url);

        let fetched = self.fetcher.fetch(url.as_str()).await?;
        let decoded = decode_html(&fetched.body, fetched.content_type.as_deref());
        watch_debug!(
            "Page {} decoded as {} ({} bytes)",
            page,
            decoded.encoding_label,
            fetched.body.len()
        );

        let listings = self.extractor.extract(&decoded.html);
        if decoded.had_errors {
            if listings.is_empty() {
                return Err(FetchError::new(
                    FailureKind::Decode,
                    format!("page {page} is not valid {}", decoded.encoding_label),
                ));
            }
            watch_warn!(
                "Page {} had malformed {} bytes; replaced them and kept {} listings",
                page,
                decoded.encoding_label,
                listings.len()
            );
        }
        Ok(listings)
    }
}
