use std::collections::BTreeSet;

/// Set of listing references (absolute detail-page URLs).
///
/// Ordered so digests and persisted files come out the same way every cycle.
pub type ListingSet = BTreeSet<String>;

/// Set difference between a fresh scrape and the stored listings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingDiff {
    pub added: ListingSet,
    pub removed: ListingSet,
}

impl ListingDiff {
    /// `added = current - previous`, `removed = previous - current`.
    pub fn between(current: &ListingSet, previous: &ListingSet) -> Self {
        Self {
            added: current.difference(previous).cloned().collect(),
            removed: previous.difference(current).cloned().collect(),
        }
    }
}
