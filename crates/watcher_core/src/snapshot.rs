use std::collections::BTreeMap;

use crate::ListingSet;

/// Persisted view of the listings seen so far.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub listings: ListingSet,
    /// Number of listings found by the scrape that produced this snapshot.
    pub total_count: u64,
    /// Consecutive complete scrapes each retained listing has been missing from.
    pub missed: BTreeMap<String, u32>,
}

impl Snapshot {
    pub fn from_listings(listings: ListingSet) -> Self {
        let total_count = listings.len() as u64;
        Self {
            listings,
            total_count,
            missed: BTreeMap::new(),
        }
    }
}

/// Result of reading the snapshot store.
///
/// Every variant yields a usable snapshot; the variant only records how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(Snapshot),
    /// No snapshot file yet.
    Missing,
    /// The file existed but could not be used; the empty default replaces it.
    Recovered { reason: String },
}

impl LoadOutcome {
    pub fn into_snapshot(self) -> Snapshot {
        match self {
            LoadOutcome::Loaded(snapshot) => snapshot,
            LoadOutcome::Missing | LoadOutcome::Recovered { .. } => Snapshot::default(),
        }
    }

    pub fn is_fresh_start(&self) -> bool {
        matches!(self, LoadOutcome::Missing)
    }
}
