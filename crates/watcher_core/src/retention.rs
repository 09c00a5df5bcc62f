use std::collections::BTreeMap;

use crate::{ListingDiff, ListingSet, Snapshot};

/// Next snapshot plus what changed, after the grace period has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RetentionOutcome {
    pub snapshot: Snapshot,
    pub added: ListingSet,
    pub removed: ListingSet,
}

/// Merge a fresh scrape into the previous snapshot.
///
/// A listing missing from a complete scrape is kept for `grace_cycles` further
/// cycles before it is reported removed and dropped. An incomplete scrape never
/// prunes and never advances miss counters, so a failed fetch cannot wipe the store.
pub fn apply_retention(
    previous: &Snapshot,
    current: &ListingSet,
    complete: bool,
    grace_cycles: u32,
) -> RetentionOutcome {
    let diff = ListingDiff::between(current, &previous.listings);
    let mut listings = current.clone();
    let mut missed = BTreeMap::new();
    let mut removed = ListingSet::new();

    for url in diff.removed {
        let misses = previous.missed.get(&url).copied().unwrap_or(0);
        if !complete {
            if misses > 0 {
                missed.insert(url.clone(), misses);
            }
            listings.insert(url);
            continue;
        }

        let misses = misses.saturating_add(1);
        if misses > grace_cycles {
            removed.insert(url);
        } else {
            missed.insert(url.clone(), misses);
            listings.insert(url);
        }
    }

    RetentionOutcome {
        snapshot: Snapshot {
            listings,
            total_count: current.len() as u64,
            missed,
        },
        added: diff.added,
        removed,
    }
}
