use pretty_assertions::assert_eq;
use watcher_core::{apply_retention, ListingDiff, ListingSet, Snapshot};

fn set(items: &[&str]) -> ListingSet {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn diff_partitions_both_sets() {
    let cases = [
        (set(&["B", "C"]), set(&["A", "B"])),
        (set(&[]), set(&["A"])),
        (set(&["A"]), set(&[])),
        (set(&["A", "B", "C"]), set(&["A", "B", "C"])),
        (set(&["x", "y"]), set(&["p", "q", "x"])),
    ];

    for (current, previous) in cases {
        let diff = ListingDiff::between(&current, &previous);
        assert!(diff.added.is_disjoint(&diff.removed));

        let common: ListingSet = current.intersection(&previous).cloned().collect();
        let rebuilt_current: ListingSet = common.union(&diff.added).cloned().collect();
        let rebuilt_previous: ListingSet = common.union(&diff.removed).cloned().collect();
        assert_eq!(rebuilt_current, current);
        assert_eq!(rebuilt_previous, previous);
    }
}

#[test]
fn zero_grace_is_exact_replace() {
    let previous = Snapshot::from_listings(set(&["A", "B"]));
    let outcome = apply_retention(&previous, &set(&["B", "C"]), true, 0);

    assert_eq!(outcome.added, set(&["C"]));
    assert_eq!(outcome.removed, set(&["A"]));
    assert_eq!(outcome.snapshot.listings, set(&["B", "C"]));
    assert!(outcome.snapshot.missed.is_empty());
}

#[test]
fn missing_listing_survives_grace_period() {
    let previous = Snapshot::from_listings(set(&["A", "B"]));

    let first = apply_retention(&previous, &set(&["B"]), true, 2);
    assert!(first.removed.is_empty());
    assert_eq!(first.snapshot.listings, set(&["A", "B"]));
    assert_eq!(first.snapshot.missed.get("A"), Some(&1));
    assert_eq!(first.snapshot.total_count, 1);

    let second = apply_retention(&first.snapshot, &set(&["B"]), true, 2);
    assert!(second.removed.is_empty());
    assert_eq!(second.snapshot.missed.get("A"), Some(&2));

    let third = apply_retention(&second.snapshot, &set(&["B"]), true, 2);
    assert_eq!(third.removed, set(&["A"]));
    assert_eq!(third.snapshot.listings, set(&["B"]));
    assert!(third.snapshot.missed.is_empty());
}

#[test]
fn reappearing_listing_clears_its_miss_count() {
    let previous = Snapshot::from_listings(set(&["A", "B"]));
    let missed_once = apply_retention(&previous, &set(&["B"]), true, 1);
    assert_eq!(missed_once.snapshot.missed.get("A"), Some(&1));

    let back = apply_retention(&missed_once.snapshot, &set(&["A", "B"]), true, 1);
    assert!(back.added.is_empty());
    assert!(back.snapshot.missed.is_empty());
}

#[test]
fn incomplete_scrape_never_prunes() {
    let previous = Snapshot::from_listings(set(&["A", "B"]));
    let missed_once = apply_retention(&previous, &set(&["B"]), true, 1);

    let outcome = apply_retention(&missed_once.snapshot, &set(&["C"]), false, 0);
    assert_eq!(outcome.added, set(&["C"]));
    assert!(outcome.removed.is_empty());
    assert_eq!(outcome.snapshot.listings, set(&["A", "B", "C"]));
    assert_eq!(outcome.snapshot.missed.get("A"), Some(&1));
    assert_eq!(outcome.snapshot.missed.get("B"), None);
}
