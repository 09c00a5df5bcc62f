use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use watcher_core::{ListingSet, LoadOutcome, Snapshot};
use watcher_engine::{JsonFileStore, SnapshotStore};

fn data_file(temp: &TempDir) -> PathBuf {
    temp.path().join("byty.json")
}

fn store_in(temp: &TempDir) -> JsonFileStore {
    JsonFileStore::new(data_file(temp))
}

fn listings(items: &[&str]) -> ListingSet {
    items.iter().map(|s| s.to_string()).collect()
}

fn recovered_reason(outcome: LoadOutcome) -> String {
    match outcome {
        LoadOutcome::Recovered { reason } => reason,
        other => panic!("expected recovery, got {other:?}"),
    }
}

#[test]
fn missing_file_is_a_fresh_start() {
    watcher_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    let outcome = store_in(&temp).load();
    assert!(outcome.is_fresh_start());
    assert_eq!(outcome.into_snapshot(), Snapshot::default());
}

#[test]
fn not_json_recovers_with_empty_default() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    fs::write(data_file(&temp), "not json").unwrap();

    let outcome = store.load();
    assert!(recovered_reason(outcome.clone()).starts_with("invalid JSON"));
    assert_eq!(outcome.into_snapshot(), Snapshot::default());
}

#[test]
fn wrong_shape_recovers_with_empty_default() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    for content in [
        r#"["https://a"]"#,
        r#"{"listings": ["https://a"]}"#,
        r#"{"listings": "https://a", "total_count": 1}"#,
        r#"{"listings": [], "total_count": -1}"#,
    ] {
        fs::write(data_file(&temp), content).unwrap();
        let reason = recovered_reason(store.load());
        assert!(reason.starts_with("unexpected structure"), "{content}: {reason}");
    }
}

#[test]
fn legacy_file_without_miss_counters_loads() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    fs::write(
        data_file(&temp),
        r#"{
    "listings": ["https://www.sreality.cz/detail/prodej/byt/2+kk/praha/1"],
    "total_count": 1
}"#,
    )
    .unwrap();

    let snapshot = match store.load() {
        LoadOutcome::Loaded(snapshot) => snapshot,
        other => panic!("expected loaded snapshot, got {other:?}"),
    };
    assert_eq!(
        snapshot.listings,
        listings(&["https://www.sreality.cz/detail/prodej/byt/2+kk/praha/1"])
    );
    assert_eq!(snapshot.total_count, 1);
    assert!(snapshot.missed.is_empty());
}

#[test]
fn save_then_load_round_trips() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    let snapshot = Snapshot {
        listings: listings(&["https://a", "https://b"]),
        total_count: 1,
        missed: BTreeMap::from([("https://a".to_string(), 1)]),
    };

    store.save(&snapshot).unwrap();
    assert_eq!(store.load(), LoadOutcome::Loaded(snapshot));
}

#[test]
fn resaving_a_valid_file_keeps_its_content() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    store
        .save(&Snapshot::from_listings(listings(&["https://b", "https://a"])))
        .unwrap();
    let before = fs::read_to_string(data_file(&temp)).unwrap();

    let loaded = store.load().into_snapshot();
    store.save(&loaded).unwrap();

    assert_eq!(fs::read_to_string(data_file(&temp)).unwrap(), before);
    assert!(!before.contains("missed"));
}

#[test]
fn save_into_unwritable_location_reports_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "x").unwrap();

    let store = JsonFileStore::new(blocker.join("byty.json"));
    assert!(store.save(&Snapshot::default()).is_err());
}
