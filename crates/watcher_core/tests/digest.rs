use watcher_core::{format_digest, format_status, ListingSet, Messages};

fn urls(count: usize) -> ListingSet {
    (0..count)
        .map(|i| format!("https://www.sreality.cz/detail/prodej/byt/2+kk/praha/{i:04}"))
        .collect()
}

#[test]
fn empty_set_produces_no_message() {
    assert!(format_digest("Nové nabídky:", &ListingSet::new(), 2000).is_empty());
}

#[test]
fn short_digest_is_one_message() {
    let listings: ListingSet = ["https://a", "https://b"].iter().map(|s| s.to_string()).collect();
    assert_eq!(
        format_digest("Nové nabídky:", &listings, 2000),
        vec!["Nové nabídky:\nhttps://a\nhttps://b".to_string()]
    );
}

#[test]
fn long_digest_is_split_under_limit() {
    let listings = urls(100);
    let chunks = format_digest("Nové nabídky:", &listings, 2000);

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.chars().count() <= 2000);
        assert!(chunk.starts_with("Nové nabídky:\n"));
    }
    let listed: Vec<&str> = chunks
        .iter()
        .flat_map(|chunk| chunk.lines().skip(1))
        .collect();
    assert_eq!(listed.len(), 100);
    assert!(listings.iter().zip(listed).all(|(a, b)| a == b));
}

#[test]
fn oversized_url_is_cut_to_fit() {
    let listings: ListingSet = ["x".repeat(50), "y".to_string()].into_iter().collect();
    let chunks = format_digest("H", &listings, 10);
    assert_eq!(chunks, vec![format!("H\n{}…", "x".repeat(7)), "H\ny".to_string()]);
    assert!(chunks.iter().all(|chunk| chunk.chars().count() <= 10));
}

#[test]
fn status_line_fills_placeholders() {
    let messages = Messages::default();
    assert_eq!(
        format_status(&messages.status_template, 12, "2025-03-08 09:30:00"),
        "Počet bytů: 12\nKontrola byla spuštěna v 2025-03-08 09:30:00"
    );
}
