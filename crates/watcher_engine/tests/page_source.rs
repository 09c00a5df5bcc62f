use url::Url;
use watcher_engine::{
    FailureKind, FetchSettings, HttpPageSource, ListingLinkExtractor, PageSource, ReqwestFetcher,
    SearchTarget,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source_for(server: &MockServer) -> HttpPageSource {
    let base = Url::parse(&server.uri()).unwrap();
    let search = base.join("/hledani/prodej/byty?cena-do=7300000").unwrap();
    HttpPageSource::new(
        Box::new(ReqwestFetcher::new(FetchSettings::default()).unwrap()),
        SearchTarget::new(search, "strana"),
        ListingLinkExtractor::new(base, "/detail/prodej/byt"),
    )
}

#[tokio::test]
async fn page_number_goes_into_the_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hledani/prodej/byty"))
        .and(query_param("cena-do", "7300000"))
        .and(query_param("strana", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<a href="/detail/prodej/byt/2+kk/praha/9">x</a>"#,
            "text/html; charset=utf-8",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let listings = source_for(&server).fetch_page(2).await.expect("page 2");
    assert_eq!(
        listings,
        vec![format!("{}/detail/prodej/byt/2+kk/praha/9", server.uri())]
    );
}

#[tokio::test]
async fn error_status_is_a_failure_not_an_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = source_for(&server).fetch_page(1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(403));
}

#[tokio::test]
async fn windows_1250_page_is_decoded() {
    let server = MockServer::start().await;
    let mut body = b"<p>Pron\xe1jem</p>".to_vec();
    body.extend_from_slice(br#"<a href="/detail/prodej/byt/1+kk/praha/5">x</a>"#);
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=windows-1250"))
        .mount(&server)
        .await;

    let listings = source_for(&server).fetch_page(1).await.expect("page 1");
    assert_eq!(listings.len(), 1);
}

#[tokio::test]
async fn stray_byte_keeps_the_listings_on_the_page() {
    let server = MockServer::start().await;
    let mut body = br#"<a href="/detail/prodej/byt/2+kk/praha/9">x</a>"#.to_vec();
    body.extend_from_slice(b"<p>\xFF</p>");
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .mount(&server)
        .await;

    let listings = source_for(&server).fetch_page(1).await.expect("page 1");
    assert_eq!(
        listings,
        vec![format!("{}/detail/prodej/byt/2+kk/praha/9", server.uri())]
    );
}

#[tokio::test]
async fn garbled_page_without_listings_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"<p>\xFF\xFE\xFD</p>".to_vec(), "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let err = source_for(&server).fetch_page(1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
    assert!(!err.kind.is_transient());
}
