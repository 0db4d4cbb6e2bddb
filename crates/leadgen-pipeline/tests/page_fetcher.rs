//! `HttpPageFetcher` against a wiremock server.

use std::time::Duration;

use leadgen_pipeline::{HttpPageFetcher, PageFetcher, ScrapeError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(timeout: Duration) -> HttpPageFetcher {
    HttpPageFetcher::new(timeout, "leadgen-test").expect("client construction should not fail")
}

#[tokio::test]
async fn returns_homepage_html() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<body><a href=\"mailto:info@acme.example\">Mail</a></body>"),
        )
        .mount(&server)
        .await;

    let html = fetcher(Duration::from_secs(5))
        .fetch_html(&format!("{}/", server.uri()))
        .await
        .expect("fetch should succeed");
    assert!(html.contains("mailto:info@acme.example"));
}

#[tokio::test]
async fn non_success_status_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = fetcher(Duration::from_secs(5))
        .fetch_html(&server.uri())
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::Status { status: 503, .. }), "got {err:?}");
}

#[tokio::test]
async fn slow_page_hits_client_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let err = fetcher(Duration::from_millis(50))
        .fetch_html(&server.uri())
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::Http(_)), "got {err:?}");
}

#[tokio::test]
async fn non_http_urls_are_rejected() {
    let f = fetcher(Duration::from_secs(5));
    assert!(matches!(
        f.fetch_html("ftp://acme.example").await,
        Err(ScrapeError::InvalidUrl(_))
    ));
    assert!(matches!(
        f.fetch_html("acme dot example").await,
        Err(ScrapeError::InvalidUrl(_))
    ));
}
