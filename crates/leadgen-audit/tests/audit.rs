//! Integration tests for `WebsiteAuditor` and `PageSpeedClient` using wiremock.

use std::time::Duration;

use leadgen_audit::{AuditError, PageSpeedClient, RevenueImpact, WebsiteAuditor};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODERN_PAGE: &str = r#"<html><head>
<meta name="viewport" content="width=device-width, initial-scale=1">
<script src="/static/react.production.min.js"></script>
<style>@media (max-width: 600px) { h1 { font-size: 1rem; } }</style>
</head><body><h1>Acme</h1></body></html>"#;

fn lighthouse(performance: f64, accessibility: f64) -> serde_json::Value {
    serde_json::json!({
        "lighthouseResult": {
            "categories": {
                "performance": {"score": performance},
                "accessibility": {"score": accessibility},
                "best-practices": {"score": 0.9},
                "seo": {"score": 0.8}
            },
            "audits": {
                "first-contentful-paint": {"score": 0.9, "displayValue": "1.1 s"},
                "viewport": {"score": 1}
            }
        }
    })
}

fn pagespeed(server: &MockServer) -> PageSpeedClient {
    PageSpeedClient::with_base_url(
        Some("test-key"),
        10,
        "leadgen-test",
        &format!("{}/pagespeedonline/v5", server.uri()),
    )
    .expect("client construction should not fail")
}

fn auditor(pagespeed: Option<PageSpeedClient>) -> WebsiteAuditor {
    WebsiteAuditor::new(pagespeed, Duration::from_secs(5), "leadgen-test")
        .expect("auditor construction should not fail")
}

async fn mount_homepage(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MODERN_PAGE))
        .mount(server)
        .await;
}

#[tokio::test]
async fn combines_all_three_components() {
    let server = MockServer::start().await;
    mount_homepage(&server).await;
    Mock::given(method("GET"))
        .and(path("/pagespeedonline/v5/runPagespeed"))
        .and(query_param("strategy", "desktop"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lighthouse(0.8, 0.9)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pagespeedonline/v5/runPagespeed"))
        .and(query_param("strategy", "mobile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lighthouse(0.5, 0.7)))
        .mount(&server)
        .await;

    let site = format!("{}/", server.uri());
    let audit = auditor(Some(pagespeed(&server))).audit(&site).await.unwrap();

    let desktop = audit.pagespeed.as_ref().unwrap();
    assert_eq!(desktop.performance, 80);
    assert_eq!(desktop.best_practices, 90);
    assert_eq!(desktop.first_contentful_paint.as_deref(), Some("1.1 s"));
    let mobile = audit.mobile.as_ref().unwrap();
    assert_eq!(mobile.score, 60);
    assert!(mobile.viewport_ok);
    // Mock server is plain HTTP.
    assert_eq!(audit.ui.as_ref().unwrap().score, 90);
    // 0.5*80 + 0.25*90 + 0.25*60 = 77.5
    assert_eq!(audit.performance_score, 78);
    assert_eq!(audit.revenue_impact, RevenueImpact::Good);
    assert!(audit
        .recommendations
        .iter()
        .any(|r| r.starts_with("Improve mobile experience")));
}

#[tokio::test]
async fn without_pagespeed_only_ui_is_scored() {
    let server = MockServer::start().await;
    mount_homepage(&server).await;

    let audit = auditor(None).audit(&server.uri()).await.unwrap();

    assert!(audit.pagespeed.is_none());
    assert!(audit.mobile.is_none());
    assert_eq!(audit.performance_score, 90);
}

#[tokio::test]
async fn pagespeed_failure_is_dropped_from_score() {
    let server = MockServer::start().await;
    mount_homepage(&server).await;
    Mock::given(method("GET"))
        .and(path("/pagespeedonline/v5/runPagespeed"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota"))
        .mount(&server)
        .await;

    let audit = auditor(Some(pagespeed(&server))).audit(&server.uri()).await.unwrap();

    assert!(audit.pagespeed.is_none());
    assert!(audit.mobile.is_none());
    assert_eq!(audit.performance_score, 90);
}

#[tokio::test]
async fn unreachable_site_without_pagespeed_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = auditor(None).audit(&server.uri()).await.unwrap_err();
    assert!(matches!(err, AuditError::NothingMeasured { .. }), "got {err:?}");
}

#[tokio::test]
async fn non_http_url_is_rejected() {
    let err = auditor(None).audit("mailto:info@acme.example").await.unwrap_err();
    assert!(matches!(err, AuditError::InvalidUrl(_)));
}

#[tokio::test]
async fn null_category_score_is_missing_category() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pagespeedonline/v5/runPagespeed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "lighthouseResult": {"categories": {"performance": {"score": null}}}
        })))
        .mount(&server)
        .await;

    let err = pagespeed(&server)
        .mobile_report("https://acme.example")
        .await
        .unwrap_err();
    assert!(matches!(err, AuditError::MissingCategory(ref c) if c == "performance"));
}
