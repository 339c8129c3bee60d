// Tests for the page audit against a mock site

use sitegraph_core::audit::{AuditSummary, audit_pages, collect_internal_links};
use sitegraph_scanner::fetcher::PageFetcher;
use sitegraph_scanner::result::{Edge, LinkClass};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[tokio::test]
async fn test_audit_of_internal_pages() {
    let server = MockServer::start().await;
    let base = server.uri();

    let login = r#"<form><input type="text" name="u"><input type="password" name="p"></form>"#;
    let contact = r#"<form action="/send"><textarea></textarea></form>"#;
    let home = "<p>welcome</p>";

    for (route, body) in [("/", home), ("/login", login), ("/contact", contact)] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
    }

    let edges = vec![
        Edge::new(format!("{}/", base), format!("{}/login", base), LinkClass::Internal),
        Edge::new(format!("{}/", base), format!("{}/contact", base), LinkClass::Internal),
        Edge::new(format!("{}/", base), "http://other.invalid/", LinkClass::External),
        Edge::new(format!("{}/login", base), format!("{}/gone", base), LinkClass::Error),
    ];

    let links = collect_internal_links(&edges);
    assert_eq!(links.len(), 3);

    let fetcher = PageFetcher::with_timeout(5).unwrap();
    let inspections = audit_pages(&fetcher, links).await;
    assert_eq!(inspections.len(), 3);

    let summary = AuditSummary::from_inspections(&inspections);
    assert_eq!(summary.pages_with_login_field, 1);
    assert_eq!(summary.pages_with_forms, 2);
    assert_eq!(summary.max_size, login.len());
    assert_eq!(summary.min_size, home.len());
}

#[tokio::test]
async fn test_audit_skips_unreachable_pages() {
    let fetcher = PageFetcher::with_timeout(1).unwrap();
    let links = vec![
        "http://127.0.0.1:1/".to_string(),
        "not a url".to_string(),
    ];

    let inspections = audit_pages(&fetcher, links).await;

    assert!(inspections.is_empty());
    assert_eq!(AuditSummary::from_inspections(&inspections), AuditSummary::default());
}
