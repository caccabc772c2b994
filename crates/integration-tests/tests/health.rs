//! Integration tests for operational endpoints and response headers.

#![allow(clippy::unwrap_used)]

use lowell_integration_tests::TestServer;
use reqwest::StatusCode;

#[tokio::test]
async fn test_health_endpoints() {
    let server = TestServer::start().await;

    let resp = server.get("/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    let resp = server.get("/health/ready").await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_security_headers_present() {
    let server = TestServer::start().await;

    let resp = server.get("/").await;
    let headers = resp.headers();
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    let csp = headers
        .get("content-security-policy")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(csp.contains("https://www.paypal.com"));
}

#[tokio::test]
async fn test_request_id_echoed_or_generated() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .get(server.url("/health"))
        .header("x-request-id", "edge-1234")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "edge-1234");

    let resp = server.get("/health").await;
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_partials_served_from_directory() {
    let server = TestServer::start().await;

    let resp = server.get("/partials/footer.html").await;
    assert_eq!(resp.status(), StatusCode::OK);
}
