//! Integration tests for the product detail view.

#![allow(clippy::unwrap_used)]

use lowell_integration_tests::{TestServer, has_class};
use reqwest::StatusCode;
use reqwest::header::LOCATION;

#[tokio::test]
async fn test_detail_view_replaces_sections() {
    let server = TestServer::start().await;
    server.verify().await;

    let (status, page) = server.page("/products/8").await;
    assert_eq!(status, StatusCode::OK);

    assert!(!has_class(&page, "product-detail", "hidden"));
    for section in ["hero", "flower", "pre-rolls", "vapes", "find-us"] {
        assert!(has_class(&page, section, "hidden"), "#{section} should be hidden");
    }

    let detail = page.inner_html_by_id("product-detail").unwrap();
    assert!(detail.contains("Live Rosin Disposable Vape - Sativa"));
    assert!(detail.contains("$60"));
    assert!(detail.contains("back-to-shop"));
}

#[tokio::test]
async fn test_detail_view_mounts_one_payment_control() {
    let server = TestServer::start().await;
    server.verify().await;

    let (_, page) = server.page("/products/3").await;
    let container = page.get_element_by_id("paypal-button-container").unwrap();
    assert_eq!(container.attr("data-product-id"), Some("3"));
    assert_eq!(container.attr("data-amount"), Some("80.00"));
    assert_eq!(container.attr("data-currency"), Some("USD"));
    assert_eq!(container.attr("data-description"), Some("Lowell Quarter - Hybrid"));
}

#[tokio::test]
async fn test_unknown_product_redirects_home() {
    let server = TestServer::start().await;
    server.verify().await;

    for path in ["/products/999", "/products/0", "/products/abc"] {
        let resp = server.get(path).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(resp.headers().get(LOCATION).unwrap(), "/");
    }
}

#[tokio::test]
async fn test_product_list_is_default_view() {
    let server = TestServer::start().await;
    server.verify().await;

    let (_, page) = server.page("/").await;
    assert!(has_class(&page, "product-detail", "hidden"));
    assert!(!has_class(&page, "flower", "hidden"));
    assert_eq!(page.elements_with_class("view-product-btn").len(), 20);
}
