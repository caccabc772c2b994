//! Integration tests for the age gate.

#![allow(clippy::unwrap_used)]

use chrono::{Datelike, Local};
use lowell_integration_tests::{TestServer, has_class};
use reqwest::StatusCode;
use reqwest::header::LOCATION;

#[tokio::test]
async fn test_fresh_visitor_sees_gate() {
    let server = TestServer::start().await;

    let (status, page) = server.page("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!has_class(&page, "age-gate", "hidden"));
    assert!(has_class(&page, "main-content", "hidden"));
}

#[tokio::test]
async fn test_underage_visitor_stays_gated() {
    let server = TestServer::start().await;
    let year = (Local::now().year() - 18).to_string();

    let resp = server.submit_age("06", "01", &year).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let page = lowell_storefront::dom::Document::new(resp.text().await.unwrap());
    assert_eq!(
        page.inner_html_by_id("age-error"),
        Some("Sorry, you must be 21 or older to enter.")
    );
    assert!(has_class(&page, "main-content", "hidden"));

    // Nothing was stored
    let (_, page) = server.page("/").await;
    assert!(!has_class(&page, "age-gate", "hidden"));
}

#[tokio::test]
async fn test_invalid_date_shows_message() {
    let server = TestServer::start().await;

    let resp = server.submit_age("13", "01", "1990").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let page = lowell_storefront::dom::Document::new(resp.text().await.unwrap());
    assert_eq!(
        page.inner_html_by_id("age-error"),
        Some("Please enter a valid date.")
    );
}

#[tokio::test]
async fn test_empty_fields_are_invalid() {
    let server = TestServer::start().await;

    let resp = server.submit_age("", "", "").await;
    let page = lowell_storefront::dom::Document::new(resp.text().await.unwrap());
    assert_eq!(
        page.inner_html_by_id("age-error"),
        Some("Please enter a valid date.")
    );
}

#[tokio::test]
async fn test_verified_visitor_redirected_and_remembered() {
    let server = TestServer::start().await;
    let year = (Local::now().year() - 30).to_string();

    let resp = server.submit_age("01", "15", &year).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/");

    let (status, page) = server.page("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(has_class(&page, "age-gate", "hidden"));
    assert!(!has_class(&page, "main-content", "hidden"));
}

#[tokio::test]
async fn test_gate_is_per_session() {
    let server = TestServer::start().await;
    server.verify().await;

    // A second visitor without the cookie still sees the gate
    let other = reqwest::Client::new();
    let body = other
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let page = lowell_storefront::dom::Document::new(body);
    assert!(!has_class(&page, "age-gate", "hidden"));
}
