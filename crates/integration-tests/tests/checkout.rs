//! Integration tests for the PayPal checkout API.

#![allow(clippy::unwrap_used)]

use lowell_integration_tests::TestServer;
use lowell_storefront::checkout::PAYMENT_ERROR_MESSAGE;
use reqwest::StatusCode;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header_exists, method, path};
use wiremock::{Mock, ResponseTemplate};

const ORDER_ID: &str = "5O190127TN364715T";

async fn mount_token(server: &TestServer) {
    Mock::given(method("POST"))
        .and(path("/v1/oauth2/token"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A21AAtest",
            "token_type": "Bearer",
            "expires_in": 32400
        })))
        .mount(&server.paypal)
        .await;
}

async fn create_order(server: &TestServer, product_id: i32) -> reqwest::Response {
    server
        .client
        .post(server.url("/api/checkout/orders"))
        .json(&json!({ "product_id": product_id }))
        .send()
        .await
        .unwrap()
}

async fn capture(server: &TestServer, order_id: &str) -> reqwest::Response {
    server
        .client
        .post(server.url(&format!("/api/checkout/orders/{order_id}/capture")))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_checkout_requires_verification() {
    let server = TestServer::start().await;

    let resp = create_order(&server, 8).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_order_uses_catalog_price() {
    let server = TestServer::start().await;
    server.verify().await;
    mount_token(&server).await;

    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders"))
        .and(body_partial_json(json!({
            "intent": "CAPTURE",
            "purchase_units": [{
                "description": "Live Rosin Disposable Vape - Sativa",
                "amount": { "currency_code": "USD", "value": "60.00" }
            }]
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": ORDER_ID, "status": "CREATED" })),
        )
        .expect(1)
        .mount(&server.paypal)
        .await;

    let resp = create_order(&server, 8).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], ORDER_ID);
}

#[tokio::test]
async fn test_create_order_for_unknown_product() {
    let server = TestServer::start().await;
    server.verify().await;

    let resp = create_order(&server, 999).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_capture_greets_payer() {
    let server = TestServer::start().await;
    server.verify().await;
    mount_token(&server).await;

    Mock::given(method("POST"))
        .and(path(format!("/v2/checkout/orders/{ORDER_ID}/capture")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": ORDER_ID,
            "status": "COMPLETED",
            "payer": { "name": { "given_name": "Ada", "surname": "Lovelace" } }
        })))
        .mount(&server.paypal)
        .await;

    let resp = capture(&server, ORDER_ID).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Transaction completed successfully! Thank you, Ada."
    );
}

#[tokio::test]
async fn test_capture_without_payer_name() {
    let server = TestServer::start().await;
    server.verify().await;
    mount_token(&server).await;

    Mock::given(method("POST"))
        .and(path(format!("/v2/checkout/orders/{ORDER_ID}/capture")))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "id": ORDER_ID, "status": "COMPLETED" })),
        )
        .mount(&server.paypal)
        .await;

    let body: Value = capture(&server, ORDER_ID).await.json().await.unwrap();
    assert_eq!(body["message"], "Transaction completed successfully! Thank you.");
}

#[tokio::test]
async fn test_provider_failure_shows_generic_message() {
    let server = TestServer::start().await;
    server.verify().await;
    mount_token(&server).await;

    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders"))
        .respond_with(ResponseTemplate::new(500).set_body_string("INTERNAL_SERVICE_ERROR"))
        .mount(&server.paypal)
        .await;

    let resp = create_order(&server, 1).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(resp.text().await.unwrap(), PAYMENT_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_malformed_order_id_never_reaches_provider() {
    let server = TestServer::start().await;
    server.verify().await;

    let resp = capture(&server, "not.an.order").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(server.paypal.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_order_from_direct_connection() {
    let server = TestServer::start().await;
    server.verify().await;
    mount_token(&server).await;

    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": ORDER_ID, "status": "CREATED" })),
        )
        .mount(&server.paypal)
        .await;

    // No proxy headers: the limiter keys on the peer address.
    let resp = create_order(&server, 8).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], ORDER_ID);
}

#[tokio::test]
async fn test_forwarded_header_does_not_reset_limit() {
    let server = TestServer::start().await;
    server.verify().await;

    let mut statuses = Vec::new();
    for i in 0..60 {
        let resp = server
            .client
            .post(server.url("/api/checkout/orders/not.an.order/capture"))
            .header("x-forwarded-for", format!("203.0.113.{i}"))
            .send()
            .await
            .unwrap();
        statuses.push(resp.status());
    }

    assert_eq!(statuses.first(), Some(&StatusCode::BAD_REQUEST));
    assert!(statuses.contains(&StatusCode::TOO_MANY_REQUESTS));
}
