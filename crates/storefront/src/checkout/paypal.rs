//! PayPal Orders v2 REST client.
//!
//! Uses OAuth2 client credentials. The access token is cached with `moka`
//! and refreshed after 30 minutes, well inside PayPal's token lifetime.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use lowell_core::Email;
use moka::future::Cache;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use super::{CaptureResponse, CreateOrderRequest, Order};
use crate::config::PayPalConfig;

/// How long a fetched access token is reused.
const TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Order ids are short alphanumeric strings; anything else never reaches PayPal.
static ORDER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]{1,64}$").expect("Invalid regex"));

/// Errors from the PayPal API.
#[derive(Debug, Error)]
pub enum PayPalError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Fetching an access token failed.
    #[error("token error: {0}")]
    Token(String),

    /// The order id is not a PayPal order id.
    #[error("invalid order id: {0}")]
    InvalidOrderId(String),

    /// Failed to build a URL or parse a response.
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client for the PayPal REST API.
#[derive(Clone)]
pub struct PayPalClient {
    inner: Arc<PayPalClientInner>,
}

struct PayPalClientInner {
    client: reqwest::Client,
    api_base: Url,
    client_id: String,
    client_secret: SecretString,
    payee: Option<Email>,
    tokens: Cache<(), String>,
}

impl std::fmt::Debug for PayPalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayPalClient")
            .field("api_base", &self.inner.api_base.as_str())
            .field("client_id", &self.inner.client_id)
            .finish_non_exhaustive()
    }
}

impl PayPalClient {
    /// Create a new PayPal client.
    #[must_use]
    pub fn new(config: &PayPalConfig) -> Self {
        let tokens = Cache::builder()
            .max_capacity(1)
            .time_to_live(TOKEN_TTL)
            .build();

        Self {
            inner: Arc::new(PayPalClientInner {
                client: reqwest::Client::new(),
                api_base: with_trailing_slash(config.api_base.clone()),
                client_id: config.client_id.clone(),
                client_secret: config.client_secret.clone(),
                payee: config.payee_email.clone(),
                tokens,
            }),
        }
    }

    /// The configured payee, added to every order.
    #[must_use]
    pub fn payee(&self) -> Option<&Email> {
        self.inner.payee.as_ref()
    }

    /// Create an order.
    ///
    /// # Errors
    ///
    /// Returns `PayPalError` if authentication or the API call fails.
    #[instrument(skip(self, request))]
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, PayPalError> {
        let url = self.endpoint("v2/checkout/orders")?;
        let token = self.access_token().await?;

        let response = self
            .inner
            .client
            .post(url)
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;

        let order: Order = Self::parse(response).await?;
        tracing::info!(order_id = %order.id, "PayPal order created");
        Ok(order)
    }

    /// Capture an approved order.
    ///
    /// # Errors
    ///
    /// Returns `PayPalError::InvalidOrderId` for malformed ids, or another
    /// `PayPalError` if authentication or the API call fails.
    #[instrument(skip(self))]
    pub async fn capture_order(&self, order_id: &str) -> Result<CaptureResponse, PayPalError> {
        if !is_valid_order_id(order_id) {
            return Err(PayPalError::InvalidOrderId(order_id.to_string()));
        }

        let url = self.endpoint(&format!("v2/checkout/orders/{order_id}/capture"))?;
        let token = self.access_token().await?;

        let response = self
            .inner
            .client
            .post(url)
            .bearer_auth(token)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let capture: CaptureResponse = Self::parse(response).await?;
        tracing::info!(order_id = %capture.id, status = ?capture.status, "PayPal order captured");
        Ok(capture)
    }

    /// Current access token, fetching a new one when the cached one expired.
    async fn access_token(&self) -> Result<String, PayPalError> {
        self.inner
            .tokens
            .try_get_with((), self.fetch_token())
            .await
            .map_err(|e| PayPalError::Token(e.to_string()))
    }

    async fn fetch_token(&self) -> Result<String, PayPalError> {
        let url = self.endpoint("v1/oauth2/token")?;
        let response = self
            .inner
            .client
            .post(url)
            .basic_auth(
                &self.inner.client_id,
                Some(self.inner.client_secret.expose_secret()),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let token: TokenResponse = Self::parse(response).await?;
        tracing::debug!("Fetched PayPal access token");
        Ok(token.access_token)
    }

    fn endpoint(&self, path: &str) -> Result<Url, PayPalError> {
        self.inner
            .api_base
            .join(path)
            .map_err(|e| PayPalError::Parse(e.to_string()))
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PayPalError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "PayPal API returned non-success status"
            );
            return Err(PayPalError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "Failed to parse PayPal response");
            PayPalError::Parse(e.to_string())
        })
    }
}

/// Endpoint paths are joined onto the base, so its last segment must end
/// with `/` or a gateway prefix would be replaced.
fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

/// Whether `order_id` looks like a PayPal order id.
#[must_use]
pub fn is_valid_order_id(order_id: &str) -> bool {
    ORDER_ID_RE.is_match(order_id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_validation() {
        assert!(is_valid_order_id("5O190127TN364715T"));
        assert!(is_valid_order_id("ORDER-1"));
        assert!(!is_valid_order_id(""));
        assert!(!is_valid_order_id("../v1/oauth2/token"));
        assert!(!is_valid_order_id("abc/capture"));
        assert!(!is_valid_order_id(&"A".repeat(65)));
    }

    fn config(api_base: &str) -> PayPalConfig {
        PayPalConfig {
            client_id: "client".to_string(),
            client_secret: SecretString::from("k2Qv7Zr4mTq8WbNc3EL9x"),
            api_base: Url::parse(api_base).unwrap(),
            payee_email: None,
        }
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let client = PayPalClient::new(&config("https://gateway.example.com/paypal"));
        assert_eq!(
            client.endpoint("v2/checkout/orders").unwrap().as_str(),
            "https://gateway.example.com/paypal/v2/checkout/orders"
        );

        let client = PayPalClient::new(&config("https://api-m.sandbox.paypal.com"));
        assert_eq!(
            client.endpoint("v1/oauth2/token").unwrap().as_str(),
            "https://api-m.sandbox.paypal.com/v1/oauth2/token"
        );
    }

    #[tokio::test]
    async fn test_capture_rejects_bad_id_before_any_request() {
        // Nothing listens here; a request would fail with an HTTP error.
        let client = PayPalClient::new(&config("http://127.0.0.1:9"));
        let result = client.capture_order("not/an/id").await;
        assert!(matches!(result, Err(PayPalError::InvalidOrderId(_))));
    }
}
