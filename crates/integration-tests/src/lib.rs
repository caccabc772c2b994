//! Integration test harness for the Lowell storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p lowell-integration-tests
//! ```
//!
//! Each test starts the real router on an ephemeral port, backed by the
//! bundled partials and a `wiremock` server standing in for PayPal. The
//! client keeps cookies, so the session flows between requests the way it
//! does in a browser.

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::{Datelike, Local};
use lowell_storefront::config::{PartialsLocation, PayPalConfig, StorefrontConfig};
use lowell_storefront::dom::Document;
use lowell_storefront::routes;
use lowell_storefront::startup;
use lowell_storefront::state::AppState;
use reqwest::{Client, Response, redirect};
use secrecy::SecretString;
use url::Url;
use wiremock::MockServer;

/// Partials shipped with the storefront crate.
pub fn partials_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/partials"))
}

/// Configuration pointing PayPal at `paypal_base`.
pub fn test_config(paypal_base: &str) -> StorefrontConfig {
    StorefrontConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        base_url: "http://localhost".to_string(),
        trust_proxy: false,
        partials: PartialsLocation::Directory(partials_dir()),
        catalog_path: None,
        paypal: PayPalConfig {
            client_id: "test-client-id".to_string(),
            client_secret: SecretString::from("test-client-secret"),
            api_base: Url::parse(paypal_base).expect("valid mock url"),
            payee_email: None,
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// A running storefront with its mock PayPal backend.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub paypal: MockServer,
}

impl TestServer {
    /// Bootstrap the site and serve it on a random local port.
    pub async fn start() -> Self {
        let paypal = MockServer::start().await;
        let config = test_config(&paypal.uri());

        let (site, report) = startup::bootstrap(&config)
            .await
            .expect("bundled partials should wire");
        assert!(report.is_complete(), "every partial should load");

        let app = routes::app(AppState::new(config, site));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("server error");
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            addr,
            client,
            paypal,
        }
    }

    /// Absolute URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// GET `path` and parse the body as a page.
    pub async fn page(&self, path: &str) -> (reqwest::StatusCode, Document) {
        let resp = self.get(path).await;
        let status = resp.status();
        let body = resp.text().await.expect("Failed to read response");
        (status, Document::new(body))
    }

    /// GET `path`.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("request failed")
    }

    /// Submit the age form with raw field values.
    pub async fn submit_age(&self, month: &str, day: &str, year: &str) -> Response {
        self.client
            .post(self.url("/age-gate"))
            .form(&[("month", month), ("day", day), ("year", year)])
            .send()
            .await
            .expect("request failed")
    }

    /// Pass the age gate as a 30-year-old.
    pub async fn verify(&self) {
        let year = (Local::now().year() - 30).to_string();
        let resp = self.submit_age("01", "15", &year).await;
        assert_eq!(resp.status(), reqwest::StatusCode::SEE_OTHER);
    }
}

/// Whether the element with `id` carries `class`.
pub fn has_class(page: &Document, id: &str, class: &str) -> bool {
    page.get_element_by_id(id)
        .unwrap_or_else(|| panic!("#{id} missing from page"))
        .has_class(class)
}
