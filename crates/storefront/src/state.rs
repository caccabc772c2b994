//! Application state shared across handlers.

use std::sync::Arc;

use crate::checkout::paypal::PayPalClient;
use crate::config::StorefrontConfig;
use crate::site::Site;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The wired [`Site`] is
/// immutable; handlers render per-request copies of its page.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    site: Site,
    paypal: PayPalClient,
}

impl AppState {
    /// Create a new application state from a wired site.
    #[must_use]
    pub fn new(config: StorefrontConfig, site: Site) -> Self {
        let paypal = PayPalClient::new(&config.paypal);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                site,
                paypal,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the wired site.
    #[must_use]
    pub fn site(&self) -> &Site {
        &self.inner.site
    }

    /// Get a reference to the PayPal client.
    #[must_use]
    pub fn paypal(&self) -> &PayPalClient {
        &self.inner.paypal
    }
}
