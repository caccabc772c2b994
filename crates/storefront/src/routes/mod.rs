//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                    - Assembled page (?q= filters stores)
//! POST /age-gate                            - Submit birth date
//! GET  /products/{id}                       - Page with the detail view open
//! GET  /stores?q=                           - Store list fragment (verified only)
//!
//! # Checkout (verified, rate limited)
//! POST /api/checkout/orders                 - Create a PayPal order
//! POST /api/checkout/orders/{id}/capture    - Capture an approved order
//!
//! # Operations
//! GET  /health                              - Liveness
//! GET  /health/ready                        - Readiness
//! GET  /static/*                            - Scripts, styles, images
//! GET  /partials/*                          - Partial files (directory source only)
//! ```

pub mod age_gate;
pub mod checkout;
pub mod home;
pub mod products;
pub mod stores;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::from_fn,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::Session;

use crate::config::{PartialsLocation, StorefrontConfig};
use crate::error::Result;
use crate::middleware::{
    api_rate_limiter, create_session_layer, request_id_middleware, security_headers_middleware,
    set_age_verified,
};
use crate::site::Effect;
use crate::state::AppState;

/// Directory served under `/static`.
pub const STATIC_DIR: &str = "crates/storefront/static";

/// Create the page routes router.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/age-gate", post(age_gate::submit))
        .route("/products/{id}", get(products::show))
        .route("/stores", get(stores::list))
}

/// Create the checkout API router.
///
/// `trust_proxy` selects whether the rate limiter believes `X-Forwarded-For`.
pub fn checkout_routes(trust_proxy: bool) -> Router<AppState> {
    Router::new()
        .route("/orders", post(checkout::create_order))
        .route("/orders/{order_id}/capture", post(checkout::capture_order))
        .layer(api_rate_limiter(trust_proxy))
}

/// Create all storefront routes.
pub fn routes(config: &StorefrontConfig) -> Router<AppState> {
    Router::new()
        .merge(page_routes())
        .nest("/api/checkout", checkout_routes(config.trust_proxy))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
}

/// Build the complete application with state and middleware.
///
/// Serve it with `into_make_service_with_connect_info::<SocketAddr>()`; the
/// checkout rate limiter keys on the peer address.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    let mut router = routes(state.config()).nest_service("/static", ServeDir::new(STATIC_DIR));
    if let PartialsLocation::Directory(dir) = &state.config().partials {
        router = router.nest_service("/partials", ServeDir::new(dir));
    }

    router
        .layer(session_layer)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Sentry layers (outermost for full request coverage)
                .layer(sentry_tower::NewSentryLayer::new_from_top())
                .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
                .layer(TraceLayer::new_for_http().make_span_with(
                    |request: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = tracing::field::Empty,
                        )
                    },
                ))
                .layer(from_fn(request_id_middleware))
                .layer(from_fn(security_headers_middleware)),
        )
}

/// Execute the effects a site transition requested.
///
/// Scrolling happens in the browser; only the session write runs here.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub async fn apply_effects(session: &Session, effects: &[Effect]) -> Result<()> {
    for effect in effects {
        match effect {
            Effect::PersistAgeVerified => set_age_verified(session).await?,
            Effect::ScrollToTop | Effect::ScrollIntoView(_) => {
                tracing::trace!(?effect, "Client-side effect");
            }
        }
    }
    Ok(())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 if the catalog is empty.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.site().catalog().is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;
    use crate::middleware::is_age_verified;

    #[tokio::test]
    async fn test_apply_effects_only_writes_flag_on_persist() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);

        apply_effects(&session, &[Effect::ScrollToTop, Effect::ScrollIntoView("flower")])
            .await
            .unwrap();
        assert!(!is_age_verified(&session).await);

        apply_effects(&session, &[Effect::PersistAgeVerified])
            .await
            .unwrap();
        assert!(is_age_verified(&session).await);
    }
}
