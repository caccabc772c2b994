//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (fills the span field, echoes the header)
//! 4. Security headers (CSP, COOP, etc.)
//! 5. Session layer (tower-sessions with in-memory store)
//! 6. Rate limiting (governor, checkout API only)

pub mod age_verification;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use age_verification::{AgeVerified, RequireAgeVerified, is_age_verified, set_age_verified};
pub use rate_limit::api_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
