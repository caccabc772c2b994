//! Per-client rate limiting for the checkout API.
//!
//! Creating and capturing orders is the only way a visitor can make the
//! storefront call PayPal, so those routes are limited per client IP with
//! `governor` via `tower_governor`.
//!
//! The client IP is the TCP peer address, which requires serving with
//! `into_make_service_with_connect_info::<SocketAddr>()`. Forwarded headers
//! are only consulted when `STOREFRONT_TRUST_PROXY` says a reverse proxy
//! sets them; otherwise any visitor could pick their own key.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::extract::ConnectInfo;
use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::key_extractor::KeyExtractor;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

/// Header a trusted reverse proxy appends the client address to.
const FORWARDED_FOR: &str = "x-forwarded-for";

/// Keys requests by client IP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientIpKeyExtractor {
    trust_forwarded: bool,
}

impl ClientIpKeyExtractor {
    /// Key on the peer address only.
    #[must_use]
    pub const fn direct() -> Self {
        Self {
            trust_forwarded: false,
        }
    }

    /// Key on the address the proxy saw, falling back to the peer address.
    #[must_use]
    pub const fn behind_proxy() -> Self {
        Self {
            trust_forwarded: true,
        }
    }
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        if self.trust_forwarded {
            // The proxy appends the peer it saw; earlier entries are client-supplied.
            let forwarded = req
                .headers()
                .get(FORWARDED_FOR)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.rsplit(',').next())
                .and_then(|s| s.trim().parse::<IpAddr>().ok());
            if let Some(ip) = forwarded {
                return Ok(ip);
            }
        }

        req.extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
            .ok_or(GovernorError::UnableToExtractKey)
    }
}

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Checkout limiter: burst of 50, then one request per second per client.
///
/// # Panics
///
/// Does not panic; `per_second(1)` and `burst_size(50)` are valid settings.
#[must_use]
pub fn api_rate_limiter(trust_proxy: bool) -> RateLimiterLayer {
    let key_extractor = if trust_proxy {
        ClientIpKeyExtractor::behind_proxy()
    } else {
        ClientIpKeyExtractor::direct()
    };

    let config = GovernorConfigBuilder::default()
        .key_extractor(key_extractor)
        .per_second(1)
        .burst_size(50)
        .finish()
        .expect("rate limiter config with per_second(1) and burst_size(50) is valid");
    GovernorLayer::new(Arc::new(config))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(peer: Option<&str>, forwarded: Option<&str>) -> Request<()> {
        let mut builder = Request::builder().uri("/api/checkout/orders");
        if let Some(value) = forwarded {
            builder = builder.header(FORWARDED_FOR, value);
        }
        let mut req = builder.body(()).unwrap();
        if let Some(addr) = peer {
            req.extensions_mut()
                .insert(ConnectInfo(addr.parse::<SocketAddr>().unwrap()));
        }
        req
    }

    #[test]
    fn test_direct_keys_on_peer_address() {
        let key = ClientIpKeyExtractor::direct()
            .extract(&request(Some("198.51.100.4:52311"), None))
            .unwrap();
        assert_eq!(key, "198.51.100.4".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_direct_ignores_spoofed_forwarded_header() {
        let key = ClientIpKeyExtractor::direct()
            .extract(&request(Some("198.51.100.4:52311"), Some("203.0.113.7")))
            .unwrap();
        assert_eq!(key, "198.51.100.4".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_behind_proxy_uses_last_forwarded_entry() {
        let key = ClientIpKeyExtractor::behind_proxy()
            .extract(&request(
                Some("10.0.0.2:40000"),
                Some("203.0.113.7, 192.0.2.44"),
            ))
            .unwrap();
        assert_eq!(key, "192.0.2.44".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_behind_proxy_falls_back_to_peer() {
        let key = ClientIpKeyExtractor::behind_proxy()
            .extract(&request(Some("10.0.0.2:40000"), Some("not-an-ip")))
            .unwrap();
        assert_eq!(key, "10.0.0.2".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_missing_peer_is_an_error() {
        let result = ClientIpKeyExtractor::direct().extract(&request(None, None));
        assert!(matches!(result, Err(GovernorError::UnableToExtractKey)));
    }
}
