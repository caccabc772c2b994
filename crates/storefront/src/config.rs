//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `PAYPAL_CLIENT_ID` - PayPal REST app client ID (also used by the JS SDK)
//! - `PAYPAL_CLIENT_SECRET` - PayPal REST app secret (high entropy)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_PARTIALS` - Partials directory, or an `http(s)://` URL to
//!   fetch them from (default: `crates/storefront/partials`)
//! - `STOREFRONT_CATALOG_PATH` - JSON catalog resource (default: built-in catalog)
//! - `PAYPAL_API_BASE` - PayPal REST API base (default: sandbox)
//! - `PAYPAL_PAYEE_EMAIL` - Merchant email set as the order payee
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use lowell_core::Email;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Default PayPal REST API base.
pub const PAYPAL_SANDBOX_API: &str = "https://api-m.sandbox.paypal.com";

/// Default partials directory, relative to the workspace root.
pub const DEFAULT_PARTIALS_DIR: &str = "crates/storefront/partials";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Where the page partials are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartialsLocation {
    /// A local directory.
    Directory(PathBuf),
    /// A base URL; each partial is fetched with a plain GET.
    Remote(Url),
}

impl PartialsLocation {
    /// Interpret a `STOREFRONT_PARTIALS` value.
    ///
    /// Values starting with `http://` or `https://` are URLs, anything else
    /// is a directory path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for a malformed URL.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        if value.starts_with("http://") || value.starts_with("https://") {
            let url = Url::parse(value).map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PARTIALS".to_string(), e.to_string())
            })?;
            Ok(Self::Remote(url))
        } else {
            Ok(Self::Directory(PathBuf::from(value)))
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Whether a reverse proxy in front of the server sets `X-Forwarded-For`
    pub trust_proxy: bool,
    /// Partials source
    pub partials: PartialsLocation,
    /// Optional catalog resource
    pub catalog_path: Option<PathBuf>,
    /// PayPal configuration
    pub paypal: PayPalConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate
    pub sentry_traces_sample_rate: f32,
}

/// PayPal REST API configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct PayPalConfig {
    /// REST app client ID (public, embedded in the SDK script URL)
    pub client_id: String,
    /// REST app secret (server-side only)
    pub client_secret: SecretString,
    /// REST API base URL
    pub api_base: Url,
    /// Payee set on every order, if configured
    pub payee_email: Option<Email>,
}

impl std::fmt::Debug for PayPalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayPalConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("api_base", &self.api_base.as_str())
            .field("payee_email", &self.payee_email)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        let trust_proxy = parse_env("STOREFRONT_TRUST_PROXY", "false")?;
        let partials =
            PartialsLocation::parse(&get_env_or_default("STOREFRONT_PARTIALS", DEFAULT_PARTIALS_DIR))?;
        let catalog_path = get_optional_env("STOREFRONT_CATALOG_PATH").map(PathBuf::from);

        let paypal = PayPalConfig::from_env()?;

        Ok(Self {
            host,
            port,
            base_url,
            trust_proxy,
            partials,
            catalog_path,
            paypal,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the public URL is served over HTTPS (secure cookies).
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl PayPalConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_base = get_env_or_default("PAYPAL_API_BASE", PAYPAL_SANDBOX_API);
        let api_base = Url::parse(&api_base)
            .map_err(|e| ConfigError::InvalidEnvVar("PAYPAL_API_BASE".to_string(), e.to_string()))?;

        let payee_email = get_optional_env("PAYPAL_PAYEE_EMAIL")
            .map(|value| Email::parse(&value))
            .transpose()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("PAYPAL_PAYEE_EMAIL".to_string(), e.to_string())
            })?;

        Ok(Self {
            client_id: get_required_env("PAYPAL_CLIENT_ID")?,
            client_secret: get_validated_secret("PAYPAL_CLIENT_SECRET")?,
            api_base,
            payee_email,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the secret issued by PayPal."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn paypal() -> PayPalConfig {
        PayPalConfig {
            client_id: "client_id_value".to_string(),
            client_secret: SecretString::from("EL9x-k2Qv7Zr4mTq8WbNc3"),
            api_base: Url::parse(PAYPAL_SANDBOX_API).unwrap(),
            payee_email: Some(Email::parse("payments@lowellfarms.com").unwrap()),
        }
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-paypal-secret", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_partials_location_directory() {
        let location = PartialsLocation::parse("crates/storefront/partials").unwrap();
        assert_eq!(
            location,
            PartialsLocation::Directory(PathBuf::from("crates/storefront/partials"))
        );
    }

    #[test]
    fn test_partials_location_remote() {
        let location = PartialsLocation::parse("https://cdn.lowellfarms.com/partials/").unwrap();
        assert!(matches!(location, PartialsLocation::Remote(url) if url.host_str() == Some("cdn.lowellfarms.com")));
        assert!(PartialsLocation::parse("http://").is_err());
    }

    #[test]
    fn test_socket_addr_and_https() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "https://lowellfarms.com".to_string(),
            trust_proxy: false,
            partials: PartialsLocation::Directory(PathBuf::from(DEFAULT_PARTIALS_DIR)),
            catalog_path: None,
            paypal: paypal(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert!(config.is_https());
    }

    #[test]
    fn test_paypal_config_debug_redacts_secret() {
        let debug_output = format!("{:?}", paypal());

        assert!(debug_output.contains("client_id_value"));
        assert!(debug_output.contains("payments@lowellfarms.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("EL9x-k2Qv7Zr4mTq8WbNc3"));
    }
}
