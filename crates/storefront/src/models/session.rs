//! Session-related types.
//!
//! The only thing the storefront keeps per visitor is the age-verification
//! flag. The session cookie has no max-age, so the flag lasts until the
//! browser session ends.

/// Session keys.
pub mod keys {
    /// Set to `true` once the visitor passes the age gate.
    pub const AGE_VERIFIED: &str = "ageVerified";
}
