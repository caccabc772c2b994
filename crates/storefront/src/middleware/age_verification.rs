//! Age verification extractors.
//!
//! The verified flag lives in the session under
//! [`session_keys::AGE_VERIFIED`](crate::models::session_keys::AGE_VERIFIED).

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::models::session_keys;

/// Extractor for the visitor's stored verification flag.
///
/// Never rejects; a missing session or flag reads as unverified.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(AgeVerified(verified): AgeVerified) -> impl IntoResponse {
///     if verified { "Welcome back" } else { "Please verify your age" }
/// }
/// ```
pub struct AgeVerified(pub bool);

impl<S> FromRequestParts<S> for AgeVerified
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let verified = match parts.extensions.get::<Session>() {
            Some(session) => is_age_verified(session).await,
            None => false,
        };
        Ok(Self(verified))
    }
}

/// Extractor that rejects visitors who have not passed the age gate.
pub struct RequireAgeVerified;

/// Rejection for [`RequireAgeVerified`].
pub struct AgeVerificationRequired;

impl IntoResponse for AgeVerificationRequired {
    fn into_response(self) -> Response {
        (StatusCode::FORBIDDEN, "Age verification required").into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAgeVerified
where
    S: Send + Sync,
{
    type Rejection = AgeVerificationRequired;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AgeVerificationRequired)?;

        if is_age_verified(session).await {
            Ok(Self)
        } else {
            Err(AgeVerificationRequired)
        }
    }
}

/// Read the verification flag. Store errors read as unverified.
pub async fn is_age_verified(session: &Session) -> bool {
    session
        .get::<bool>(session_keys::AGE_VERIFIED)
        .await
        .ok()
        .flatten()
        .unwrap_or(false)
}

/// Store the verification flag.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_age_verified(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::AGE_VERIFIED, true).await
}
