//! API credentials and request signing.
//!
//! ## Security model
//!
//! - The API key travels in the `X-MBX-APIKEY` header on signed and key-gated
//!   requests.
//! - The API secret is used exclusively as the HMAC key. It is never
//!   transmitted, never logged, and redacted from `Debug` output.

pub mod signer;

pub use signer::{sign_params, SignedRequest};

use crate::error::SdkError;

/// API key + secret for signed endpoints. Both are optional — a client without
/// credentials can still call public endpoints.
#[derive(Clone, Default)]
pub struct Credentials {
    api_key: Option<String>,
    api_secret: Option<String>,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            api_secret: Some(api_secret.into()),
        }
    }

    /// Credentials for public-only usage.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// The API key, or a credential error for key-gated endpoints.
    pub fn require_api_key(&self) -> Result<&str, SdkError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SdkError::Credential("API key is required for this endpoint".into()))
    }

    /// The API secret, or a credential error for signed endpoints.
    pub fn require_api_secret(&self) -> Result<&str, SdkError> {
        self.api_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SdkError::Credential("API secret is required for signed endpoints".into()))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("api_secret", &self.api_secret.as_deref().map(|_| "<redacted>"))
            .finish()
    }
}
