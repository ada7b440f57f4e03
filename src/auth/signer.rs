//! HMAC-SHA256 request signing.
//!
//! Binance validates the signature against the exact byte sequence of the
//! encoded query, so signing is a pure function of the ordered parameters,
//! the secret, and the injected timestamp. A [`SignedRequest`] is frozen for
//! one transport attempt; retries re-sign with a fresh timestamp.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::error::SdkError;
use crate::shared::Params;

type HmacSha256 = Hmac<Sha256>;

/// A fully signed parameter set for a single transport attempt.
///
/// Immutable after construction: the trailing `signature` parameter covers
/// every preceding byte of the encoded query, so any later mutation would
/// invalidate it.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    params: Params,
    query: String,
}

impl SignedRequest {
    /// The full encoded query, ending in `signature=<hex>`.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}

/// Sign `params` with the configured secret.
///
/// Injects `timestamp` (caller-supplied epoch milliseconds) and `recvWindow`
/// when the caller did not provide them, encodes the full ordered set, and
/// appends the hex HMAC-SHA256 digest as the final `signature` parameter.
pub fn sign_params(
    credentials: &Credentials,
    params: &Params,
    recv_window: u64,
    timestamp_ms: i64,
) -> Result<SignedRequest, SdkError> {
    let secret = credentials.require_api_secret()?;

    let mut signed = params.clone();
    if !signed.contains_key("timestamp") {
        signed.insert("timestamp", timestamp_ms);
    }
    if !signed.contains_key("recvWindow") {
        signed.insert("recvWindow", recv_window);
    }

    let query = signed.to_query();
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| SdkError::Other(format!("HMAC init failed: {e}")))?;
    mac.update(query.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    signed.insert("signature", &signature);
    let query = format!("{query}&signature={signature}");

    Ok(SignedRequest {
        params: signed,
        query,
    })
}
