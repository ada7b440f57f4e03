//! User-stream sub-client — listenKey lifecycle.
//!
//! These endpoints authenticate with the API key header only; no signature.

use reqwest::Method;
use serde_json::Value;

use crate::client::FuturesClient;
use crate::error::SdkError;
use crate::http::{AuthMode, RetryPolicy};
use crate::shared::Params;

const LISTEN_KEY_PATH: &str = "/fapi/v1/listenKey";

/// Sub-client for user data stream keys.
pub struct Stream<'a> {
    pub(crate) client: &'a FuturesClient,
}

impl<'a> Stream<'a> {
    /// Create a listenKey, starting a user data stream.
    pub async fn create_listen_key(&self) -> Result<Value, SdkError> {
        self.send(Method::POST, Params::new()).await
    }

    /// Extend a listenKey's validity.
    pub async fn keepalive_listen_key(&self, listen_key: &str) -> Result<Value, SdkError> {
        let mut params = Params::new();
        params.insert("listenKey", listen_key);
        self.send(Method::PUT, params).await
    }

    /// Close a listenKey, ending its stream.
    pub async fn close_listen_key(&self, listen_key: &str) -> Result<Value, SdkError> {
        let mut params = Params::new();
        params.insert("listenKey", listen_key);
        self.send(Method::DELETE, params).await
    }

    async fn send(&self, method: Method, params: Params) -> Result<Value, SdkError> {
        self.client
            .http
            .send(
                method,
                LISTEN_KEY_PATH,
                params,
                AuthMode::ApiKey,
                RetryPolicy::Standard,
            )
            .await
    }
}
