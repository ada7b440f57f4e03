//! Low-level HTTP client — `FuturesHttp`.
//!
//! The single build → sign → send → classify primitive every endpoint goes
//! through. Sub-clients (Layer 3) only choose method, path, parameters, and
//! auth mode. Signing happens per attempt so a retried request never reuses a
//! stale timestamp or signature.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;

use crate::auth::{sign_params, Credentials};
use crate::error::{classify_response, HttpError, SdkError};
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::shared::Params;

/// How a request authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// No credentials attached.
    Public,
    /// `X-MBX-APIKEY` header only (user-stream endpoints).
    ApiKey,
    /// `X-MBX-APIKEY` header plus HMAC signature over the parameters.
    Signed,
}

/// Low-level HTTP client for the Binance USDⓈ-M Futures REST API.
pub struct FuturesHttp {
    base_url: String,
    client: Client,
    credentials: Credentials,
    recv_window: u64,
    retry: RetryConfig,
}

impl FuturesHttp {
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        recv_window: u64,
        timeout: Duration,
        retry: RetryConfig,
    ) -> Result<Self, SdkError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(HttpError::Reqwest)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            credentials,
            recv_window,
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Execute one API call: validate credentials, then attempt the request
    /// under the resolved retry policy.
    ///
    /// Credential failures surface before any network activity. Transport
    /// failures and retryable statuses are retried with exponential backoff;
    /// anything else is classified and returned immediately. Exhausting the
    /// retry budget surfaces the last observed failure.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        params: Params,
        auth: AuthMode,
        retry: RetryPolicy,
    ) -> Result<Value, SdkError> {
        match auth {
            AuthMode::Public => {}
            AuthMode::ApiKey => {
                self.credentials.require_api_key()?;
            }
            AuthMode::Signed => {
                self.credentials.require_api_key()?;
                self.credentials.require_api_secret()?;
            }
        }

        let config = match retry {
            RetryPolicy::None => {
                return self.attempt(&method, path, &params, auth).await;
            }
            RetryPolicy::Standard => self.retry.clone(),
            RetryPolicy::Custom(c) => c,
        };

        let max_retries = if config.retry_all_methods || method == Method::GET {
            config.max_retries
        } else {
            0
        };

        for attempt in 0..=max_retries {
            match self.attempt(&method, path, &params, auth).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    let retryable = match &e {
                        SdkError::Api(api) => {
                            config.retryable_statuses.contains(&api.status())
                        }
                        SdkError::Http(HttpError::Reqwest(re)) => {
                            re.is_connect() || re.is_timeout() || re.is_request()
                        }
                        _ => false,
                    };

                    if retryable && attempt < max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying {} {}",
                            method,
                            path
                        );
                        futures_timer::Delay::new(delay).await;
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        // The loop always returns on the final attempt.
        Err(SdkError::Http(HttpError::RetriesExhausted {
            attempts: max_retries + 1,
        }))
    }

    /// One transport attempt. Signed parameters are regenerated here so every
    /// attempt carries a fresh timestamp and matching signature.
    async fn attempt(
        &self,
        method: &Method,
        path: &str,
        params: &Params,
        auth: AuthMode,
    ) -> Result<Value, SdkError> {
        let query = match auth {
            AuthMode::Signed => {
                let timestamp = chrono::Utc::now().timestamp_millis();
                sign_params(&self.credentials, params, self.recv_window, timestamp)?
                    .query()
                    .to_string()
            }
            _ => params.to_query(),
        };

        // GET carries parameters in the query string; every other verb sends
        // the same encoding as a form body.
        let url = if *method == Method::GET && !query.is_empty() {
            format!("{}{}?{}", self.base_url, path, query)
        } else {
            format!("{}{}", self.base_url, path)
        };

        let mut req = self.client.request(method.clone(), &url);

        if matches!(auth, AuthMode::ApiKey | AuthMode::Signed) {
            req = req.header("X-MBX-APIKEY", self.credentials.require_api_key()?);
        }

        if *method != Method::GET && !query.is_empty() {
            req = req
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(query);
        }

        let resp = req.send().await.map_err(HttpError::Reqwest)?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<Value>().await.map_err(HttpError::Reqwest)?);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(SdkError::Api(classify_response(status.as_u16(), &body)))
    }
}

impl Clone for FuturesHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            credentials: self.credentials.clone(),
            recv_window: self.recv_window,
            retry: self.retry.clone(),
        }
    }
}
