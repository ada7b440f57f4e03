//! Retry policies for HTTP requests.

use std::time::Duration;

/// Retry policy for an HTTP request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// No retries.
    None,
    /// The client-wide [`RetryConfig`]. Applies to every verb — Binance's
    /// transport errors are retried uniformly, order creation included.
    #[default]
    Standard,
    /// Per-request override.
    Custom(RetryConfig),
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
    /// Retry every verb, including non-idempotent POSTs.
    ///
    /// This mirrors the upstream default and carries a known risk: retrying an
    /// order creation after a timeout can duplicate the order if the first
    /// attempt actually succeeded server-side. Callers that need idempotency
    /// must supply `newClientOrderId`.
    pub retry_all_methods: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(300),
            backoff_factor: 2.0,
            retryable_statuses: vec![429, 500, 502, 503, 504],
            retry_all_methods: true,
        }
    }
}

impl RetryConfig {
    /// Delay for a given attempt (0-indexed): `base_delay * factor^attempt`.
    /// Bounded only by the attempt count.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let ms = self.base_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        Duration::from_millis(ms as u64)
    }
}
