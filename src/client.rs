//! High-level client — `FuturesClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the immutable client context, and the
//! accessor methods. There are no ambient globals: every component receives
//! its transport, credentials, and configuration through this context.

use std::time::Duration;

use crate::auth::Credentials;
use crate::domain::account::client::Account;
use crate::domain::market::client::Market;
use crate::domain::order::client::Orders;
use crate::domain::stream::client::Stream;
use crate::error::SdkError;
use crate::http::{FuturesHttp, RetryConfig};
use crate::network;

// Re-export sub-client types for convenience.
pub use crate::domain::account::client::Account as AccountClient;
pub use crate::domain::market::client::Market as MarketClient;
pub use crate::domain::order::client::Orders as OrdersClient;
pub use crate::domain::stream::client::Stream as StreamClient;

/// The primary entry point for the Binance USDⓈ-M Futures SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.orders()`, `client.market()`, etc. All configuration is fixed at
/// construction; the client is cheap to clone and safe to share across tasks.
pub struct FuturesClient {
    pub(crate) http: FuturesHttp,
    /// Route conditional order types to the algo endpoint, and retry a
    /// migration-rejected regular submission through it once.
    pub(crate) auto_route_conditional: bool,
    /// Split mixed batches into one regular batch call plus individual
    /// conditional submissions. When disabled, mixed batches fail fast.
    pub(crate) auto_split_batches: bool,
}

impl FuturesClient {
    pub fn builder() -> FuturesClientBuilder {
        FuturesClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn market(&self) -> Market<'_> {
        Market { client: self }
    }

    pub fn account(&self) -> Account<'_> {
        Account { client: self }
    }

    pub fn stream(&self) -> Stream<'_> {
        Stream { client: self }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

impl Clone for FuturesClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            auto_route_conditional: self.auto_route_conditional,
            auto_split_batches: self.auto_split_batches,
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct FuturesClientBuilder {
    base_url: String,
    credentials: Credentials,
    recv_window: u64,
    timeout: Duration,
    retry: RetryConfig,
    auto_route_conditional: bool,
    auto_split_batches: bool,
}

impl Default for FuturesClientBuilder {
    fn default() -> Self {
        Self {
            base_url: network::MAINNET_URL.to_string(),
            credentials: Credentials::anonymous(),
            recv_window: 5000,
            timeout: Duration::from_secs(10),
            retry: RetryConfig::default(),
            auto_route_conditional: true,
            auto_split_batches: true,
        }
    }
}

impl FuturesClientBuilder {
    /// API key and secret for signed endpoints.
    pub fn credentials(mut self, api_key: &str, api_secret: &str) -> Self {
        self.credentials = Credentials::new(api_key, api_secret);
        self
    }

    /// Target the demo trading environment instead of production.
    pub fn testnet(mut self, testnet: bool) -> Self {
        self.base_url = if testnet {
            network::TESTNET_URL.to_string()
        } else {
            network::MAINNET_URL.to_string()
        };
        self
    }

    /// Override the base URL entirely (takes precedence over `testnet`).
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Clock-skew tolerance in milliseconds for signed requests.
    pub fn recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = recv_window;
        self
    }

    /// Per-request transport timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Client-wide retry configuration.
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Disable automatic conditional-order routing; every submission then
    /// targets the regular endpoint and migration rejections propagate.
    pub fn auto_route_conditional(mut self, enabled: bool) -> Self {
        self.auto_route_conditional = enabled;
        self
    }

    /// Disable automatic batch splitting; mixed batches then fail fast.
    pub fn auto_split_batches(mut self, enabled: bool) -> Self {
        self.auto_split_batches = enabled;
        self
    }

    pub fn build(self) -> Result<FuturesClient, SdkError> {
        Ok(FuturesClient {
            http: FuturesHttp::new(
                &self.base_url,
                self.credentials,
                self.recv_window,
                self.timeout,
                self.retry,
            )?,
            auto_route_conditional: self.auto_route_conditional,
            auto_split_batches: self.auto_split_batches,
        })
    }
}
