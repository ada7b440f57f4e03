//! Market-data sub-client — public endpoints, no credentials required.
//!
//! These are mechanical parameter-to-query mappings over the shared
//! build/send primitive; responses pass through as decoded JSON.

use reqwest::Method;
use serde_json::Value;

use crate::client::FuturesClient;
use crate::error::SdkError;
use crate::http::{AuthMode, RetryPolicy};
use crate::shared::Params;

/// Sub-client for public market-data operations.
pub struct Market<'a> {
    pub(crate) client: &'a FuturesClient,
}

impl<'a> Market<'a> {
    /// Connectivity check.
    pub async fn ping(&self) -> Result<Value, SdkError> {
        self.get("/fapi/v1/ping", Params::new()).await
    }

    /// Server clock, for diagnosing `recvWindow` rejections.
    pub async fn server_time(&self) -> Result<Value, SdkError> {
        self.get("/fapi/v1/time", Params::new()).await
    }

    /// Exchange trading rules and symbol filters.
    pub async fn exchange_info(&self) -> Result<Value, SdkError> {
        self.get("/fapi/v1/exchangeInfo", Params::new()).await
    }

    /// Order book depth.
    pub async fn depth(&self, symbol: &str, limit: Option<u32>) -> Result<Value, SdkError> {
        let mut params = Params::new();
        params.insert("symbol", symbol).insert_opt("limit", limit);
        self.get("/fapi/v1/depth", params).await
    }

    /// Kline/candlestick bars.
    pub async fn klines(
        &self,
        symbol: &str,
        interval: &str,
        start_time: Option<i64>,
        end_time: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Value, SdkError> {
        let mut params = Params::new();
        params
            .insert("symbol", symbol)
            .insert("interval", interval)
            .insert_opt("startTime", start_time)
            .insert_opt("endTime", end_time)
            .insert_opt("limit", limit);
        self.get("/fapi/v1/klines", params).await
    }

    /// Mark price and funding rate.
    pub async fn premium_index(&self, symbol: Option<&str>) -> Result<Value, SdkError> {
        let mut params = Params::new();
        params.insert_opt("symbol", symbol);
        self.get("/fapi/v1/premiumIndex", params).await
    }

    /// 24-hour rolling window price change statistics.
    pub async fn ticker_24h(&self, symbol: Option<&str>) -> Result<Value, SdkError> {
        let mut params = Params::new();
        params.insert_opt("symbol", symbol);
        self.get("/fapi/v1/ticker/24hr", params).await
    }

    /// Best bid/ask on the book.
    pub async fn book_ticker(&self, symbol: Option<&str>) -> Result<Value, SdkError> {
        let mut params = Params::new();
        params.insert_opt("symbol", symbol);
        self.get("/fapi/v1/ticker/bookTicker", params).await
    }

    async fn get(&self, path: &str, params: Params) -> Result<Value, SdkError> {
        self.client
            .http
            .send(Method::GET, path, params, AuthMode::Public, RetryPolicy::Standard)
            .await
    }
}
