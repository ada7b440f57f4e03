//! Network URL constants for the Binance USDⓈ-M Futures API.

/// Production REST API base URL.
pub const MAINNET_URL: &str = "https://fapi.binance.com";

/// Demo trading (testnet) REST API base URL.
pub const TESTNET_URL: &str = "https://demo-fapi.binance.com";
