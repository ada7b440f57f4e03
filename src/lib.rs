//! # Binance USDⓈ-M Futures SDK
//!
//! A signed-request client for the Binance USDT-margined Futures REST API,
//! built around the order-routing and resiliency layer: conditional orders
//! (stop, take-profit, trailing-stop) are routed to the algo-order service,
//! regular orders to the classic endpoint, with a one-shot fallback when the
//! backend signals that conditional handling has migrated.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared parameter handling, error taxonomy, URL constants
//! 2. **Auth** — Credentials + deterministic HMAC-SHA256 request signing
//! 3. **HTTP** — `FuturesHttp` with per-request retry policies
//! 4. **Domain** — Vertical slices: orders (with routing), market, account, stream
//! 5. **High-Level Client** — `FuturesClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use binance_futures_sdk::prelude::*;
//!
//! let client = FuturesClient::builder()
//!     .credentials("api_key", "api_secret")
//!     .testnet(true)
//!     .build()?;
//!
//! let ack = client
//!     .orders()
//!     .submit(&NewOrderRequest::new("BTCUSDT", Side::Sell, "STOP_MARKET")
//!         .stop_price("50000".parse()?)
//!         .close_position(true))
//!     .await?;
//! assert!(ack.via_algo_api);
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared parameter handling used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, routing, sub-clients.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// Credentials and HMAC-SHA256 request signing.
pub mod auth;

// ── Layer 3: HTTP ────────────────────────────────────────────────────────────

/// HTTP transport with retry policies.
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `FuturesClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared
    pub use crate::shared::Params;

    // Domain types — order
    pub use crate::domain::order::{
        BatchSubmitResult, NewOrderRequest, OrderAck, OrderRef, OrderTypeClass, RouteTarget, Side,
    };

    // Errors
    pub use crate::error::{ApiError, ApiFailure, HttpError, SdkError};

    // Network
    pub use crate::network::{MAINNET_URL, TESTNET_URL};

    // Auth
    pub use crate::auth::Credentials;

    // HTTP client + sub-clients
    pub use crate::client::{
        AccountClient, FuturesClient, FuturesClientBuilder, MarketClient, OrdersClient,
        StreamClient,
    };
    pub use crate::http::{RetryConfig, RetryPolicy};
}
