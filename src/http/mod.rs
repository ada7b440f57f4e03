//! HTTP transport layer — `FuturesHttp` with per-request retry policies.

pub mod client;
pub mod retry;

pub use client::{AuthMode, FuturesHttp};
pub use retry::{RetryConfig, RetryPolicy};
