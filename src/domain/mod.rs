//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — request/response types for the slice
//! - `client.rs` — sub-client with HTTP methods
//!
//! The order slice additionally carries `router.rs`, the pure routing logic
//! behind the regular/algo endpoint split.

pub mod account;
pub mod market;
pub mod order;
pub mod stream;
