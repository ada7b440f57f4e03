//! Market-data domain — public read-only endpoints.

pub mod client;

pub use client::Market;
