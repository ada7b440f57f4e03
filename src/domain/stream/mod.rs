//! User-stream domain — listenKey lifecycle.

pub mod client;

pub use client::Stream;
