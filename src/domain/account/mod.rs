//! Account domain — balances, positions, margin settings.

pub mod client;

pub use client::Account;
