//! Shared utilities used across all domain modules.

pub mod params;

pub use params::Params;
