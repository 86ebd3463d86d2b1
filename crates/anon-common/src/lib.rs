//! Shared utilities for the anonymiser crates.
//!
//! This crate provides the canonical text form of Polars values, which every
//! mapping key, digest and UUID is derived from, and the switch that decides
//! whether original cell values may appear in logs.

pub mod polars;
pub mod redact;

// Re-export commonly used functions at crate root for convenience
pub use polars::{canonical_string, canonical_values, format_float};
pub use redact::{REDACTED_VALUE, log_data_enabled, redact_value, set_log_data_enabled};
