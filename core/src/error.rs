//! Error types for the fallible edges of the crate.
//!
//! # Design
//! `RequestGateway::dispatch` never fails, so these errors cover only the code
//! around it: reading configuration, and checking a profile before it is
//! sent.

use thiserror::Error;

/// Invalid configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { key: &'static str, value: String },
}

/// A profile is missing fields the form marks as required.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    /// Human-readable labels, in form order.
    pub missing: Vec<&'static str>,
}
