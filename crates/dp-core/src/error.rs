//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` where a core
//! operation (coordinate parsing, store configuration) can fail underneath
//! them.

use thiserror::Error;

/// Errors produced by `dp-core`.
///
/// Store lookups never fail: a missing key is an ordinary `None`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `dp-core`.
pub type CoreResult<T> = Result<T, CoreError>;
