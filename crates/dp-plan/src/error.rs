//! Error types for dp-plan.

use thiserror::Error;

use dp_spatial::RouteError;

/// Errors that can occur while reading deliveries, planning, or writing a plan.
#[derive(Debug, Error)]
pub enum PlanError {
    /// A leg could not be routed; the whole plan is abandoned.
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("deliveries parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Alias for `Result<T, PlanError>`.
pub type PlanResult<T> = Result<T, PlanError>;
