//! Spatial-subsystem error types.

use thiserror::Error;

use dp_core::{CoreError, Coordinate};

/// Errors produced while building or loading a road graph.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("map parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;

/// Why a routing query failed.  A successful query is simply `Ok(Route)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// An endpoint or an expanded node has no adjacency entry, or the parent
    /// chain broke during reconstruction.  Indicates a malformed graph or an
    /// off-graph query.
    #[error("bad coordinate {coord}: {reason}")]
    BadCoord { coord: Coordinate, reason: &'static str },

    /// The search exhausted every reachable node without finding the goal.
    #[error("no route from {from} to {to}")]
    NoRoute { from: Coordinate, to: Coordinate },
}

impl RouteError {
    /// Status code as reported to delivery-plan consumers.
    pub fn code(&self) -> &'static str {
        match self {
            RouteError::BadCoord { .. } => "BAD_COORD",
            RouteError::NoRoute { .. } => "NO_ROUTE",
        }
    }
}

pub type RouteResult<T> = Result<T, RouteError>;
