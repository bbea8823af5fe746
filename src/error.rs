//! Error types for the fragility simulation core.
//!
//! Errors propagate unmodified through the estimator, batch runner and
//! convergence analyzer. There is no retry logic anywhere: a failed
//! cascade run is a logic error, not a transient fault.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FragilityError {
    /// Seed or test node is absent from the graph.
    #[error("node '{0}' not found in graph")]
    NodeNotFound(String),

    /// Structurally invalid input: zero sample count, NaN multiplier.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The graph contains no nodes at all.
    #[error("graph contains no nodes")]
    EmptyGraph,
}

pub type Result<T> = std::result::Result<T, FragilityError>;
