//! Domain errors for the serpsmith optimization system.

use thiserror::Error;

use crate::domain::ports::oracle::OracleError;

/// Domain-level errors.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("oracle call failed: {0}")]
    Oracle(#[from] OracleError),

    #[error("malformed oracle output: {0}")]
    MalformedOutput(String),

    #[error("fact base unavailable at {path}: {reason}")]
    FactBaseUnavailable { path: String, reason: String },

    #[error("handoff failed: {0}")]
    HandoffFailed(String),

    #[error("target position {position} out of bounds for {len} candidates")]
    TargetOutOfBounds { position: usize, len: usize },
}

pub type DomainResult<T> = Result<T, DomainError>;
