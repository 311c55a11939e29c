//! Error type for the matching engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("search was cancelled")]
    Cancelled,

    #[error("search exceeded its deadline")]
    DeadlineExceeded,

    /// Raised when a spelling-corrected cell still produces no documents;
    /// the index and the spelling dictionary it was built from have
    /// diverged, which should never happen for a consistently-built index.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, MatchError>;
