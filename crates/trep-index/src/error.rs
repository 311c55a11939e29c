//! Error type for index build and lookup failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("index is corrupt: {0}")]
    IndexCorrupt(String),

    #[error("document {0} not found in index")]
    DocumentNotFound(u64),

    #[error("build() called before begin_build()")]
    BuildNotStarted,
}

pub type Result<T> = std::result::Result<T, IndexError>;
