//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so configuration problems bubble up unchanged.

use thiserror::Error;

use crate::AnchorId;

/// The top-level error type for `sd-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("anchor {0} not found")]
    AnchorNotFound(AnchorId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `sd-core`.
pub type CoreResult<T> = Result<T, CoreError>;
