//! Error types for graphcrawl core primitives.

use thiserror::Error;

/// Errors raised while parsing or constructing core values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown action name: {0}")]
    UnknownActionName(String),

    #[error("unknown action code: {0}")]
    UnknownActionCode(u8),

    #[error("invalid state fingerprint: {0}")]
    InvalidStateId(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
