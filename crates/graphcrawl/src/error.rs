//! Error types for exploration sessions.

use graphcrawl_device::DeviceError;
use graphcrawl_store::StoreError;
use thiserror::Error;

/// Errors that end an exploration session.
///
/// Divergence and unreachable targets are not errors; they are absorbed by
/// the explorer and show up in the [`SessionReport`](crate::SessionReport).
#[derive(Debug, Error)]
pub enum ExploreError {
    /// The device failed. Fatal; nothing is retried.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// The graph store failed. Fatal.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// The explorer was configured with unusable settings.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for exploration.
pub type Result<T> = std::result::Result<T, ExploreError>;
