//! Error types for device drivers.

use graphcrawl_core::{Action, CoreError};
use thiserror::Error;

/// Errors a device driver can report.
///
/// These are infrastructure failures. The crawler does not retry them; an
/// app that merely lands somewhere unexpected is not an error.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The device or automation bridge went away.
    #[error("device disconnected: {0}")]
    Disconnected(String),

    /// An input gesture could not be delivered.
    #[error("action {action} failed: {reason}")]
    ActionFailed { action: Action, reason: String },

    /// The UI never became stable.
    #[error("timed out waiting for the UI to settle: {0}")]
    SettleTimeout(String),

    /// The app could not be (re)launched.
    #[error("app restart failed: {0}")]
    RestartFailed(String),

    /// A simulated app model is malformed.
    #[error("invalid app model: {0}")]
    InvalidModel(String),

    /// A fingerprint or action in driver input was malformed.
    #[error("invalid driver data: {0}")]
    Core(#[from] CoreError),

    /// JSON model decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for device operations.
pub type Result<T> = std::result::Result<T, DeviceError>;
