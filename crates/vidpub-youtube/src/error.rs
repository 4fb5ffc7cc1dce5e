//! Platform client error types.

use thiserror::Error;

/// Result type for platform operations.
pub type YoutubeResult<T> = Result<T, YoutubeError>;

/// Errors from the OAuth and upload clients.
///
/// `Rejected` and `Transport` are deliberately distinct: a rejection means
/// the platform answered and refused (bytes likely delivered), a transport
/// failure means delivery is unknown or incomplete.
#[derive(Debug, Error)]
pub enum YoutubeError {
    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    #[error("Upload rejected by platform ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Upload transport failed: {0}")]
    Transport(String),

    #[error("Invalid response from platform: {0}")]
    InvalidResponse(String),
}

impl YoutubeError {
    pub fn refresh_failed(msg: impl Into<String>) -> Self {
        Self::RefreshFailed(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// True when the platform answered and explicitly refused the upload.
    pub fn is_rejection(&self) -> bool {
        matches!(self, YoutubeError::Rejected { .. })
    }
}
