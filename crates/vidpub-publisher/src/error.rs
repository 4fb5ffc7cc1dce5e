//! Top-level publish error.

use thiserror::Error;

use vidpub_storage::StorageError;
use vidpub_youtube::YoutubeError;

/// Result type for the publish pipeline.
pub type PublishResult<T> = Result<T, PublishError>;

/// Every way one invocation can fail.
///
/// All kinds are fatal to the invocation; recoverability belongs to
/// whatever re-dispatches jobs. The orchestrator performs exactly one write
/// after a failure (the best-effort `failed` transition) and the entry
/// point alone turns the kind into an exit code.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Missing required configuration: {0}")]
    ConfigMissing(String),

    #[error("No credential record for channel {0}")]
    CredentialNotFound(String),

    #[error("No job record for {0}")]
    JobNotFound(String),

    #[error("Durable store error: {0}")]
    Store(#[from] vidpub_store::StoreError),

    #[error("Token refresh failed: {0}")]
    TokenRefreshFailed(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Asset unavailable: {0}")]
    AssetUnavailable(String),

    #[error("Upload transport failed: {0}")]
    Transport(String),

    #[error("Upload rejected by platform: {0}")]
    RejectedByPlatform(String),
}

impl PublishError {
    /// Stable kind name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            PublishError::ConfigMissing(_) => "config_missing",
            PublishError::CredentialNotFound(_) => "credential_not_found",
            PublishError::JobNotFound(_) => "job_not_found",
            PublishError::Store(_) => "store_error",
            PublishError::TokenRefreshFailed(_) => "token_refresh_failed",
            PublishError::AssetNotFound(_) => "asset_not_found",
            PublishError::AssetUnavailable(_) => "asset_unavailable",
            PublishError::Transport(_) => "transport_error",
            PublishError::RejectedByPlatform(_) => "rejected_by_platform",
        }
    }
}

impl From<StorageError> for PublishError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound(key) => PublishError::AssetNotFound(key),
            StorageError::ConfigError(msg) => PublishError::ConfigMissing(msg),
            StorageError::DownloadFailed(msg) => PublishError::AssetUnavailable(msg),
        }
    }
}

impl From<YoutubeError> for PublishError {
    fn from(e: YoutubeError) -> Self {
        match e {
            YoutubeError::RefreshFailed(msg) => PublishError::TokenRefreshFailed(msg),
            YoutubeError::Rejected { status, message } => {
                PublishError::RejectedByPlatform(format!("{status}: {message}"))
            }
            YoutubeError::Transport(msg) => PublishError::Transport(msg),
            YoutubeError::InvalidResponse(msg) => PublishError::Transport(msg),
        }
    }
}
