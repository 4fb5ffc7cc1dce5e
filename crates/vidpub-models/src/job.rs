//! Publish job record and its status state machine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a publish job.
///
/// The only transitions this pipeline performs are
/// `awaiting_approval → uploading`, `uploading → uploaded` and
/// `uploading → failed`. `rejected` is written by the human approval flow
/// and is only ever read here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStatus {
    /// Waiting for creator approval (written upstream)
    AwaitingApproval,
    /// A publish attempt is in flight
    Uploading,
    /// The platform accepted the upload
    Uploaded,
    /// The creator rejected the video (written upstream)
    Rejected,
    /// A publish attempt failed
    Failed,
}

impl PublishStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStatus::AwaitingApproval => "awaiting_approval",
            PublishStatus::Uploading => "uploading",
            PublishStatus::Uploaded => "uploaded",
            PublishStatus::Rejected => "rejected",
            PublishStatus::Failed => "failed",
        }
    }

    /// Parse a stored status value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "awaiting_approval" => Some(PublishStatus::AwaitingApproval),
            "uploading" => Some(PublishStatus::Uploading),
            "uploaded" => Some(PublishStatus::Uploaded),
            "rejected" => Some(PublishStatus::Rejected),
            "failed" => Some(PublishStatus::Failed),
            _ => None,
        }
    }

    /// Check if this is a terminal state (no further transition permitted).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PublishStatus::Uploaded | PublishStatus::Rejected | PublishStatus::Failed
        )
    }

    /// Whether this pipeline may move a job from `self` to `next`.
    pub fn can_transition_to(&self, next: PublishStatus) -> bool {
        match (self, next) {
            (PublishStatus::AwaitingApproval, PublishStatus::Uploading) => true,
            (PublishStatus::Uploading, PublishStatus::Uploaded) => true,
            (PublishStatus::Uploading, PublishStatus::Failed) => true,
            _ => false,
        }
    }
}

impl fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A publish job record, as stored in the durable store.
///
/// The pipeline holds a transient in-memory copy for the duration of one
/// invocation; the store is the owner. Writes back are always targeted
/// field updates, so fields not listed in an update survive unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishJob {
    /// Video title presented to the platform
    pub title: String,
    /// Video description presented to the platform
    pub description: String,
    /// Content owner (platform user id)
    pub owner_id: String,
    /// Storage key of the thumbnail, if one was rendered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_key: Option<String>,
    /// Current lifecycle status
    pub status: PublishStatus,
    /// When the platform accepted the upload (ms epoch, success only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at_ms: Option<i64>,
    /// Platform-assigned video id (success only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_video_id: Option<String>,
}
