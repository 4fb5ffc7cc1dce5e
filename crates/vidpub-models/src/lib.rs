//! Shared data models for the vidpub publish pipeline.
//!
//! This crate provides:
//! - Composite record identities (`ChannelKey`, `JobKey`)
//! - The delegated OAuth credential record
//! - The publish job record and its status state machine
//! - The asset-locator to object-key mapping

pub mod asset;
pub mod credential;
pub mod job;
pub mod key;

pub use asset::{asset_object_key, VIDEO_KEY_PREFIX};
pub use credential::Credential;
pub use job::{PublishJob, PublishStatus};
pub use key::{ChannelKey, JobKey};
