//! YouTube platform clients for the publish pipeline.
//!
//! This crate provides:
//! - The OAuth2 refresh-token grant client
//! - The resumable upload transport
//!
//! Both are plain HTTP clients; credential lifecycle decisions and job
//! orchestration live in `vidpub-publisher`.

pub mod error;
pub mod oauth;
pub mod upload;

pub use error::{YoutubeError, YoutubeResult};
pub use oauth::{OauthClient, OauthConfig, TokenGrant, GOOGLE_TOKEN_URL};
pub use upload::{UploadConfig, UploadMetadata, UploadSource, VideoPublisher, YOUTUBE_UPLOAD_URL};
