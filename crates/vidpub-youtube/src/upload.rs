//! Resumable upload transport.
//!
//! The upload happens in two round-trips: an initiation POST carrying the
//! video metadata, whose `Location` response header names a session URI,
//! then a PUT streaming the raw bytes to that URI. The streamed body keeps
//! memory bounded regardless of asset size.

use std::time::Duration;

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::error::{YoutubeError, YoutubeResult};

/// YouTube Data API v3 videos upload endpoint.
pub const YOUTUBE_UPLOAD_URL: &str = "https://www.googleapis.com/upload/youtube/v3/videos";

/// Every upload lands private. Promotion to a wider visibility is a human
/// approval step elsewhere; this worker has no code path to publish publicly.
const PRIVACY_STATUS: &str = "private";

/// Configuration for the upload transport.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Upload endpoint URL
    pub upload_url: String,
    /// Whole-call deadline for each of the two round-trips
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

/// Metadata presented to the platform alongside the bytes.
#[derive(Debug, Clone)]
pub struct UploadMetadata<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

/// The byte source for one upload attempt: a forward-only stream plus the
/// declared length/type the resumable protocol requires up front.
pub struct UploadSource {
    pub content_type: String,
    pub content_length: u64,
    pub body: reqwest::Body,
}

#[derive(Debug, Deserialize)]
struct VideoResource {
    id: String,
}

/// Client for the platform's resumable upload mechanism.
pub struct VideoPublisher {
    http: Client,
    config: UploadConfig,
}

impl VideoPublisher {
    /// Create a new upload client.
    pub fn new(config: UploadConfig) -> YoutubeResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("vidpub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| YoutubeError::transport(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Upload one video; returns the platform-assigned video id.
    pub async fn upload(
        &self,
        access_token: &str,
        metadata: &UploadMetadata<'_>,
        source: UploadSource,
    ) -> YoutubeResult<String> {
        let session_uri = self.initiate(access_token, metadata, &source).await?;
        self.transfer(&session_uri, source).await
    }

    /// Step 1: open the upload session. The metadata travels here; the
    /// session URI in the `Location` header is valid for the transfer.
    async fn initiate(
        &self,
        access_token: &str,
        metadata: &UploadMetadata<'_>,
        source: &UploadSource,
    ) -> YoutubeResult<String> {
        let url = format!(
            "{}?uploadType=resumable&part=snippet,status",
            self.config.upload_url
        );

        let body = json!({
            "snippet": {
                "title": metadata.title,
                "description": metadata.description,
            },
            "status": {
                "privacyStatus": PRIVACY_STATUS,
            },
        });

        debug!(
            "Initiating resumable upload ({} bytes, {})",
            source.content_length, source.content_type
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .header(CONTENT_TYPE, "application/json; charset=UTF-8")
            .header("X-Upload-Content-Type", &source.content_type)
            .header("X-Upload-Content-Length", source.content_length)
            .json(&body)
            .send()
            .await
            .map_err(|e| YoutubeError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_upload_failure(status, body));
        }

        let session_uri = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                YoutubeError::invalid_response("upload initiation returned no session URI")
            })?;

        debug!("Upload session opened");
        Ok(session_uri)
    }

    /// Step 2: stream the bytes to the session URI.
    async fn transfer(&self, session_uri: &str, source: UploadSource) -> YoutubeResult<String> {
        let response = self
            .http
            .put(session_uri)
            .header(CONTENT_TYPE, &source.content_type)
            .header(CONTENT_LENGTH, source.content_length)
            .body(source.body)
            .send()
            .await
            .map_err(|e| YoutubeError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_upload_failure(status, body));
        }

        let resource: VideoResource = response.json().await.map_err(|e| {
            YoutubeError::invalid_response(format!("unparseable upload response: {e}"))
        })?;

        info!("Platform accepted upload, video id {}", resource.id);
        Ok(resource.id)
    }
}

/// Classify a non-success upload response.
///
/// 401 (credential went bad mid-flight) and server errors leave delivery
/// unknown: transport. Any other client error is the platform refusing the
/// request (quota, malformed metadata, policy).
fn classify_upload_failure(status: StatusCode, body: String) -> YoutubeError {
    if status == StatusCode::UNAUTHORIZED || status.is_server_error() {
        YoutubeError::transport(format!("platform returned {status}: {body}"))
    } else {
        YoutubeError::Rejected {
            status: status.as_u16(),
            message: body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_rejection_is_rejected() {
        let err = classify_upload_failure(
            StatusCode::FORBIDDEN,
            "quotaExceeded".to_string(),
        );
        assert!(err.is_rejection());
    }

    #[test]
    fn test_bad_metadata_is_rejected() {
        let err = classify_upload_failure(StatusCode::BAD_REQUEST, "invalidTitle".to_string());
        assert!(matches!(err, YoutubeError::Rejected { status: 400, .. }));
    }

    #[test]
    fn test_auth_failure_mid_upload_is_transport() {
        let err = classify_upload_failure(StatusCode::UNAUTHORIZED, String::new());
        assert!(matches!(err, YoutubeError::Transport(_)));
    }

    #[test]
    fn test_server_error_is_transport() {
        let err = classify_upload_failure(StatusCode::BAD_GATEWAY, String::new());
        assert!(matches!(err, YoutubeError::Transport(_)));
    }
}
