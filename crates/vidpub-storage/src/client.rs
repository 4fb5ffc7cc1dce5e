//! S3 asset store implementation.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::debug;

use crate::error::{StorageError, StorageResult};

/// Content type presented to the platform when the object metadata does not
/// declare a usable one. The uploads bucket holds video assets only.
const FALLBACK_CONTENT_TYPE: &str = "video/*";

/// Configuration for the asset store.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Uploads bucket name
    pub bucket_name: String,
    /// AWS region of the bucket
    pub region: String,
}

/// An open, forward-only read of one asset.
///
/// `body` yields bytes incrementally as the consumer pulls them; the whole
/// asset is never materialized in memory.
#[derive(Debug)]
pub struct AssetStream {
    /// Streaming object body
    pub body: ByteStream,
    /// Declared object size in bytes
    pub content_length: u64,
    /// Declared media content type
    pub content_type: String,
}

/// Blob storage client for approved video assets.
#[derive(Clone)]
pub struct AssetStore {
    client: Client,
    bucket: String,
}

impl AssetStore {
    /// Create a new asset store from configuration.
    pub async fn new(config: StorageConfig) -> StorageResult<Self> {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region))
            .load()
            .await;

        Ok(Self {
            client: Client::new(&sdk_config),
            bucket: config.bucket_name,
        })
    }

    /// Open a single-pass byte stream for an object.
    pub async fn open(&self, key: &str) -> StorageResult<AssetStream> {
        debug!("Opening s3://{}/{}", self.bucket, key);

        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.to_string().contains("NoSuchKey") {
                    StorageError::not_found(key)
                } else {
                    StorageError::download_failed(e.to_string())
                }
            })?;

        let content_length = response.content_length().unwrap_or(0) as u64;
        let content_type = declared_content_type(response.content_type());

        debug!(
            "Opened {} ({} bytes, {})",
            key, content_length, content_type
        );

        Ok(AssetStream {
            body: response.body,
            content_length,
            content_type,
        })
    }
}

/// Pick the content type to declare on the upload call.
///
/// S3 reports `application/octet-stream` (or `binary/octet-stream`) for
/// objects stored without an explicit type; those carry no information and
/// are replaced by the video fallback.
fn declared_content_type(declared: Option<&str>) -> String {
    match declared {
        Some(ct)
            if !ct.is_empty()
                && ct != "application/octet-stream"
                && ct != "binary/octet-stream" =>
        {
            ct.to_string()
        }
        _ => FALLBACK_CONTENT_TYPE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_type_is_kept() {
        assert_eq!(declared_content_type(Some("video/mp4")), "video/mp4");
    }

    #[test]
    fn test_octet_stream_falls_back() {
        assert_eq!(
            declared_content_type(Some("application/octet-stream")),
            "video/*"
        );
        assert_eq!(
            declared_content_type(Some("binary/octet-stream")),
            "video/*"
        );
    }

    #[test]
    fn test_missing_type_falls_back() {
        assert_eq!(declared_content_type(None), "video/*");
        assert_eq!(declared_content_type(Some("")), "video/*");
    }
}
