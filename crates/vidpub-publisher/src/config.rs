//! Publisher configuration.
//!
//! All inputs arrive through the process environment, read once at entry
//! and passed by reference from there on; no other component touches the
//! environment. A missing or empty required variable is fatal before the
//! pipeline runs.

use std::time::Duration;

use vidpub_models::{ChannelKey, JobKey};
use vidpub_store::StoreConfig;
use vidpub_storage::StorageConfig;
use vidpub_youtube::{OauthConfig, UploadConfig, GOOGLE_TOKEN_URL, YOUTUBE_UPLOAD_URL};

use crate::error::{PublishError, PublishResult};

/// Configuration for one publish invocation.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Organization the channel and job belong to
    pub org: String,
    /// Project the job belongs to
    pub project: String,
    /// Video id of the job (also the asset locator)
    pub video: String,
    /// Channel whose delegated credential signs the upload
    pub channel: String,
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Durable store table
    pub table_name: String,
    /// Uploads bucket
    pub bucket_name: String,
    /// AWS region for both store and bucket
    pub region: String,
    /// OAuth token endpoint
    pub token_url: String,
    /// Platform upload endpoint
    pub upload_url: String,
    /// Deadline for store/refresh round-trips
    pub http_timeout: Duration,
    /// Deadline for the upload call (assets may be hours of video)
    pub upload_timeout: Duration,
}

impl PublisherConfig {
    /// Create config from environment variables.
    pub fn from_env() -> PublishResult<Self> {
        Ok(Self {
            org: required("ORG_ID")?,
            project: required("PROJECT_ID")?,
            video: required("VIDEO_ID")?,
            channel: required("CHANNEL_ID")?,
            client_id: required("GOOGLE_CLIENT_ID")?,
            client_secret: required("GOOGLE_CLIENT_SECRET")?,
            table_name: required("TABLE_NAME")?,
            bucket_name: required("UPLOADS_BUCKET_NAME")?,
            region: required("AWS_REGION")?,
            token_url: optional("OAUTH_TOKEN_URL").unwrap_or_else(|| GOOGLE_TOKEN_URL.to_string()),
            upload_url: optional("UPLOAD_ENDPOINT_URL")
                .unwrap_or_else(|| YOUTUBE_UPLOAD_URL.to_string()),
            http_timeout: Duration::from_secs(
                optional("HTTP_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            upload_timeout: Duration::from_secs(
                optional("UPLOAD_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3600),
            ),
        })
    }

    /// Identity of the job this invocation publishes.
    pub fn job_key(&self) -> JobKey {
        JobKey::new(&self.org, &self.project, &self.video)
    }

    /// Identity of the credential record to act with.
    pub fn channel_key(&self) -> ChannelKey {
        ChannelKey::new(&self.org, &self.channel)
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            table_name: self.table_name.clone(),
            region: self.region.clone(),
        }
    }

    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig {
            bucket_name: self.bucket_name.clone(),
            region: self.region.clone(),
        }
    }

    pub fn oauth_config(&self) -> OauthConfig {
        OauthConfig {
            token_url: self.token_url.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            timeout: self.http_timeout,
        }
    }

    pub fn upload_config(&self) -> UploadConfig {
        UploadConfig {
            upload_url: self.upload_url.clone(),
            timeout: self.upload_timeout,
            connect_timeout: self.http_timeout,
        }
    }
}

fn required(name: &str) -> PublishResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(PublishError::ConfigMissing(name.to_string())),
    }
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    // Environment is process-global; serialize tests that touch it.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const REQUIRED: [(&str, &str); 9] = [
        ("ORG_ID", "ORG#o1"),
        ("PROJECT_ID", "PROJECT#p1"),
        ("VIDEO_ID", "VIDEO#v1.mp4"),
        ("CHANNEL_ID", "CHANNEL#c1"),
        ("GOOGLE_CLIENT_ID", "client-id"),
        ("GOOGLE_CLIENT_SECRET", "client-secret"),
        ("TABLE_NAME", "publish-jobs"),
        ("UPLOADS_BUCKET_NAME", "uploads"),
        ("AWS_REGION", "eu-west-1"),
    ];

    fn set_all() {
        for (name, value) in REQUIRED {
            std::env::set_var(name, value);
        }
        for name in [
            "OAUTH_TOKEN_URL",
            "UPLOAD_ENDPOINT_URL",
            "HTTP_TIMEOUT_SECS",
            "UPLOAD_TIMEOUT_SECS",
        ] {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn test_from_env_with_all_required() {
        let _guard = ENV_LOCK.lock().unwrap();
        set_all();

        let config = PublisherConfig::from_env().unwrap();
        assert_eq!(config.job_key().partition_key(), "ORG#o1#PROJECT#p1");
        assert_eq!(config.channel_key().sort_key(), "CHANNEL#c1");
        assert_eq!(config.token_url, GOOGLE_TOKEN_URL);
        assert_eq!(config.upload_url, YOUTUBE_UPLOAD_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.upload_timeout, Duration::from_secs(3600));
    }

    #[test]
    fn test_missing_variable_is_fatal_and_named() {
        let _guard = ENV_LOCK.lock().unwrap();
        set_all();
        std::env::remove_var("GOOGLE_CLIENT_SECRET");

        match PublisherConfig::from_env() {
            Err(PublishError::ConfigMissing(name)) => assert_eq!(name, "GOOGLE_CLIENT_SECRET"),
            other => panic!("expected ConfigMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_variable_counts_as_missing() {
        let _guard = ENV_LOCK.lock().unwrap();
        set_all();
        std::env::set_var("TABLE_NAME", "");

        assert!(matches!(
            PublisherConfig::from_env(),
            Err(PublishError::ConfigMissing(name)) if name == "TABLE_NAME"
        ));
    }
}
