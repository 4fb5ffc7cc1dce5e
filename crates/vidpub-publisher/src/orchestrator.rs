//! The publish job state machine.

use chrono::Utc;
use tracing::{error, info};

use vidpub_models::{asset_object_key, ChannelKey, JobKey, PublishStatus};
use vidpub_store::{CredentialRepository, JobRepository, StoreClient};
use vidpub_storage::AssetStore;
use vidpub_youtube::{OauthClient, UploadMetadata, VideoPublisher};

use crate::components::{AssetSource, CredentialStore, JobStore, PublishTransport};
use crate::config::PublisherConfig;
use crate::error::{PublishError, PublishResult};
use crate::token::TokenManager;

/// Result of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    /// Platform-assigned video id
    pub platform_video_id: String,
    /// Instant the platform accepted the upload (ms epoch)
    pub published_at_ms: i64,
}

/// Drives one publish job through its status transitions.
pub struct Orchestrator<'a> {
    credentials: &'a dyn CredentialStore,
    jobs: &'a dyn JobStore,
    assets: &'a dyn AssetSource,
    transport: &'a dyn PublishTransport,
    oauth: &'a OauthClient,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        credentials: &'a dyn CredentialStore,
        jobs: &'a dyn JobStore,
        assets: &'a dyn AssetSource,
        transport: &'a dyn PublishTransport,
        oauth: &'a OauthClient,
    ) -> Self {
        Self {
            credentials,
            jobs,
            assets,
            transport,
            oauth,
        }
    }

    /// Run one publish attempt to a terminal status.
    ///
    /// The `uploading` write happens before any call with irreversible
    /// cost, so a crash mid-run leaves the job visibly stuck rather than
    /// silently untouched. After any later failure the job is moved to
    /// `failed` best-effort; if that write also fails, the job stays in
    /// `uploading` on purpose as a diagnosable state.
    pub async fn run(&self, channel: &ChannelKey, job_key: &JobKey) -> PublishResult<PublishOutcome> {
        info!("Starting publish of {} via channel {}", job_key, channel);

        self.jobs
            .set_status(job_key, PublishStatus::Uploading)
            .await?;

        match self.attempt(channel, job_key).await {
            Ok(outcome) => {
                info!(
                    "Job {} uploaded as {}",
                    job_key, outcome.platform_video_id
                );
                Ok(outcome)
            }
            Err(err) => {
                error!(kind = err.kind(), "Publish of {} failed: {}", job_key, err);
                if let Err(mark_err) = self.jobs.set_status(job_key, PublishStatus::Failed).await {
                    error!(
                        "Could not mark job {} failed ({}); leaving it in uploading",
                        job_key, mark_err
                    );
                }
                Err(err)
            }
        }
    }

    /// Steps 2–6 of the sequence; every error is fatal to the attempt.
    async fn attempt(&self, channel: &ChannelKey, job_key: &JobKey) -> PublishResult<PublishOutcome> {
        let credential = self
            .credentials
            .load(channel)
            .await?
            .ok_or_else(|| PublishError::CredentialNotFound(channel.to_string()))?;

        let now_ms = Utc::now().timestamp_millis();
        let credential = TokenManager::new(self.oauth, self.credentials)
            .ensure_valid(channel, credential, now_ms)
            .await?;

        // Fresh read after announcing intent: the metadata used for the
        // upload reflects any edit that raced with the uploading write.
        let job = self
            .jobs
            .load(job_key)
            .await?
            .ok_or_else(|| PublishError::JobNotFound(job_key.to_string()))?;

        let object_key = asset_object_key(job_key.asset_locator());
        let asset = self.assets.open(object_key).await?;

        info!(
            "Uploading {} ({} bytes) for job {}",
            object_key, asset.content_length, job_key
        );

        let metadata = UploadMetadata {
            title: &job.title,
            description: &job.description,
        };
        let platform_video_id = self
            .transport
            .upload(&credential.access_token, &metadata, asset)
            .await?;

        let published_at_ms = Utc::now().timestamp_millis();
        self.jobs
            .mark_uploaded(job_key, &platform_video_id, published_at_ms)
            .await?;

        Ok(PublishOutcome {
            platform_video_id,
            published_at_ms,
        })
    }
}

/// Wire the concrete adapters from configuration and run one publish job.
pub async fn publish(config: &PublisherConfig) -> PublishResult<PublishOutcome> {
    let store = StoreClient::new(config.store_config()).await?;
    let credentials = CredentialRepository::new(store.clone());
    let jobs = JobRepository::new(store);
    let assets = AssetStore::new(config.storage_config()).await?;
    let oauth = OauthClient::new(config.oauth_config())?;
    let transport = VideoPublisher::new(config.upload_config())?;

    Orchestrator::new(&credentials, &jobs, &assets, &transport, &oauth)
        .run(&config.channel_key(), &config.job_key())
        .await
}
