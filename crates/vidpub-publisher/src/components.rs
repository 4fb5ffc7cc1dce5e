//! Component seams of the pipeline.
//!
//! The orchestrator is written against these traits; the concrete adapters
//! implement them, and the scenario tests substitute in-memory fakes.

use async_trait::async_trait;

use vidpub_models::{ChannelKey, Credential, JobKey, PublishJob, PublishStatus};
use vidpub_store::{CredentialRepository, JobRepository, StoreResult};
use vidpub_storage::{AssetStore, AssetStream, StorageResult};
use vidpub_youtube::{UploadMetadata, UploadSource, VideoPublisher, YoutubeResult};

/// Durable store of channel credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load(&self, key: &ChannelKey) -> StoreResult<Option<Credential>>;

    /// Persist refreshed token fields. Targeted update: the refresh token
    /// and unrelated attributes must survive untouched.
    async fn save_token(&self, key: &ChannelKey, credential: &Credential) -> StoreResult<()>;
}

/// Durable store of publish jobs.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn load(&self, key: &JobKey) -> StoreResult<Option<PublishJob>>;

    /// Targeted update of the status attribute only.
    async fn set_status(&self, key: &JobKey, status: PublishStatus) -> StoreResult<()>;

    /// Record a successful publish (terminal status + platform id + instant).
    async fn mark_uploaded(
        &self,
        key: &JobKey,
        platform_video_id: &str,
        published_at_ms: i64,
    ) -> StoreResult<()>;
}

/// Blob storage the approved assets live in.
#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn open(&self, object_key: &str) -> StorageResult<AssetStream>;
}

/// The platform upload call.
#[async_trait]
pub trait PublishTransport: Send + Sync {
    async fn upload(
        &self,
        access_token: &str,
        metadata: &UploadMetadata<'_>,
        asset: AssetStream,
    ) -> YoutubeResult<String>;
}

#[async_trait]
impl CredentialStore for CredentialRepository {
    async fn load(&self, key: &ChannelKey) -> StoreResult<Option<Credential>> {
        self.get(key).await
    }

    async fn save_token(&self, key: &ChannelKey, credential: &Credential) -> StoreResult<()> {
        self.update_token(key, credential).await
    }
}

#[async_trait]
impl JobStore for JobRepository {
    async fn load(&self, key: &JobKey) -> StoreResult<Option<PublishJob>> {
        self.get(key).await
    }

    async fn set_status(&self, key: &JobKey, status: PublishStatus) -> StoreResult<()> {
        JobRepository::set_status(self, key, status).await
    }

    async fn mark_uploaded(
        &self,
        key: &JobKey,
        platform_video_id: &str,
        published_at_ms: i64,
    ) -> StoreResult<()> {
        JobRepository::mark_uploaded(self, key, platform_video_id, published_at_ms).await
    }
}

#[async_trait]
impl AssetSource for AssetStore {
    async fn open(&self, object_key: &str) -> StorageResult<AssetStream> {
        AssetStore::open(self, object_key).await
    }
}

#[async_trait]
impl PublishTransport for VideoPublisher {
    async fn upload(
        &self,
        access_token: &str,
        metadata: &UploadMetadata<'_>,
        asset: AssetStream,
    ) -> YoutubeResult<String> {
        VideoPublisher::upload(self, access_token, metadata, into_upload_source(asset)).await
    }
}

/// Bridge the storage byte stream into a streaming request body.
///
/// The producer (storage read) and consumer (platform socket) run as one
/// pull-driven pipeline: bytes are requested chunk by chunk as the socket
/// drains them, in order, so memory stays bounded for arbitrarily large
/// assets.
fn into_upload_source(asset: AssetStream) -> UploadSource {
    let AssetStream {
        body,
        content_length,
        content_type,
    } = asset;

    let stream = futures::stream::unfold(body, |mut body| async move {
        body.next().await.map(|chunk| (chunk, body))
    });

    UploadSource {
        content_type,
        content_length,
        body: reqwest::Body::wrap_stream(stream),
    }
}
