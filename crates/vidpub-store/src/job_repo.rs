//! Repository for publish job records.

use tracing::debug;

use vidpub_models::{JobKey, PublishJob, PublishStatus};

use crate::attr::{self, Item};
use crate::client::StoreClient;
use crate::error::{StoreError, StoreResult};

// "Status" is aliased through an expression attribute name; the table
// predates this worker and uses PascalCase attribute names for job records.
const SET_STATUS_EXPR: &str = "SET #status = :newStatus";
const MARK_UPLOADED_EXPR: &str =
    "SET #status = :newStatus, PlatformVideoId = :platformId, UploadedToPlatformAt = :publishedAt";

/// Repository for publish job records.
#[derive(Clone)]
pub struct JobRepository {
    client: StoreClient,
}

impl JobRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// Point lookup of a publish job. `Ok(None)` means no record.
    pub async fn get(&self, key: &JobKey) -> StoreResult<Option<PublishJob>> {
        debug!("Loading job {}", key);

        let output = self
            .client
            .inner()
            .get_item()
            .table_name(self.client.table())
            .key("PK", attr::s(key.partition_key()))
            .key("SK", attr::s(key.sort_key()))
            .send()
            .await
            .map_err(|e| StoreError::read_failed(e.to_string()))?;

        match output.item {
            Some(item) => Ok(Some(job_from_item(&item)?)),
            None => Ok(None),
        }
    }

    /// Targeted update of the status attribute only.
    pub async fn set_status(&self, key: &JobKey, status: PublishStatus) -> StoreResult<()> {
        self.client
            .inner()
            .update_item()
            .table_name(self.client.table())
            .key("PK", attr::s(key.partition_key()))
            .key("SK", attr::s(key.sort_key()))
            .update_expression(SET_STATUS_EXPR)
            .expression_attribute_names("#status", "Status")
            .expression_attribute_values(":newStatus", attr::s(status.as_str()))
            .send()
            .await
            .map_err(|e| StoreError::write_failed(e.to_string()))?;

        debug!("Job {} status set to {}", key, status);
        Ok(())
    }

    /// Record a successful publish: terminal status, platform-assigned id
    /// and publish instant, in one targeted update.
    pub async fn mark_uploaded(
        &self,
        key: &JobKey,
        platform_video_id: &str,
        published_at_ms: i64,
    ) -> StoreResult<()> {
        self.client
            .inner()
            .update_item()
            .table_name(self.client.table())
            .key("PK", attr::s(key.partition_key()))
            .key("SK", attr::s(key.sort_key()))
            .update_expression(MARK_UPLOADED_EXPR)
            .expression_attribute_names("#status", "Status")
            .expression_attribute_values(":newStatus", attr::s(PublishStatus::Uploaded.as_str()))
            .expression_attribute_values(":platformId", attr::s(platform_video_id))
            .expression_attribute_values(":publishedAt", attr::n(published_at_ms))
            .send()
            .await
            .map_err(|e| StoreError::write_failed(e.to_string()))?;

        debug!("Job {} marked uploaded as {}", key, platform_video_id);
        Ok(())
    }
}

fn job_from_item(item: &Item) -> StoreResult<PublishJob> {
    let raw_status = attr::req_s(item, "job", "Status")?;
    let status = PublishStatus::parse(&raw_status)
        .ok_or_else(|| StoreError::malformed("job", format!("unknown status {raw_status}")))?;

    Ok(PublishJob {
        title: attr::req_s(item, "job", "VideoTitle")?,
        description: attr::opt_s(item, "VideoDescription").unwrap_or_default(),
        owner_id: attr::opt_s(item, "UserId").unwrap_or_default(),
        thumbnail_key: attr::opt_s(item, "ThumbnailKey"),
        status,
        published_at_ms: attr::opt_n_i64(item, "UploadedToPlatformAt"),
        platform_video_id: attr::opt_s(item, "PlatformVideoId"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> Item {
        let mut item = Item::new();
        item.insert("PK".into(), attr::s("ORG#o1#PROJECT#p1"));
        item.insert("SK".into(), attr::s("VIDEO#v1.mp4"));
        item.insert("VideoTitle".into(), attr::s("Launch day"));
        item.insert("VideoDescription".into(), attr::s("Behind the scenes"));
        item.insert("Status".into(), attr::s("awaiting_approval"));
        item.insert("UserId".into(), attr::s("user-1"));
        item.insert("ThumbnailKey".into(), attr::s("thumbs/v1.jpg"));
        item
    }

    #[test]
    fn test_unmarshal_job() {
        let job = job_from_item(&item()).unwrap();
        assert_eq!(job.title, "Launch day");
        assert_eq!(job.description, "Behind the scenes");
        assert_eq!(job.status, PublishStatus::AwaitingApproval);
        assert_eq!(job.thumbnail_key.as_deref(), Some("thumbs/v1.jpg"));
        assert_eq!(job.platform_video_id, None);
        assert_eq!(job.published_at_ms, None);
    }

    #[test]
    fn test_unknown_status_is_malformed() {
        let mut item = item();
        item.insert("Status".into(), attr::s("uploading_to_yt"));
        assert!(matches!(
            job_from_item(&item),
            Err(StoreError::Malformed(_, _))
        ));
    }

    #[test]
    fn test_status_update_is_targeted() {
        // A status write must never rewrite metadata attributes.
        assert!(SET_STATUS_EXPR.contains("#status"));
        assert!(!SET_STATUS_EXPR.contains("VideoTitle"));
        assert!(!SET_STATUS_EXPR.contains("VideoDescription"));
        assert_eq!(SET_STATUS_EXPR.matches(',').count(), 0);
    }

    #[test]
    fn test_mark_uploaded_touches_outcome_fields_only() {
        assert!(MARK_UPLOADED_EXPR.contains("#status"));
        assert!(MARK_UPLOADED_EXPR.contains("PlatformVideoId"));
        assert!(MARK_UPLOADED_EXPR.contains("UploadedToPlatformAt"));
        assert!(!MARK_UPLOADED_EXPR.contains("VideoTitle"));
        assert!(!MARK_UPLOADED_EXPR.contains("ThumbnailKey"));
    }
}
