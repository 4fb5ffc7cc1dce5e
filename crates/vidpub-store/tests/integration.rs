//! Durable store integration tests.

use vidpub_models::{ChannelKey, JobKey, PublishStatus};
use vidpub_store::{CredentialRepository, JobRepository, StoreClient, StoreConfig};

fn config_from_env() -> StoreConfig {
    StoreConfig {
        table_name: std::env::var("TABLE_NAME").expect("TABLE_NAME not set"),
        region: std::env::var("AWS_REGION").expect("AWS_REGION not set"),
    }
}

/// Round-trip a status write against a seeded job record.
#[tokio::test]
#[ignore = "requires AWS credentials and a seeded table"]
async fn test_status_round_trip() {
    dotenvy::dotenv().ok();

    let client = StoreClient::new(config_from_env())
        .await
        .expect("store client");
    let jobs = JobRepository::new(client);

    let key = JobKey::new("ORG#itest", "PROJECT#itest", "VIDEO#itest.mp4");

    let before = jobs.get(&key).await.expect("load job").expect("job seeded");

    jobs.set_status(&key, before.status)
        .await
        .expect("status write");

    // Writing the unchanged status must leave every other field intact.
    let after = jobs.get(&key).await.expect("reload job").expect("job");
    assert_eq!(after.title, before.title);
    assert_eq!(after.description, before.description);
    assert_eq!(after.thumbnail_key, before.thumbnail_key);
    assert_eq!(after.status, before.status);
}

/// Credential lookups return None for unknown channels.
#[tokio::test]
#[ignore = "requires AWS credentials and a seeded table"]
async fn test_unknown_channel_is_none() {
    dotenvy::dotenv().ok();

    let client = StoreClient::new(config_from_env())
        .await
        .expect("store client");
    let credentials = CredentialRepository::new(client);

    let key = ChannelKey::new("ORG#itest", "CHANNEL#does-not-exist");
    assert!(credentials.get(&key).await.expect("lookup").is_none());
}

/// Terminal write shape: status plus outcome metadata in one update.
#[tokio::test]
#[ignore = "requires AWS credentials and a seeded table"]
async fn test_mark_uploaded() {
    dotenvy::dotenv().ok();

    let client = StoreClient::new(config_from_env())
        .await
        .expect("store client");
    let jobs = JobRepository::new(client);

    let key = JobKey::new("ORG#itest", "PROJECT#itest", "VIDEO#itest.mp4");
    jobs.mark_uploaded(&key, "itest-video-id", 1_700_000_000_000)
        .await
        .expect("terminal write");

    let job = jobs.get(&key).await.expect("reload").expect("job");
    assert_eq!(job.status, PublishStatus::Uploaded);
    assert_eq!(job.platform_video_id.as_deref(), Some("itest-video-id"));
    assert_eq!(job.published_at_ms, Some(1_700_000_000_000));
}
