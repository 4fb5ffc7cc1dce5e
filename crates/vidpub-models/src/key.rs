//! Composite record identities.
//!
//! Both record families live in one table keyed by partition + sort key.
//! Channels are keyed directly under their organization; jobs are keyed
//! under the organization/project pair with the video id as sort key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a channel's credential record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelKey {
    /// Owning organization id
    pub org: String,
    /// Channel id within the organization
    pub channel: String,
}

impl ChannelKey {
    pub fn new(org: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            channel: channel.into(),
        }
    }

    /// Partition key of the credential record.
    pub fn partition_key(&self) -> &str {
        &self.org
    }

    /// Sort key of the credential record.
    pub fn sort_key(&self) -> &str {
        &self.channel
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org, self.channel)
    }
}

/// Identity of a publish job record: organization, project, video.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobKey {
    /// Owning organization id
    pub org: String,
    /// Project id within the organization
    pub project: String,
    /// Video id, also the asset locator (see [`crate::asset`])
    pub video: String,
}

impl JobKey {
    pub fn new(
        org: impl Into<String>,
        project: impl Into<String>,
        video: impl Into<String>,
    ) -> Self {
        Self {
            org: org.into(),
            project: project.into(),
            video: video.into(),
        }
    }

    /// Partition key of the job record: `{org}#{project}`.
    pub fn partition_key(&self) -> String {
        format!("{}#{}", self.org, self.project)
    }

    /// Sort key of the job record.
    pub fn sort_key(&self) -> &str {
        &self.video
    }

    /// The job's stored asset reference. The storage object key is derived
    /// from this by [`crate::asset::asset_object_key`].
    pub fn asset_locator(&self) -> &str {
        &self.video
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}/{}", self.org, self.project, self.video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_partition_key_layout() {
        let key = JobKey::new("ORG#o1", "PROJECT#p1", "VIDEO#v1.mp4");
        assert_eq!(key.partition_key(), "ORG#o1#PROJECT#p1");
        assert_eq!(key.sort_key(), "VIDEO#v1.mp4");
    }

    #[test]
    fn test_channel_key_parts() {
        let key = ChannelKey::new("ORG#o1", "CHANNEL#c1");
        assert_eq!(key.partition_key(), "ORG#o1");
        assert_eq!(key.sort_key(), "CHANNEL#c1");
    }
}
