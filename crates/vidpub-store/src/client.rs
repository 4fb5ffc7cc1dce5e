//! DynamoDB client construction.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;

use crate::error::StoreResult;

/// Configuration for the durable store client.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Table holding both credential and job records
    pub table_name: String,
    /// AWS region of the table
    pub region: String,
}

/// Durable store client shared by the record repositories.
#[derive(Clone)]
pub struct StoreClient {
    client: Client,
    table: String,
}

impl StoreClient {
    /// Create a new store client from configuration.
    ///
    /// Credentials come from the default provider chain (instance role,
    /// environment, shared config), matching how the worker is deployed.
    pub async fn new(config: StoreConfig) -> StoreResult<Self> {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region))
            .load()
            .await;

        Ok(Self {
            client: Client::new(&sdk_config),
            table: config.table_name,
        })
    }

    pub(crate) fn inner(&self) -> &Client {
        &self.client
    }

    pub(crate) fn table(&self) -> &str {
        &self.table
    }
}
