//! DynamoDB adapters for the publish pipeline's durable records.
//!
//! This crate provides:
//! - Point lookups for credential and job records
//! - Targeted attribute updates (status transitions, token refresh persistence)
//! - Attribute marshalling helpers
//!
//! Every write is a partial `UpdateItem` naming exactly the attributes it
//! owns; records are shared with other processes and unrelated attributes
//! must survive untouched.

pub mod attr;
pub mod client;
pub mod credential_repo;
pub mod error;
pub mod job_repo;

pub use client::{StoreClient, StoreConfig};
pub use credential_repo::CredentialRepository;
pub use error::{StoreError, StoreResult};
pub use job_repo::JobRepository;
