//! One-shot publish job orchestrator.
//!
//! This crate provides:
//! - Process configuration (`PublisherConfig`)
//! - The component seams the pipeline is written against
//! - The credential lifecycle manager
//! - The orchestrator driving one job to a terminal status

pub mod components;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod token;

pub use components::{AssetSource, CredentialStore, JobStore, PublishTransport};
pub use config::PublisherConfig;
pub use error::{PublishError, PublishResult};
pub use orchestrator::{publish, Orchestrator, PublishOutcome};
pub use token::TokenManager;
