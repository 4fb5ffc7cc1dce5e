//! Blob storage adapter for approved video assets.
//!
//! This crate provides:
//! - Single-object streaming reads from the uploads bucket
//! - Declared content length/type extraction for the upload call
//!
//! Assets may be hours of video; bodies are handed to the caller as
//! streams and never collected into memory.

pub mod client;
pub mod error;

pub use client::{AssetStore, AssetStream, StorageConfig};
pub use error::{StorageError, StorageResult};

// The stream type `AssetStream::body` exposes; re-exported so consumers and
// test fakes need not name the SDK crate.
pub use aws_sdk_s3::primitives::ByteStream;
