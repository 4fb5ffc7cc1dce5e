//! Mapping between a job's stored asset reference and its blob object key.
//!
//! Job sort keys carry a `VIDEO#` item-type prefix; objects in the uploads
//! bucket are stored without it. This is the only place the convention
//! lives; orchestration code never builds object keys by hand.

/// Item-type prefix carried by video sort keys in the durable store.
pub const VIDEO_KEY_PREFIX: &str = "VIDEO#";

/// Derive the storage object key from a job's asset locator.
///
/// A locator that does not carry the prefix maps to itself.
pub fn asset_object_key(locator: &str) -> &str {
    locator.strip_prefix(VIDEO_KEY_PREFIX).unwrap_or(locator)
}
