//! Attribute-value marshalling helpers.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use crate::error::{StoreError, StoreResult};

pub type Item = HashMap<String, AttributeValue>;

/// Required string attribute.
pub fn req_s(item: &Item, record: &str, name: &str) -> StoreResult<String> {
    opt_s(item, name)
        .ok_or_else(|| StoreError::malformed(record, format!("missing string attribute {name}")))
}

/// Optional string attribute.
pub fn opt_s(item: &Item, name: &str) -> Option<String> {
    item.get(name).and_then(|v| v.as_s().ok()).cloned()
}

/// Required numeric attribute, parsed as i64.
pub fn req_n_i64(item: &Item, record: &str, name: &str) -> StoreResult<i64> {
    item.get(name)
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| StoreError::malformed(record, format!("missing numeric attribute {name}")))
}

/// Optional numeric attribute, parsed as i64.
pub fn opt_n_i64(item: &Item, name: &str) -> Option<i64> {
    item.get(name)
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse().ok())
}

/// String attribute value.
pub fn s(value: impl Into<String>) -> AttributeValue {
    AttributeValue::S(value.into())
}

/// Numeric attribute value.
pub fn n(value: i64) -> AttributeValue {
    AttributeValue::N(value.to_string())
}
