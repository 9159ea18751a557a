//! Result types for the KV store module.
//!
//! Field names mirror the CommonKV contract so the serialized form of each
//! result reads the same in every binding.

use serde::Serialize;
use serde_json::Value;

/// Result of [`set_value`](super::CommonKv::set_value) and
/// [`add_values`](super::CommonKv::add_values).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WriteResult {
    pub key: String,

    /// The list now stored under `key`.
    pub values: Vec<Value>,

    /// The list stored under `key` before the write, if any.
    pub old: Option<Vec<Value>>,
}

/// Result of [`get_value`](super::CommonKv::get_value).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueResult {
    pub key: String,
    pub value: Option<Value>,
}

/// Result of [`get_values`](super::CommonKv::get_values).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuesResult {
    pub key: String,
    pub values: Option<Vec<Value>>,
}

/// Acknowledgement returned by [`close`](super::CommonKv::close).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CloseResult {
    pub closed: bool,

    /// Number of keys held by the store when it was closed.
    pub keys: usize,
}

/// Turn a single JSON value into a value list.
///
/// Arrays are taken as the list itself; any other value becomes a
/// one-element list.
pub fn value_list(values: Value) -> Vec<Value> {
    match values {
        Value::Array(items) => items,
        other => vec![other],
    }
}
