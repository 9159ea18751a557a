//! Common test utilities shared across the integration tests.

#![allow(dead_code)]

use commonkv::{MemStore, MemoryOptions, Value};

/// Open an empty in-memory store.
pub fn open_memory() -> MemStore {
    MemStore::open(&MemoryOptions::default())
}

/// Sort values by their JSON text so lists can be compared as multisets.
pub fn sorted(mut values: Vec<Value>) -> Vec<Value> {
    values.sort_by_key(|v| v.to_string());
    values
}
