//! Error types for the KV store module.

use thiserror::Error;

/// Errors that can occur during KV store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KvError {
    /// The store was closed; its mapping has been discarded.
    #[error("Store is closed")]
    Closed,
}
