//! Error types for store features.

use thiserror::Error;

use crate::kv::KvError;

/// Errors raised while constructing or driving a feature.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    /// A feature was constructed without a backing store.
    #[error("No store provided to feature")]
    MissingStore,

    #[error("Unsupported command: {0}")]
    UnsupportedCommand(String),

    #[error("Store error: {0}")]
    Store(#[from] KvError),
}
