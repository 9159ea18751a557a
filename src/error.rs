//! Unified error type for the commonkv library.
//!
//! This module provides a single [`Error`] type that encompasses all errors
//! that can occur in the library, making it easier to handle errors in
//! application code.

use thiserror::Error;

use crate::config::ConfigError;
use crate::feature::FeatureError;
use crate::kv::KvError;

/// Unified error type for all commonkv operations.
///
/// # Example
///
/// ```
/// use commonkv::prelude::*;
///
/// fn keys(store: &MemStore) -> commonkv::Result<serde_json::Value> {
///     let commands = store.feature("commands")?;
///     let Some(commands) = commands else {
///         return Ok(serde_json::Value::Null);
///     };
///     Ok(commands.do_cmd("keys", None)?.data)
/// }
/// # let store = MemStore::open(&MemoryOptions::default());
/// # keys(&store).unwrap();
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Error from key-value store operations.
    #[error(transparent)]
    Kv(#[from] KvError),

    /// Error from feature construction or command dispatch.
    #[error(transparent)]
    Feature(#[from] FeatureError),

    /// Error loading the store configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if this is a KV store error.
    pub fn is_kv(&self) -> bool {
        matches!(self, Self::Kv(_))
    }

    /// Returns `true` if this is a feature error.
    pub fn is_feature(&self) -> bool {
        matches!(self, Self::Feature(_))
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
