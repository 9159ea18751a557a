//! Convenient re-exports for common usage patterns.
//!
//! This module provides a single import to bring the store and feature
//! traits, along with their result types, into scope.
//!
//! # Example
//!
//! ```
//! use commonkv::prelude::*;
//! use serde_json::json;
//!
//! let mut store = MemStore::open(&MemoryOptions::default());
//! store.set_value("foo", vec![json!(1), json!(2)])?;
//! let values = store.get_values("foo")?;
//! assert_eq!(values.values, Some(vec![json!(1), json!(2)]));
//! # Ok::<(), commonkv::Error>(())
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Configuration
pub use crate::config::{Backend, ConfigError, MemoryOptions, StoreConfig};

// Store types
pub use crate::kv::{
    CloseResult, CommonKv, KvError, MemStore, ValueResult, ValuesResult, WriteResult, open_store,
    value_list,
};

// Feature types
#[cfg(feature = "commands")]
pub use crate::feature::CommandsFeature;
pub use crate::feature::{
    CmdCheck, CmdResult, Feature, FeatureError, FeatureInfo, FeatureIter, StoreSpi,
};
