//! Key-value store module.
//!
//! This module defines the CommonKV store contract, a mapping from string
//! keys to lists of JSON values, together with its in-memory implementation.

mod error;
mod store;
mod types;

pub use error::KvError;
pub use store::{CommonKv, MemStore};
pub use types::{CloseResult, ValueResult, ValuesResult, WriteResult, value_list};

use crate::config::{Backend, StoreConfig};

/// Open a store for the backend selected by `config`.
pub fn open_store(config: &StoreConfig) -> Result<Box<dyn CommonKv>, KvError> {
    match config.backend {
        Backend::Memory => Ok(Box::new(MemStore::open(&config.memory))),
    }
}
