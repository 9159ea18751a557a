//! A minimal key-to-multiple-values store API.
//!
//! commonkv defines the CommonKV contract: a store mapping string keys to
//! lists of JSON values, with replace and append writes, single and
//! multi-value reads, and named store-bound features. It ships one
//! reference backend, [`MemStore`], which keeps everything in a `HashMap`.
//!
//! # Module Organization
//!
//! - [`kv`]: The store contract and the in-memory backend
//! - [`feature`]: Feature lookup and the "commands" feature
//! - [`config`]: Backend selection and options
//! - [`error`]: Unified error types
//! - [`prelude`]: Convenient re-exports
//! - `logging`: Conditional logging macros (internal)
//!
//! # Features
//!
//! - `commands` (default): Register the "commands" store feature
//! - `logging`: Enable tracing-based logging
//! - `cli`: Build the `commonkv` command-line tool
//!
//! # Example
//!
//! ```
//! use commonkv::prelude::*;
//! use serde_json::json;
//!
//! let mut store = open_store(&StoreConfig::default())?;
//! store.set_value("foo", vec![json!(1), json!(2), json!(3)])?;
//! store.add_values("foo", vec![json!(4)])?;
//!
//! if let Some(commands) = store.feature("commands")? {
//!     let keys = commands.do_cmd("keys", None)?;
//!     assert_eq!(keys.data, json!(["foo"]));
//! }
//!
//! store.close()?;
//! # Ok::<(), commonkv::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod feature;
pub mod kv;
mod logging;
pub mod prelude;

// Re-export unified error types
pub use error::{Error, Result};

// Re-export the store surface at crate root for convenience
pub use config::{Backend, MemoryOptions, StoreConfig};
pub use feature::{Feature, FeatureError};
pub use kv::{CommonKv, KvError, MemStore, open_store};

// Re-export the value type stored under every key
pub use serde_json::Value;
