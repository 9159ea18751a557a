//! Store features: named, store-bound capability extensions.
//!
//! A feature is looked up by name through [`CommonKv::feature`] and works
//! against the store through the [`StoreSpi`] trait. Known features are
//! registered statically in a table keyed by name.
//!
//! [`CommonKv::feature`]: crate::kv::CommonKv::feature

#[cfg(feature = "commands")]
mod commands;
mod error;
mod types;

#[cfg(feature = "commands")]
pub use commands::CommandsFeature;
pub use error::FeatureError;
pub use types::{CmdCheck, CmdResult, FeatureInfo};

use serde_json::Value;

use crate::kv::KvError;

/// Store surface available to features only.
pub trait StoreSpi {
    /// Every key currently held by the store.
    fn keys(&self) -> Result<Vec<String>, KvError>;
}

/// Command dispatch capability exposed by a feature.
pub trait Feature {
    /// The name this feature is registered under.
    fn name(&self) -> &'static str;

    /// Check whether `cmd` is supported.
    fn can_do_cmd(&self, cmd: &str) -> CmdCheck;

    /// Execute `cmd` with an optional payload.
    fn do_cmd(&self, cmd: &str, payload: Option<Value>) -> Result<CmdResult, FeatureError>;

    /// Execute `cmd` and attach `meta` to a successful result.
    fn do_cmd_with_meta(
        &self,
        cmd: &str,
        payload: Option<Value>,
        meta: Value,
    ) -> Result<CmdResult, FeatureError> {
        let mut result = self.do_cmd(cmd, payload)?;
        result.meta = Some(meta);
        Ok(result)
    }
}

/// A registered feature constructor.
#[derive(Clone, Copy)]
pub struct FeatureEntry {
    pub name: &'static str,
    construct: for<'a> fn(&'a dyn StoreSpi) -> Box<dyn Feature + 'a>,
}

impl FeatureEntry {
    /// Build this feature bound to `store`.
    pub fn bind<'a>(&self, store: &'a dyn StoreSpi) -> Box<dyn Feature + 'a> {
        (self.construct)(store)
    }
}

impl std::fmt::Debug for FeatureEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureEntry").field("name", &self.name).finish()
    }
}

#[cfg(feature = "commands")]
static FEATURES: &[FeatureEntry] = &[FeatureEntry {
    name: commands::NAME,
    construct: commands::construct,
}];

#[cfg(not(feature = "commands"))]
static FEATURES: &[FeatureEntry] = &[];

/// Find the registered feature called `name`.
pub fn lookup(name: &str) -> Option<&'static FeatureEntry> {
    FEATURES.iter().find(|entry| entry.name == name)
}

/// Iterate over every registered feature.
pub fn registered() -> FeatureIter {
    FeatureIter {
        inner: FEATURES.iter(),
    }
}

/// Iterator over registered features, yielding one [`FeatureInfo`] each.
#[derive(Debug, Clone)]
pub struct FeatureIter {
    inner: std::slice::Iter<'static, FeatureEntry>,
}

impl Iterator for FeatureIter {
    type Item = FeatureInfo;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| FeatureInfo {
            feature: entry.name,
            exists: true,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for FeatureIter {}
