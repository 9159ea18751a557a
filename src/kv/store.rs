//! The CommonKV store API and its in-memory implementation.

use std::collections::HashMap;

use serde_json::Value;

use crate::config::MemoryOptions;
use crate::feature::{self, Feature, FeatureIter, StoreSpi};
use crate::logging::{debug, error, info, trace};

use super::error::KvError;
use super::types::{CloseResult, ValueResult, ValuesResult, WriteResult};

/// A store mapping string keys to lists of values.
///
/// Every operation completes exactly once with either a result or a
/// [`KvError`]. Once [`close`](CommonKv::close) has succeeded, every
/// operation except [`iterate_features`](CommonKv::iterate_features)
/// fails with [`KvError::Closed`].
pub trait CommonKv {
    /// Replace the values stored under `key`.
    fn set_value(&mut self, key: &str, values: Vec<Value>) -> Result<WriteResult, KvError>;

    /// Append values to the list stored under `key`, creating it if absent.
    ///
    /// No order is promised for the combined list.
    fn add_values(&mut self, key: &str, values: Vec<Value>) -> Result<WriteResult, KvError>;

    /// Get one of the values stored under `key`.
    ///
    /// Which value is returned when there are several is up to the
    /// implementation; prefer [`get_values`](CommonKv::get_values) when it
    /// matters.
    fn get_value(&self, key: &str) -> Result<ValueResult, KvError>;

    /// Get every value stored under `key`.
    fn get_values(&self, key: &str) -> Result<ValuesResult, KvError>;

    /// Enumerate the features this store knows about.
    fn iterate_features(&self) -> FeatureIter;

    /// Look up a feature by name, bound to this store.
    ///
    /// Returns `Ok(None)` for names no registered feature answers to.
    fn feature(&self, name: &str) -> Result<Option<Box<dyn Feature + '_>>, KvError>;

    /// Close the store, discarding its contents.
    fn close(&mut self) -> Result<CloseResult, KvError>;
}

/// In-memory CommonKV store backed by a `HashMap`.
#[derive(Debug)]
pub struct MemStore {
    // None once closed
    data: Option<HashMap<String, Vec<Value>>>,
}

impl Default for MemStore {
    fn default() -> Self {
        Self::open(&MemoryOptions::default())
    }
}

impl MemStore {
    /// Open an empty in-memory store.
    pub fn open(_options: &MemoryOptions) -> Self {
        info!("opening in-memory store");
        Self {
            data: Some(HashMap::new()),
        }
    }

    /// Whether [`close`](CommonKv::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.data.is_none()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> Result<usize, KvError> {
        Ok(self.data()?.len())
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> Result<bool, KvError> {
        Ok(self.data()?.is_empty())
    }

    fn data(&self) -> Result<&HashMap<String, Vec<Value>>, KvError> {
        self.data.as_ref().ok_or(KvError::Closed)
    }

    fn data_mut(&mut self) -> Result<&mut HashMap<String, Vec<Value>>, KvError> {
        self.data.as_mut().ok_or(KvError::Closed)
    }
}

impl CommonKv for MemStore {
    fn set_value(&mut self, key: &str, values: Vec<Value>) -> Result<WriteResult, KvError> {
        debug!(key = key, count = values.len(), "setting values");
        let data = self.data_mut()?;
        let old = data.insert(key.to_string(), values.clone());

        Ok(WriteResult {
            key: key.to_string(),
            values,
            old,
        })
    }

    fn add_values(&mut self, key: &str, values: Vec<Value>) -> Result<WriteResult, KvError> {
        debug!(key = key, count = values.len(), "adding values");
        let data = self.data_mut()?;
        let old = data.get(key).cloned();

        // Prior values first, then the new ones
        let mut next = old.clone().unwrap_or_default();
        next.extend(values);
        data.insert(key.to_string(), next.clone());

        Ok(WriteResult {
            key: key.to_string(),
            values: next,
            old,
        })
    }

    fn get_value(&self, key: &str) -> Result<ValueResult, KvError> {
        trace!(key = key, "getting value");
        let value = self
            .data()?
            .get(key)
            .and_then(|values| values.first())
            .cloned();

        Ok(ValueResult {
            key: key.to_string(),
            value,
        })
    }

    fn get_values(&self, key: &str) -> Result<ValuesResult, KvError> {
        trace!(key = key, "getting values");
        let values = self.data()?.get(key).cloned();

        Ok(ValuesResult {
            key: key.to_string(),
            values,
        })
    }

    fn iterate_features(&self) -> FeatureIter {
        feature::registered()
    }

    fn feature(&self, name: &str) -> Result<Option<Box<dyn Feature + '_>>, KvError> {
        self.data()?;
        let found = feature::lookup(name).map(|entry| entry.bind(self));
        if found.is_none() {
            debug!(feature = name, "unknown feature requested");
        }
        Ok(found)
    }

    fn close(&mut self) -> Result<CloseResult, KvError> {
        let Some(data) = self.data.take() else {
            error!("close called on an already closed store");
            return Err(KvError::Closed);
        };
        info!(keys = data.len(), "closed in-memory store");

        Ok(CloseResult {
            closed: true,
            keys: data.len(),
        })
    }
}

impl StoreSpi for MemStore {
    fn keys(&self) -> Result<Vec<String>, KvError> {
        let mut keys: Vec<String> = self.data()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn open() -> MemStore {
        MemStore::open(&MemoryOptions::default())
    }

    #[test]
    fn test_set_value_replaces() {
        let mut store = open();
        let first = store.set_value("foo", vec![json!(1), json!(2), json!(3)]).unwrap();
        assert_eq!(first.old, None);

        let second = store.set_value("foo", vec![json!(4), json!(5), json!(6)]).unwrap();
        assert_eq!(second.old, Some(vec![json!(1), json!(2), json!(3)]));
        assert_eq!(second.values, vec![json!(4), json!(5), json!(6)]);
    }

    #[test]
    fn test_add_values_appends_after_prior() {
        let mut store = open();
        store.set_value("foo", vec![json!(1), json!(2)]).unwrap();

        let result = store.add_values("foo", vec![json!(3)]).unwrap();
        assert_eq!(result.old, Some(vec![json!(1), json!(2)]));
        assert_eq!(result.values, vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_add_values_creates_missing_key() {
        let mut store = open();
        let result = store.add_values("new", vec![json!("a")]).unwrap();
        assert_eq!(result.old, None);
        assert_eq!(result.values, vec![json!("a")]);
    }

    #[test]
    fn test_get_value_empty_list_is_absent() {
        let mut store = open();
        store.set_value("empty", Vec::new()).unwrap();
        assert_eq!(store.get_value("empty").unwrap().value, None);
        assert_eq!(store.get_values("empty").unwrap().values, Some(Vec::new()));
    }

    #[test]
    fn test_spi_keys_sorted() {
        let mut store = open();
        store.set_value("b", vec![json!(1)]).unwrap();
        store.set_value("a", vec![json!(2)]).unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_close_twice_fails() {
        let mut store = open();
        store.set_value("foo", vec![json!(1)]).unwrap();

        let closed = store.close().unwrap();
        assert_eq!(closed, CloseResult { closed: true, keys: 1 });
        assert!(store.is_closed());
        assert_eq!(store.close(), Err(KvError::Closed));
    }
}
