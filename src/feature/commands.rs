//! The "commands" feature: command dispatch against a store.
//!
//! The only command is key enumeration. Any command name containing
//! `keys` lists the keys currently held by the bound store; every other
//! name is rejected with [`FeatureError::UnsupportedCommand`].

use serde_json::Value;

use crate::logging::{debug, warn};

use super::{CmdCheck, CmdResult, Feature, FeatureError, StoreSpi};

/// Registered name of this feature.
pub(super) const NAME: &str = "commands";

const KEYS_CMD: &str = "keys";

pub(super) fn construct<'a>(store: &'a dyn StoreSpi) -> Box<dyn Feature + 'a> {
    Box::new(CommandsFeature { store })
}

/// Command dispatch bound to a store.
pub struct CommandsFeature<'a> {
    store: &'a dyn StoreSpi,
}

impl<'a> CommandsFeature<'a> {
    /// Bind the feature to `store`.
    pub fn new<S: StoreSpi + 'a>(store: &'a S) -> Self {
        Self { store }
    }

    /// Bind the feature to an optional store.
    ///
    /// A feature cannot exist unbound, so `None` fails with
    /// [`FeatureError::MissingStore`].
    pub fn bind<S: StoreSpi + 'a>(store: Option<&'a S>) -> Result<Self, FeatureError> {
        store.map(Self::new).ok_or(FeatureError::MissingStore)
    }

    fn supports(cmd: &str) -> bool {
        cmd.contains(KEYS_CMD)
    }
}

impl Feature for CommandsFeature<'_> {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_do_cmd(&self, cmd: &str) -> CmdCheck {
        CmdCheck {
            cmd: cmd.to_string(),
            exists: Self::supports(cmd),
        }
    }

    fn do_cmd(&self, cmd: &str, payload: Option<Value>) -> Result<CmdResult, FeatureError> {
        if !Self::supports(cmd) {
            warn!(cmd = cmd, "unsupported command");
            return Err(FeatureError::UnsupportedCommand(cmd.to_string()));
        }

        let keys = self.store.keys()?;
        debug!(cmd = cmd, keys = keys.len(), "listed keys");

        Ok(CmdResult {
            cmd: cmd.to_string(),
            payload,
            data: Value::Array(keys.into_iter().map(Value::String).collect()),
            meta: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::KvError;
    use serde_json::json;

    struct FixedKeys(Vec<&'static str>);

    impl StoreSpi for FixedKeys {
        fn keys(&self) -> Result<Vec<String>, KvError> {
            Ok(self.0.iter().map(|k| k.to_string()).collect())
        }
    }

    struct ClosedStore;

    impl StoreSpi for ClosedStore {
        fn keys(&self) -> Result<Vec<String>, KvError> {
            Err(KvError::Closed)
        }
    }

    #[test]
    fn test_can_do_cmd_matches_substring() {
        let store = FixedKeys(vec![]);
        let feature = CommandsFeature::new(&store);
        assert!(feature.can_do_cmd("keys").exists);
        assert!(feature.can_do_cmd("list-keys").exists);
        assert!(!feature.can_do_cmd("nonsense").exists);
        assert!(!feature.can_do_cmd("KEYS").exists);
    }

    #[test]
    fn test_do_cmd_payload_passthrough() {
        let store = FixedKeys(vec!["a"]);
        let feature = CommandsFeature::new(&store);
        let result = feature.do_cmd("keys", Some(json!({"ignored": true}))).unwrap();
        assert_eq!(result.payload, Some(json!({"ignored": true})));
        assert_eq!(result.data, json!(["a"]));
        assert_eq!(result.meta, None);
    }

    #[test]
    fn test_bind_without_store() {
        let result = CommandsFeature::bind::<FixedKeys>(None);
        assert!(matches!(result, Err(FeatureError::MissingStore)));
    }

    #[test]
    fn test_store_error_propagates() {
        let feature = CommandsFeature::new(&ClosedStore);
        assert_eq!(
            feature.do_cmd("keys", None).unwrap_err(),
            FeatureError::Store(KvError::Closed)
        );
    }

    #[test]
    fn test_meta_not_attached_on_failure() {
        let store = FixedKeys(vec![]);
        let feature = CommandsFeature::new(&store);
        let err = feature
            .do_cmd_with_meta("bogus", None, json!({"trace": 1}))
            .unwrap_err();
        assert_eq!(err, FeatureError::UnsupportedCommand("bogus".to_string()));
    }
}
