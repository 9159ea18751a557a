//! Store configuration parsing.

use serde::Deserialize;
use std::path::Path;

/// Store configuration, usually loaded from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Which backend to open.
    #[serde(default)]
    pub backend: Backend,

    /// Options for the in-memory backend.
    #[serde(default)]
    pub memory: MemoryOptions,
}

/// Available store backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Process-local `HashMap`, discarded on close.
    #[default]
    Memory,
}

/// Options recognized by the in-memory backend (currently none).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryOptions {}

impl StoreConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }
}

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(String, std::io::Error),
    /// TOML parse error.
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Failed to read config file '{}': {}", path, e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
backend = "memory"

[memory]
"#;
        let config = StoreConfig::from_str(toml).unwrap();
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.memory, MemoryOptions::default());
    }

    #[test]
    fn test_empty_config_defaults_to_memory() {
        let config = StoreConfig::from_str("").unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let err = StoreConfig::from_str(r#"backend = "redis""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_memory_option_rejected() {
        let toml = r#"
[memory]
capacity = 10
"#;
        assert!(StoreConfig::from_str(toml).is_err());
    }
}
