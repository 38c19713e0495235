use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{DocrefError, Result};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_SCHEME: &str = "file";

/// Configuration for docref, stored as config.json in the store dir.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocrefConfig {
    /// Scheme assumed for URIs without one (e.g. plain paths)
    #[serde(default = "default_scheme")]
    pub default_scheme: String,

    /// Pretty-print JSON output (`show`, `cp`)
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

fn default_scheme() -> String {
    DEFAULT_SCHEME.to_string()
}

fn default_pretty_json() -> bool {
    true
}

impl Default for DocrefConfig {
    fn default() -> Self {
        Self {
            default_scheme: DEFAULT_SCHEME.to_string(),
            pretty_json: true,
        }
    }
}

impl DocrefConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DocrefError::Io)?;
        let config: DocrefConfig =
            serde_json::from_str(&content).map_err(DocrefError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DocrefError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(DocrefError::Serialization)?;
        fs::write(config_path, content).map_err(DocrefError::Io)?;
        Ok(())
    }

    /// Set the default scheme (accepts both `mem` and `mem://`)
    pub fn set_default_scheme(&mut self, scheme: &str) {
        self.default_scheme = scheme.trim_end_matches("://").to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DocrefConfig::default();
        assert_eq!(config.default_scheme, "file");
        assert!(config.pretty_json);
    }

    #[test]
    fn test_set_default_scheme_strips_separator() {
        let mut config = DocrefConfig::default();
        config.set_default_scheme("mem://");
        assert_eq!(config.default_scheme, "mem");
        config.set_default_scheme("tar");
        assert_eq!(config.default_scheme, "tar");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = DocrefConfig::load(dir.path().join("nope")).unwrap();
        assert_eq!(config, DocrefConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();

        let mut config = DocrefConfig::default();
        config.set_default_scheme("mem");
        config.pretty_json = false;
        config.save(dir.path()).unwrap();

        let loaded = DocrefConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = DocrefConfig {
            default_scheme: "mem".to_string(),
            pretty_json: false,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: DocrefConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, parsed);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let parsed: DocrefConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, DocrefConfig::default());
    }
}
