//! Configuration schema
//!
//! All sections and fields are optional; defaults match the conventional
//! CI layout (npm on PATH, prettier under node_modules/.bin).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cache store settings
    pub cache: CacheConfig,

    /// Dependency install settings
    pub install: InstallConfig,

    /// Prettier invocation settings
    pub check: CheckConfig,
}

/// Cache store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable cache restore and save (default: true)
    pub enabled: bool,

    /// Store directory; defaults to the OS cache directory
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

/// Install configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Package manager binary used for the scoped install
    pub npm_bin: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            npm_bin: "npm".to_string(),
        }
    }
}

/// Prettier invocation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Prettier binary; relative paths resolve against the project dir
    pub prettier_bin: Option<PathBuf>,

    /// Extra arguments passed before the path list
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[cache]"));
        assert!(toml.contains("[install]"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();

        assert!(config.cache.enabled);
        assert_eq!(config.install.npm_bin, "npm");
        assert!(config.check.args.is_empty());
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [check]
            args = ["--log-level", "warn"]
        "#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.check.args, vec!["--log-level", "warn"]);
        assert_eq!(config.install.npm_bin, "npm"); // default preserved
    }
}
