//! Configuration management
//!
//! Configuration is optional: a `.prettier-action.toml` in the project
//! directory, or a file named explicitly with `--config`. Missing files
//! mean defaults; CLI flags always win over file values.

pub mod schema;

pub use schema::Config;

use crate::error::{ActionError, ActionResult};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Conventional per-project config file name
pub const CONFIG_FILE: &str = ".prettier-action.toml";

/// Load configuration for a run.
///
/// An explicit path must exist and parse. Otherwise the project directory
/// is probed for [`CONFIG_FILE`]; absence is not an error.
pub async fn load(explicit: Option<&Path>, project_dir: &Path) -> ActionResult<Config> {
    if let Some(path) = explicit {
        return load_from_file(path).await;
    }

    let local = project_dir.join(CONFIG_FILE);
    if local.exists() {
        debug!("found project config: {}", local.display());
        return load_from_file(&local).await;
    }

    debug!("no config file, using defaults");
    Ok(Config::default())
}

async fn load_from_file(path: &Path) -> ActionResult<Config> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| ActionError::io(format!("reading config from {}", path.display()), e))?;

    toml::from_str(&content).map_err(|e| ActionError::ConfigInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn defaults_when_missing() {
        let temp = TempDir::new().unwrap();
        let config = load(None, temp.path()).await.unwrap();

        assert!(config.cache.enabled);
        assert_eq!(config.install.npm_bin, "npm");
    }

    #[tokio::test]
    async fn project_config_discovered() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE),
            "[install]\nnpm_bin = \"pnpm\"\n",
        )
        .unwrap();

        let config = load(None, temp.path()).await.unwrap();
        assert_eq!(config.install.npm_bin, "pnpm");
    }

    #[tokio::test]
    async fn explicit_path_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");

        let result = load(Some(&missing), temp.path()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn invalid_toml_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "not [valid toml").unwrap();

        let result = load(None, temp.path()).await;
        assert!(matches!(result, Err(ActionError::ConfigInvalid { .. })));
    }
}
