//! Scoped npm install from a synthetic manifest
//!
//! The synthetic package.json lives in a throwaway work directory inside
//! the project, so the project's own manifest and lockfile stay untouched.
//! A previously restored node_modules is moved into the work directory
//! before the install runs, so a fallback cache hit warms the install and
//! npm only fills the gap.

use crate::cache::Installer;
use crate::error::{ActionError, ActionResult};
use crate::manifest::SyntheticManifest;
use crate::process;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Fixed install target, relative to the project root
pub const INSTALL_DIR: &str = "node_modules";

/// Installs the filtered dependency set with npm
pub struct NpmInstaller {
    project_dir: PathBuf,
    npm_bin: String,
    manifest: SyntheticManifest,
}

impl NpmInstaller {
    /// Create an installer for one project and dependency set
    pub fn new(project_dir: PathBuf, npm_bin: String, manifest: SyntheticManifest) -> Self {
        Self {
            project_dir,
            npm_bin,
            manifest,
        }
    }
}

#[async_trait]
impl Installer for NpmInstaller {
    async fn install(&self) -> ActionResult<()> {
        // Work dir inside the project so renames stay on one filesystem
        let work = tempfile::Builder::new()
            .prefix(".prettier-action-")
            .tempdir_in(&self.project_dir)
            .map_err(|e| ActionError::io("creating install work directory", e))?;

        tokio::fs::write(work.path().join("package.json"), self.manifest.to_json()?)
            .await
            .map_err(|e| ActionError::io("writing synthetic package.json", e))?;

        let target = self.project_dir.join(INSTALL_DIR);
        let staged = work.path().join(INSTALL_DIR);
        if target.exists() {
            tokio::fs::rename(&target, &staged)
                .await
                .map_err(|e| ActionError::io("staging restored node_modules", e))?;
        }

        info!("installing Prettier dependencies with {}", self.npm_bin);
        let args: Vec<String> = ["install", "--no-audit", "--no-fund"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let output = process::output(&self.npm_bin, &args, work.path()).await?;

        if !output.status.success() {
            return Err(ActionError::InstallFailed {
                output: process::error_tail(&output),
            });
        }

        if staged.exists() {
            tokio::fs::rename(&staged, &target)
                .await
                .map_err(|e| ActionError::io("moving node_modules into place", e))?;
        }
        Ok(())
    }
}
