//! Changed-file resolution against a base revision
//!
//! Narrowing the check to changed files is an optimization, never a
//! correctness requirement: any failure to compute the diff widens back
//! to the whole tree instead of failing the run.

use crate::error::{ActionError, ActionResult};
use crate::process;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// The set of files the check must examine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Changeset {
    /// Check the whole tree
    Everything,
    /// Check exactly these paths; empty means nothing to check
    Files(Vec<String>),
}

impl Changeset {
    /// Parse the newline-delimited path list a diff produces
    pub fn from_diff_output(output: &str) -> Self {
        let files: Vec<String> = output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Self::Files(files)
    }

    /// Whether there is nothing to check (an explicit empty file list)
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Files(files) if files.is_empty())
    }
}

/// Source of changed-file listings
#[async_trait]
pub trait DiffSource: Send + Sync {
    /// Newline-delimited relative paths changed since `base_ref`
    async fn changed_files(&self, base_ref: &str) -> ActionResult<String>;
}

/// `git diff --name-only` against the base revision
pub struct GitDiff {
    repo_dir: PathBuf,
}

impl GitDiff {
    /// Create a diff source over a repository working tree
    pub fn new(repo_dir: PathBuf) -> Self {
        Self { repo_dir }
    }
}

#[async_trait]
impl DiffSource for GitDiff {
    async fn changed_files(&self, base_ref: &str) -> ActionResult<String> {
        let args: Vec<String> = ["diff", "--name-only", base_ref]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let output = process::output("git", &args, &self.repo_dir).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ActionError::command_exec(
                format!("git diff --name-only {base_ref}"),
                stderr,
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Resolve the changeset for this run.
///
/// No base ref means a full check. A diff failure (unknown revision, git
/// missing, not a repository) also means a full check; the error is
/// logged and never propagated.
pub async fn resolve(base_ref: Option<&str>, source: &dyn DiffSource) -> Changeset {
    let Some(base) = base_ref else {
        debug!("no base ref, checking everything");
        return Changeset::Everything;
    };

    match source.changed_files(base).await {
        Ok(output) => Changeset::from_diff_output(&output),
        Err(e) => {
            debug!("diff against {} failed, checking everything: {}", base, e);
            Changeset::Everything
        }
    }
}
