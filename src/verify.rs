//! Prettier invocation over the resolved changeset
//!
//! Runs the locally installed Prettier in check mode. Only the exit
//! status is interpreted; the captured output is surfaced to the user
//! verbatim.

use crate::changeset::Changeset;
use crate::error::{ActionError, ActionResult};
use crate::process;
use std::path::PathBuf;
use tracing::info;

/// Default check binary, relative to the project root
pub const PRETTIER_BIN: &str = "node_modules/.bin/prettier";

/// Runs `prettier --check` over a changeset
pub struct PrettierRunner {
    project_dir: PathBuf,
    program: PathBuf,
    extra_args: Vec<String>,
}

impl PrettierRunner {
    /// Create a runner for one project.
    ///
    /// `bin` overrides the default binary location; relative paths are
    /// resolved against the project directory.
    pub fn new(project_dir: PathBuf, bin: Option<PathBuf>, extra_args: Vec<String>) -> Self {
        let bin = bin.unwrap_or_else(|| PathBuf::from(PRETTIER_BIN));
        let program = if bin.is_absolute() {
            bin
        } else {
            project_dir.join(bin)
        };
        Self {
            project_dir,
            program,
            extra_args,
        }
    }

    fn args(&self, changeset: &Changeset) -> Vec<String> {
        let mut args = vec!["--check".to_string()];
        args.extend(self.extra_args.iter().cloned());
        match changeset {
            Changeset::Everything => args.push(".".to_string()),
            Changeset::Files(files) => args.extend(files.iter().cloned()),
        }
        args
    }

    /// Run the check. Returns the captured output on success; a non-zero
    /// exit becomes a fatal error carrying the output.
    pub async fn check(&self, changeset: &Changeset) -> ActionResult<String> {
        let args = self.args(changeset);
        info!("running {} {}", self.program.display(), args.join(" "));

        let output = process::output(
            &self.program.display().to_string(),
            &args,
            &self.project_dir,
        )
        .await?;
        let combined = process::combined_output(&output);

        if output.status.success() {
            Ok(combined)
        } else {
            Err(ActionError::CheckFailed { output: combined })
        }
    }
}
