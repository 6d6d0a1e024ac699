//! Subprocess helpers
//!
//! All external tools (npm, git, prettier) are invoked through here so
//! command logging and error shaping stay uniform.

use crate::error::{ActionError, ActionResult};
use std::path::Path;
use std::process::{Output, Stdio};
use tokio::process::Command;
use tracing::debug;

/// Max number of output lines to include in command error messages.
const ERROR_TAIL_LINES: usize = 50;

/// Run a command to completion, capturing stdout and stderr.
pub async fn output(program: &str, args: &[String], cwd: &Path) -> ActionResult<Output> {
    debug!("executing: {} {} (in {})", program, args.join(" "), cwd.display());

    Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| ActionError::command_failed(format!("{} {}", program, args.join(" ")), e))
}

/// Combine stdout and stderr into one displayable block.
pub fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    match (stdout.trim().is_empty(), stderr.trim().is_empty()) {
        (false, false) => format!("{}\n{}", stdout.trim_end(), stderr.trim_end()),
        (false, true) => stdout.trim_end().to_string(),
        (true, false) => stderr.trim_end().to_string(),
        (true, true) => String::new(),
    }
}

/// Extract the useful tail of command output for error diagnostics.
///
/// Returns the last `ERROR_TAIL_LINES` lines of combined output so error
/// messages are actionable without being overwhelming.
pub fn error_tail(output: &Output) -> String {
    let combined = combined_output(output);
    let lines: Vec<&str> = combined.lines().collect();
    let total = lines.len();
    let tail: Vec<&str> = if total > ERROR_TAIL_LINES {
        lines[total - ERROR_TAIL_LINES..].to_vec()
    } else {
        lines
    };
    tail.join("\n")
}
