//! Error types for prettier-action
//!
//! All modules use `ActionResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for prettier-action operations
pub type ActionResult<T> = Result<T, ActionError>;

/// All errors that can occur in prettier-action
#[derive(Error, Debug)]
pub enum ActionError {
    // Manifest errors
    #[error("Failed to read {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid package.json at {path}: {reason}")]
    ManifestParse { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // Install / check errors
    #[error("npm install failed:\n{output}")]
    InstallFailed { output: String },

    #[error("Prettier check failed.\n{output}")]
    CheckFailed { output: String },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command execution error: {command}, stderr: {stderr}")]
    CommandExecution { command: String, stderr: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ActionError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a command execution error
    pub fn command_exec(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandExecution {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ManifestRead { .. } => Some("Run from the project root, or pass --project <dir>"),
            Self::InstallFailed { .. } => Some("Check network access to the npm registry"),
            Self::CheckFailed { .. } => Some("Run prettier --write locally to fix formatting"),
            _ => None,
        }
    }
}
