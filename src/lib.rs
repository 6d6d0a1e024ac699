//! prettier-action - Cached Prettier check for CI
//!
//! Restores the Prettier install from a content-addressed cache keyed by
//! the project's Prettier-related dependencies, and checks only the files
//! changed since a base revision when one is available.

pub mod cache;
pub mod changeset;
pub mod cli;
pub mod config;
pub mod error;
pub mod hash;
pub mod install;
pub mod manifest;
pub mod process;
pub mod trace;
pub mod ui;
pub mod verify;

pub use error::{ActionError, ActionResult};
