//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// prettier-action - Cached Prettier check for CI
///
/// Installs Prettier and its plugins once per dependency set, snapshots
/// the install in a content-addressed cache, and checks only the files
/// changed since a base revision when one is available.
#[derive(Parser, Debug)]
#[command(name = "prettier-action")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PRETTIER_ACTION_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the cached Prettier check
    Check(CheckArgs),

    /// Manage the local cache store
    Cache(CacheArgs),
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Project directory containing package.json (defaults to current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Base revision to diff against; only changed files are checked
    #[arg(long, env = "GITHUB_BASE_REF")]
    pub base_ref: Option<String>,

    /// Cache store directory
    #[arg(long, env = "PRETTIER_ACTION_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Skip cache restore and save, always install fresh
    #[arg(long)]
    pub no_cache: bool,

    /// Keep node_modules after the check instead of cleaning up
    #[arg(long)]
    pub keep_install: bool,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Cache store directory
    #[arg(long, global = true, env = "PRETTIER_ACTION_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Cache action to perform
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache management actions
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Print the cache store directory
    Dir,

    /// List cache entries
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Remove all cache entries
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Output format for listings
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON array
    Json,
    /// One key per line
    Plain,
}
