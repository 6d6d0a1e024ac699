//! prettier-action - Cached Prettier check for CI
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use prettier_action::cli::{commands, Cli, Commands};
use prettier_action::error::ActionResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> ActionResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn (clean CI logs), 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("prettier_action=warn"),
        1 => EnvFilter::new("prettier_action=info"),
        _ => EnvFilter::new("prettier_action=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        Commands::Check(args) => commands::check(args, cli.config.as_deref()).await,
        Commands::Cache(args) => commands::cache(args, cli.config.as_deref()).await,
    }
}
