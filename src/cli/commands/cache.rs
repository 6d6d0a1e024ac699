//! Cache command - manage the local cache store

use crate::cache::{format_bytes, DirStore, EntryInfo};
use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config;
use crate::error::{ActionError, ActionResult};
use crate::ui::UiContext;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config_path: Option<&Path>) -> ActionResult<()> {
    let cwd = env::current_dir().map_err(|e| ActionError::io("getting current directory", e))?;
    let config = config::load(config_path, &cwd).await?;

    let root = args
        .cache_dir
        .or(config.cache.dir)
        .unwrap_or_else(DirStore::default_root);
    let store = DirStore::new(root);

    match args.action {
        CacheAction::Dir => {
            println!("{}", store.root().display());
            Ok(())
        }
        CacheAction::List { format } => list_entries(&store, format).await,
        CacheAction::Clear { yes } => clear_entries(&store, yes).await,
    }
}

async fn list_entries(store: &DirStore, format: OutputFormat) -> ActionResult<()> {
    let entries = store.entries().await?;

    if entries.is_empty() {
        println!("No cache entries found.");
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_table(&entries),
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Plain => print_plain(&entries),
    }
    Ok(())
}

fn print_table(entries: &[EntryInfo]) {
    println!("{:<90} {:>10} {:<20}", "KEY", "SIZE", "SAVED");
    println!("{}", "-".repeat(122));

    for entry in entries {
        println!(
            "{:<90} {:>10} {:<20}",
            entry.key,
            format_bytes(entry.size_bytes),
            entry.saved_at.format("%Y-%m-%d %H:%M")
        );
    }

    println!();
    println!("Total: {} entr(ies)", entries.len());
}

fn print_json(entries: &[EntryInfo]) -> ActionResult<()> {
    #[derive(serde::Serialize)]
    struct EntryJson {
        key: String,
        size_bytes: u64,
        saved_at: String,
    }

    let json_entries: Vec<EntryJson> = entries
        .iter()
        .map(|e| EntryJson {
            key: e.key.clone(),
            size_bytes: e.size_bytes,
            saved_at: e.saved_at.to_rfc3339(),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&json_entries)?);
    Ok(())
}

fn print_plain(entries: &[EntryInfo]) {
    for entry in entries {
        println!("{}", entry.key);
    }
}

async fn clear_entries(store: &DirStore, yes: bool) -> ActionResult<()> {
    let entries = store.entries().await?;
    if entries.is_empty() {
        println!("No cache entries to remove.");
        return Ok(());
    }

    if !yes && !confirm(&format!("Remove {} cache entr(ies)?", entries.len()))? {
        println!("Aborted.");
        return Ok(());
    }

    let removed = store.clear().await?;
    println!("Removed {} cache entr(ies).", removed);
    Ok(())
}

/// Ask for confirmation on a TTY; non-interactive runs must pass --yes
fn confirm(prompt: &str) -> ActionResult<bool> {
    let ctx = UiContext::detect();
    if !ctx.is_interactive() {
        return Err(ActionError::command_exec(
            "cache clear",
            "refusing to clear without --yes in a non-interactive session",
        ));
    }

    print!("{prompt} [y/N] ");
    io::stdout()
        .flush()
        .map_err(|e| ActionError::io("flushing stdout", e))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| ActionError::io("reading confirmation", e))?;

    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
