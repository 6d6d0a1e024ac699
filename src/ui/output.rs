//! Output functions for consistent CLI formatting
//!
//! The console crate strips styling on its own when stdout is not a
//! terminal, so these render cleanly in CI logs.

use console::style;

/// Display an intro banner
pub fn intro(title: &str) {
    println!("{}", style(title).cyan().bold());
}

/// Display a success step
pub fn step_ok(message: &str) {
    println!("  {} {}", style("[OK]").green(), message);
}

/// Display an info step
pub fn step_info(message: &str) {
    println!("  {} {}", style("[INFO]").cyan(), message);
}

/// Display a warning step
pub fn step_warn(message: &str) {
    println!("  {} {}", style("[WARN]").yellow(), message);
}

/// Display a success outro
pub fn outro_success(message: &str) {
    println!();
    println!("{} {}", style("[OK]").green(), message);
}
