//! Advisory display.

use std::path::Path;

use colored::Colorize;
use gitmate_core::Session;

use crate::error::Result;

/// Print what the repository needs next.
///
/// A folder that is not a repository is not an error here: the advisory
/// itself tells the user to select or initialize one.
pub fn run_status(path: &Path, json: bool) -> Result<()> {
    let mut session = Session::new();
    let _ = session.load_repository(path);

    let advisory = session.advise();
    if json {
        println!("{}", serde_json::to_string_pretty(advisory.lines())?);
        return Ok(());
    }

    for line in advisory.lines() {
        println!("{} {}", "=>".blue().bold(), line);
    }
    Ok(())
}
