//! Destructive reset to an earlier commit.

use std::path::Path;

use colored::Colorize;
use dialoguer::Confirm;

use super::open_session;
use crate::error::Result;

pub fn run_rollback(path: &Path, commit: &str, yes: bool) -> Result<()> {
    let session = open_session(path)?;
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Reset to {commit} and discard everything after it? This cannot be undone"
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Rollback cancelled");
            return Ok(());
        }
    }
    session.rollback(commit)?;
    println!(
        "{} Repository reset to {}",
        "OK".green().bold(),
        commit.yellow()
    );
    Ok(())
}
