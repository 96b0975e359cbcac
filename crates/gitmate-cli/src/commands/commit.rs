//! Staging and committing.

use std::path::Path;

use colored::Colorize;

use super::open_session;
use crate::error::{CliError, Result};

pub fn run_stage(path: &Path) -> Result<()> {
    let session = open_session(path)?;
    session.stage_all()?;
    println!("{} Staged all pending changes", "OK".green().bold());
    Ok(())
}

pub fn run_commit(path: &Path, message: &str) -> Result<()> {
    if message.trim().is_empty() {
        return Err(CliError::user("Commit message must not be empty"));
    }
    let session = open_session(path)?;
    let id = session.commit(message)?;
    println!("{} Committed {}", "OK".green().bold(), id[..7].yellow());
    Ok(())
}
