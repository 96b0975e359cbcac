//! Health check for the git installation.

use colored::Colorize;
use gitmate_git::locate::locate_git;

use crate::error::{CliError, Result};

/// Report where the git executable lives. gitmate talks to repositories
/// through libgit2, but credential helpers and SSH still come from the
/// system installation.
pub fn run_doctor() -> Result<()> {
    match locate_git() {
        Some(path) => {
            println!("{} git executable: {}", "OK".green().bold(), path.display());
            Ok(())
        }
        None => Err(CliError::user(
            "git executable not found. Install git so credential helpers and SSH are available",
        )),
    }
}
