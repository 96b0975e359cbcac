//! Remote inspection and replacement.

use std::path::Path;

use colored::Colorize;

use super::open_session;
use crate::error::Result;

pub fn run_remote_show(path: &Path) -> Result<()> {
    let session = open_session(path)?;
    let remotes = session.remotes();
    if remotes.is_empty() {
        println!("No remotes configured");
        return Ok(());
    }
    for name in remotes {
        let url = session.remote_url(&name).unwrap_or_default();
        println!("{name}\t{url}");
    }
    Ok(())
}

pub fn run_remote_set(path: &Path, url: &str) -> Result<()> {
    let session = open_session(path)?;
    session.add_remote("origin", url)?;
    println!("{} origin -> {url}", "OK".green().bold());
    Ok(())
}
