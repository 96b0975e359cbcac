//! Push and pull with live progress rendering.

use std::path::Path;

use colored::Colorize;
use gitmate_core::{SyncError, SyncEvent, SyncTask};

use super::open_session;
use crate::commands::identity::PromptIdentity;
use crate::error::Result;

pub async fn run_push(path: &Path) -> Result<()> {
    let session = open_session(path)?;
    println!("{} Pushing to {}...", "=>".blue().bold(), "origin".yellow());
    let task = session.push(&PromptIdentity)?;
    render_events(task).await?;
    println!(
        "{} Successfully pushed to {}",
        "OK".green().bold(),
        "origin".yellow()
    );
    Ok(())
}

pub async fn run_pull(path: &Path) -> Result<()> {
    let session = open_session(path)?;
    println!(
        "{} Pulling from {}...",
        "=>".blue().bold(),
        "origin".yellow()
    );
    let task = session.pull()?;
    render_events(task).await?;
    println!(
        "{} Up to date with {}",
        "OK".green().bold(),
        "origin".yellow()
    );
    Ok(())
}

/// Drain events until the terminal one, rendering progress as it arrives.
async fn render_events(mut task: SyncTask) -> Result<()> {
    while let Some(event) = task.next_event().await {
        match event {
            SyncEvent::Progress { percent, label } => {
                println!("   {percent:>3}% {label}");
            }
            SyncEvent::Completed { .. } => return Ok(()),
            SyncEvent::Failed { error, .. } => {
                if matches!(error, SyncError::AuthOrConnectivity { .. }) {
                    print_connectivity_help();
                }
                return Err(error.into());
            }
        }
    }
    Ok(())
}

fn print_connectivity_help() {
    eprintln!("{}", "The remote could not be reached. Check that:".yellow());
    eprintln!(
        "  - the remote URL is correct ({})",
        "gitmate remote show".cyan()
    );
    eprintln!("  - you have permission to access the repository");
    eprintln!("  - your SSH key or credentials are set up");
    eprintln!("  - your network connection is up");
}
