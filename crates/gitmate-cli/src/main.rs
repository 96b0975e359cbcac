//! gitmate CLI
//!
//! A friendly assistant for everyday version control: stage, commit, push,
//! pull, history and rollback, with advisory guidance on what to do next.

mod cli;
mod commands;
mod error;

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands, IdentityAction, RemoteAction};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(&cli.repo, cmd).await,
        None => {
            println!("{} a friendly assistant for everyday git", "gitmate".green().bold());
            println!();
            println!("Run {} for available commands.", "gitmate --help".cyan());
            Ok(())
        }
    }
}

async fn execute_command(repo: &Path, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Status { json } => commands::run_status(repo, json),
        Commands::Init => commands::run_init(repo),
        Commands::Stage => commands::run_stage(repo),
        Commands::Commit { message } => commands::run_commit(repo, &message),
        Commands::Push => commands::run_push(repo).await,
        Commands::Pull => commands::run_pull(repo).await,
        Commands::History { days, json } => commands::run_history(repo, days, json),
        Commands::Rollback { commit, yes } => commands::run_rollback(repo, &commit, yes),
        Commands::Remote { action } => match action {
            RemoteAction::Show => commands::run_remote_show(repo),
            RemoteAction::Set { url } => commands::run_remote_set(repo, &url),
        },
        Commands::Identity { action } => match action {
            IdentityAction::Show => commands::run_identity_show(repo),
            IdentityAction::Set { name, email } => {
                commands::run_identity_set(repo, &name, &email)
            }
        },
        Commands::Doctor => commands::run_doctor(),
    }
}
