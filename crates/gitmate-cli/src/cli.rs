//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// gitmate - a friendly assistant for everyday git
#[derive(Parser, Debug)]
#[command(name = "gitmate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Repository folder to operate on
    #[arg(short, long, global = true, default_value = ".")]
    pub repo: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show what the repository needs next
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Initialize a new repository in the folder
    Init,

    /// Stage every untracked and modified file
    Stage,

    /// Commit staged changes
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,
    },

    /// Push the current branch to origin
    Push,

    /// Pull updates from origin (fast-forward only)
    Pull,

    /// Show commit history, newest first
    History {
        /// Only show commits from the last N days
        #[arg(long)]
        days: Option<i64>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Reset the repository to an earlier commit, discarding later work
    Rollback {
        /// Target commit (full or abbreviated hash)
        commit: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Inspect or replace remotes
    Remote {
        #[command(subcommand)]
        action: RemoteAction,
    },

    /// Inspect or set the author identity
    Identity {
        #[command(subcommand)]
        action: IdentityAction,
    },

    /// Check the git installation gitmate relies on
    Doctor,
}

/// Remote subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum RemoteAction {
    /// List configured remotes with their URLs
    Show,

    /// Point origin at a URL, replacing any existing origin
    Set {
        /// Remote repository URL
        url: String,
    },
}

/// Identity subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum IdentityAction {
    /// Show the configured author identity
    Show,

    /// Set the author identity
    Set {
        /// Author display name
        name: String,

        /// Author email address
        email: String,
    },
}
