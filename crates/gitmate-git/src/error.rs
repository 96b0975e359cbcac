//! Error types for gitmate-git

use std::path::PathBuf;

/// Result type for gitmate-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gitmate-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Underlying libgit2 error
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// Repository creation failed (permissions, I/O)
    #[error("Failed to initialize repository at {path}: {message}")]
    InitFailed { path: PathBuf, message: String },

    /// The path does not contain a git repository
    #[error("Not a git repository: {path}")]
    NotARepository { path: PathBuf },

    /// Commit requested with nothing staged
    #[error("Nothing is staged to commit")]
    EmptyIndex,

    /// The backend refused the commit (e.g. no resolvable signature)
    #[error("Commit rejected: {message}")]
    CommitRejected { message: String },

    /// Rollback target does not resolve to a commit in this repository
    #[error("'{reference}' does not resolve to a commit in this repository")]
    RollbackTargetNotFound { reference: String },
}
