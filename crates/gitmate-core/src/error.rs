//! Error types for gitmate-core

/// Result type for gitmate-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gitmate-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No repository is bound to the session
    #[error("No repository selected. Open a folder or initialize one first")]
    NoRepository,

    /// Git error from gitmate-git
    #[error(transparent)]
    Git(#[from] gitmate_git::Error),

    /// Sync error from the orchestrator
    #[error(transparent)]
    Sync(#[from] crate::sync::SyncError),
}
