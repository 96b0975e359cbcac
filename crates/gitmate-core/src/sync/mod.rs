//! Push/pull orchestration.
//!
//! Each network operation is a two-state machine, RUNNING → {COMPLETED |
//! FAILED}, executed on a background unit so the interface-owning context
//! stays responsive. Admission is mutually exclusive: at most one of push or
//! pull may be RUNNING; a second request is rejected with [`SyncError::Busy`]
//! rather than queued. Progress and the terminal outcome travel back over a
//! bounded channel of [`SyncEvent`]s; the terminal event is always last.

mod classify;
mod orchestrator;

use std::fmt;

pub use classify::classify_git_error;
pub use orchestrator::{IdentitySource, SyncOrchestrator, SyncTask};

/// Which network operation is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncKind {
    Push,
    Pull,
}

impl fmt::Display for SyncKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push => write!(f, "push"),
            Self::Pull => write!(f, "pull"),
        }
    }
}

/// Errors produced by the sync orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Another network operation is already RUNNING; the request was not
    /// queued.
    #[error("A {running} is already in progress, wait for it to finish")]
    Busy { running: SyncKind },

    /// No remote named "origin" is configured
    #[error("No remote named 'origin' is configured")]
    NoRemoteConfigured,

    /// The repository has no commits to push
    #[error("The repository has no commits yet")]
    NoCommits,

    /// Author identity could not be resolved, even after asking the caller
    #[error("Author identity (user.name / user.email) is not configured")]
    IdentityMissing,

    /// The remote could not be read or reached: bad URL, missing
    /// permissions, absent SSH key, no connectivity
    #[error("Could not reach the remote: {message}")]
    AuthOrConnectivity { message: String },

    /// Any other backend failure, message passed through verbatim
    #[error("{message}")]
    Backend { message: String },
}

/// Events delivered from a running operation to the interface-owning
/// context. `Completed`/`Failed` is always the final event.
#[derive(Debug)]
pub enum SyncEvent {
    /// Incremental progress; `percent` is 0 when no total is known yet
    Progress { percent: u8, label: String },
    Completed { kind: SyncKind },
    Failed { kind: SyncKind, error: SyncError },
}
