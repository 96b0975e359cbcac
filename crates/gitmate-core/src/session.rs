//! The single bound repository, plus operation gating.
//!
//! The original design kept one repository as ambient state behind
//! decorator-style guards; here it is an explicit object with one
//! validation step at the top of each operation. Local mutations are
//! additionally rejected while a push/pull is RUNNING, making the
//! "no local writes during sync" rule an admission check instead of a race
//! left to backend-level locking.

use std::path::Path;

use chrono::{DateTime, Utc};

use gitmate_git::{CommitRecord, Identity, RepositoryHandle};

use crate::advisor::{self, Advisory};
use crate::sync::{IdentitySource, SyncOrchestrator, SyncTask};
use crate::{Error, Result};

/// One session per process: at most one bound repository, replaced
/// wholesale when the user selects a different folder.
#[derive(Default)]
pub struct Session {
    repo: Option<RepositoryHandle>,
    sync: SyncOrchestrator,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new repository at `path` and bind it.
    ///
    /// # Errors
    ///
    /// Returns `Busy` while a sync is RUNNING, or the init failure.
    pub fn init_repository(&mut self, path: &Path) -> Result<()> {
        self.sync.ensure_idle()?;
        self.repo = Some(RepositoryHandle::init(path)?);
        Ok(())
    }

    /// Open an existing repository at `path` and bind it.
    ///
    /// # Errors
    ///
    /// Returns `Busy` while a sync is RUNNING, or `NotARepository`.
    pub fn load_repository(&mut self, path: &Path) -> Result<()> {
        self.sync.ensure_idle()?;
        self.repo = Some(RepositoryHandle::load(path)?);
        Ok(())
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.repo.is_some()
    }

    /// The bound handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRepository`] when nothing is bound.
    pub fn repository(&self) -> Result<&RepositoryHandle> {
        self.repo.as_ref().ok_or(Error::NoRepository)
    }

    /// Current advisory. Never fails: an unbound session yields the
    /// select-or-initialize message, and a failed status query degrades to
    /// the clean message.
    #[must_use]
    pub fn advise(&self) -> Advisory {
        let Some(repo) = &self.repo else {
            return Advisory::unbound();
        };
        match repo.status_snapshot() {
            Ok(snapshot) => advisor::advise(&snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "status query failed, reporting clean");
                Advisory::clean()
            }
        }
    }

    /// Commit log projection; empty when unbound or on backend error.
    #[must_use]
    pub fn history(&self, since: Option<DateTime<Utc>>) -> Vec<CommitRecord> {
        match &self.repo {
            Some(repo) => repo.history(since),
            None => Vec::new(),
        }
    }

    /// Stage all pending changes.
    ///
    /// # Errors
    ///
    /// Returns `NoRepository`, `Busy`, or the staging failure.
    pub fn stage_all(&self) -> Result<()> {
        let repo = self.local_mutation_guard()?;
        repo.stage_all()?;
        Ok(())
    }

    /// Commit the index, returning the new commit id.
    ///
    /// # Errors
    ///
    /// Returns `NoRepository`, `Busy`, `EmptyIndex`, or `CommitRejected`.
    pub fn commit(&self, message: &str) -> Result<String> {
        let repo = self.local_mutation_guard()?;
        let oid = repo.commit(message)?;
        Ok(oid.to_string())
    }

    /// Hard reset to `commit_id`. The caller confirms first.
    ///
    /// # Errors
    ///
    /// Returns `NoRepository`, `Busy`, or `RollbackTargetNotFound`.
    pub fn rollback(&self, commit_id: &str) -> Result<()> {
        let repo = self.local_mutation_guard()?;
        repo.rollback(commit_id)?;
        Ok(())
    }

    /// Replace the named remote with `url`.
    ///
    /// # Errors
    ///
    /// Returns `NoRepository`, `Busy`, or the configuration failure.
    pub fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        let repo = self.local_mutation_guard()?;
        repo.add_remote(name, url)?;
        Ok(())
    }

    /// Configured remote names; empty when unbound.
    #[must_use]
    pub fn remotes(&self) -> Vec<String> {
        self.repo
            .as_ref()
            .and_then(|repo| repo.remotes().ok())
            .unwrap_or_default()
    }

    /// URL of the named remote, if configured.
    #[must_use]
    pub fn remote_url(&self, name: &str) -> Option<String> {
        self.repo
            .as_ref()
            .and_then(|repo| repo.remote_url(name).ok())
            .flatten()
    }

    /// Author identity, `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns `NoRepository` or a configuration read failure.
    pub fn identity(&self) -> Result<Option<Identity>> {
        Ok(self.repository()?.identity()?)
    }

    /// Write the author identity.
    ///
    /// # Errors
    ///
    /// Returns `NoRepository`, `Busy`, or a configuration write failure.
    pub fn set_identity(&self, name: &str, email: &str) -> Result<()> {
        let repo = self.local_mutation_guard()?;
        repo.set_identity(name, email)?;
        Ok(())
    }

    /// Start a background push.
    ///
    /// # Errors
    ///
    /// Returns `NoRepository`, `Busy`, or a push precondition failure.
    pub fn push(&self, identity: &dyn IdentitySource) -> Result<SyncTask> {
        let repo = self.repository()?;
        Ok(self.sync.start_push(repo, identity)?)
    }

    /// Start a background pull.
    ///
    /// # Errors
    ///
    /// Returns `NoRepository`, `Busy`, or `NoRemoteConfigured`.
    pub fn pull(&self) -> Result<SyncTask> {
        let repo = self.repository()?;
        Ok(self.sync.start_pull(repo)?)
    }

    /// Binding check plus the sync admission check, applied to every local
    /// mutation.
    fn local_mutation_guard(&self) -> Result<&RepositoryHandle> {
        let repo = self.repository()?;
        self.sync.ensure_idle()?;
        Ok(repo)
    }
}
