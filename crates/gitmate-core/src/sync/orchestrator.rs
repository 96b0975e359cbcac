//! Background execution of push and pull.
//!
//! The caller's context stays in charge of rendering: a started operation
//! hands back a [`SyncTask`] whose bounded channel delivers progress and the
//! terminal outcome. The network call itself runs on a blocking worker and
//! opens its own `git2::Repository` from the stored path, so the bound
//! handle is never shared across threads.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use gitmate_git::{Identity, RepositoryHandle};

use super::{SyncError, SyncEvent, SyncKind, classify_git_error};

/// Supplies author identity when the repository has none configured.
///
/// Called synchronously from the caller's context during push preflight,
/// before any background work starts. The presentation layer typically
/// implements this with a prompt.
pub trait IdentitySource {
    fn request_identity(&self) -> Option<Identity>;
}

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Admission-controlled launcher for push/pull operations.
pub struct SyncOrchestrator {
    running: Arc<Mutex<Option<SyncKind>>>,
}

impl Default for SyncOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncOrchestrator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            running: Arc::new(Mutex::new(None)),
        }
    }

    /// The operation currently RUNNING, if any.
    #[must_use]
    pub fn running(&self) -> Option<SyncKind> {
        *lock_slot(&self.running)
    }

    /// Reject with [`SyncError::Busy`] while an operation is RUNNING.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Busy`] naming the in-flight operation.
    pub fn ensure_idle(&self) -> Result<(), SyncError> {
        match *lock_slot(&self.running) {
            Some(running) => Err(SyncError::Busy { running }),
            None => Ok(()),
        }
    }

    /// Start a push of the current branch to "origin".
    ///
    /// Preflight, in order: origin configured, at least one commit, author
    /// identity resolvable (with one synchronous round-trip through
    /// `identity` when unset).
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Busy`] when another operation is RUNNING, or a
    /// precondition error; preflight failures never start background work.
    pub fn start_push(
        &self,
        repo: &RepositoryHandle,
        identity: &dyn IdentitySource,
    ) -> Result<SyncTask, SyncError> {
        self.admit(SyncKind::Push)?;
        if let Err(error) = push_preflight(repo, identity) {
            self.release();
            return Err(error);
        }
        let path = repo.path().to_path_buf();
        Ok(self.spawn(SyncKind::Push, move |progress| run_push(&path, progress)))
    }

    /// Start a pull (fetch plus fast-forward) from "origin".
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Busy`] when another operation is RUNNING, or
    /// [`SyncError::NoRemoteConfigured`] when origin is missing.
    pub fn start_pull(&self, repo: &RepositoryHandle) -> Result<SyncTask, SyncError> {
        self.admit(SyncKind::Pull)?;
        if let Err(error) = pull_preflight(repo) {
            self.release();
            return Err(error);
        }
        let path = repo.path().to_path_buf();
        Ok(self.spawn(SyncKind::Pull, move |progress| run_pull(&path, progress)))
    }

    /// Claim the single RUNNING slot. Requests are rejected, never queued.
    pub(crate) fn admit(&self, kind: SyncKind) -> Result<(), SyncError> {
        let mut slot = lock_slot(&self.running);
        if let Some(running) = *slot {
            return Err(SyncError::Busy { running });
        }
        *slot = Some(kind);
        Ok(())
    }

    fn release(&self) {
        *lock_slot(&self.running) = None;
    }

    /// Run `work` on a blocking worker with the RUNNING slot already held.
    ///
    /// The forwarder stops delivering progress the moment `work` returns,
    /// and the terminal event is always the last one on the channel. The
    /// slot is released only after the terminal event is delivered.
    pub(crate) fn spawn<F>(&self, kind: SyncKind, work: F) -> SyncTask
    where
        F: FnOnce(&ProgressForwarder) -> Result<(), SyncError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let live = Arc::new(AtomicBool::new(true));
        let forwarder = ProgressForwarder {
            tx: tx.clone(),
            live: Arc::clone(&live),
        };
        let running = Arc::clone(&self.running);

        let join = tokio::task::spawn_blocking(move || {
            tracing::debug!(%kind, "sync operation started");
            let outcome = work(&forwarder);

            // Leave RUNNING before emitting the terminal event so a
            // straggling progress callback can never land after it.
            live.store(false, Ordering::SeqCst);

            let terminal = match outcome {
                Ok(()) => SyncEvent::Completed { kind },
                Err(error) => {
                    tracing::warn!(%kind, %error, "sync operation failed");
                    SyncEvent::Failed { kind, error }
                }
            };
            let _ = tx.blocking_send(terminal);
            *lock_slot(&running) = None;
        });

        SyncTask {
            kind,
            events: rx,
            join,
        }
    }
}

/// One in-flight push or pull, owned by the interface-owning context.
pub struct SyncTask {
    kind: SyncKind,
    events: mpsc::Receiver<SyncEvent>,
    join: tokio::task::JoinHandle<()>,
}

impl SyncTask {
    #[must_use]
    pub fn kind(&self) -> SyncKind {
        self.kind
    }

    /// Next event, or `None` once the channel is drained after the terminal
    /// event.
    pub async fn next_event(&mut self) -> Option<SyncEvent> {
        self.events.recv().await
    }

    /// Drain all events and reduce to the terminal outcome. For callers
    /// that do not render incremental progress.
    ///
    /// # Errors
    ///
    /// Returns the error carried by the terminal `Failed` event.
    pub async fn wait(mut self) -> Result<(), SyncError> {
        let mut outcome = Ok(());
        while let Some(event) = self.events.recv().await {
            match event {
                SyncEvent::Completed { .. } => outcome = Ok(()),
                SyncEvent::Failed { error, .. } => outcome = Err(error),
                SyncEvent::Progress { .. } => {}
            }
        }
        if let Err(e) = self.join.await {
            tracing::warn!(error = %e, "sync worker join failed");
        }
        outcome
    }
}

/// Bridges backend progress callbacks onto the event channel.
///
/// Progress is dropped, not queued, once the operation has left RUNNING
/// state, so a sink never updates for a stale operation.
#[derive(Clone)]
pub(crate) struct ProgressForwarder {
    tx: mpsc::Sender<SyncEvent>,
    live: Arc<AtomicBool>,
}

impl ProgressForwarder {
    pub(crate) fn report(&self, current: usize, total: usize, label: &str) {
        if !self.live.load(Ordering::SeqCst) {
            tracing::debug!(label, "dropped progress event for a finished operation");
            return;
        }
        // No total known yet: report 0 rather than failing.
        let percent = if total == 0 {
            0
        } else {
            ((current.min(total) * 100) / total) as u8
        };
        let event = SyncEvent::Progress {
            percent,
            label: label.to_string(),
        };
        if self.tx.try_send(event).is_err() {
            tracing::trace!(percent, "progress event dropped, channel full or closed");
        }
    }
}

fn lock_slot(slot: &Mutex<Option<SyncKind>>) -> MutexGuard<'_, Option<SyncKind>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

fn push_preflight(
    repo: &RepositoryHandle,
    identity: &dyn IdentitySource,
) -> Result<(), SyncError> {
    if !repo
        .remotes()
        .map_err(backend)?
        .iter()
        .any(|name| name == "origin")
    {
        return Err(SyncError::NoRemoteConfigured);
    }
    if !repo.has_commits() {
        return Err(SyncError::NoCommits);
    }
    if repo.identity().map_err(backend)?.is_none() {
        match identity.request_identity() {
            Some(id) => repo.set_identity(&id.name, &id.email).map_err(backend)?,
            None => return Err(SyncError::IdentityMissing),
        }
    }
    Ok(())
}

fn pull_preflight(repo: &RepositoryHandle) -> Result<(), SyncError> {
    if !repo
        .remotes()
        .map_err(backend)?
        .iter()
        .any(|name| name == "origin")
    {
        return Err(SyncError::NoRemoteConfigured);
    }
    Ok(())
}

fn backend(error: gitmate_git::Error) -> SyncError {
    SyncError::Backend {
        message: error.to_string(),
    }
}

fn open_repo(path: &Path) -> Result<git2::Repository, SyncError> {
    git2::Repository::open(path).map_err(|e| classify_git_error(&e))
}

/// Current branch name from the HEAD symbolic reference. Works for unborn
/// branches too, which plain `Repository::head` does not.
fn head_branch_name(repo: &git2::Repository) -> Result<String, SyncError> {
    let head = repo
        .find_reference("HEAD")
        .map_err(|e| classify_git_error(&e))?;
    match head.symbolic_target() {
        Some(target) => Ok(target.trim_start_matches("refs/heads/").to_string()),
        None => Err(SyncError::Backend {
            message: "HEAD is detached; check out a branch before syncing".to_string(),
        }),
    }
}

fn run_push(path: &Path, progress: &ProgressForwarder) -> Result<(), SyncError> {
    let repo = open_repo(path)?;
    let branch = head_branch_name(&repo)?;

    let mut remote = repo
        .find_remote("origin")
        .map_err(|e| classify_git_error(&e))?;

    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.push_transfer_progress(|current, total, _bytes| {
        progress.report(current, total, "Writing objects");
    });
    let mut options = git2::PushOptions::new();
    options.remote_callbacks(callbacks);

    let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
    remote
        .push(&[&refspec], Some(&mut options))
        .map_err(|e| classify_git_error(&e))?;

    set_upstream_to_origin(&repo, &branch);
    Ok(())
}

/// Point the branch at its remote-tracking counterpart after a first push,
/// so the ahead-of-remote status fact tracks from then on. Best effort.
fn set_upstream_to_origin(repo: &git2::Repository, branch: &str) {
    let result = repo
        .find_branch(branch, git2::BranchType::Local)
        .and_then(|mut local| local.set_upstream(Some(&format!("origin/{branch}"))));
    if let Err(e) = result {
        tracing::debug!(branch, error = %e, "upstream not set after push");
    }
}

fn run_pull(path: &Path, progress: &ProgressForwarder) -> Result<(), SyncError> {
    let repo = open_repo(path)?;
    let branch = head_branch_name(&repo)?;

    let mut remote = repo
        .find_remote("origin")
        .map_err(|e| classify_git_error(&e))?;

    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.transfer_progress(|stats| {
        progress.report(
            stats.received_objects(),
            stats.total_objects(),
            "Receiving objects",
        );
        true
    });
    let mut options = git2::FetchOptions::new();
    options.remote_callbacks(callbacks);

    remote
        .fetch(&[branch.as_str()], Some(&mut options), None)
        .map_err(|e| classify_git_error(&e))?;

    fast_forward(&repo, &branch)
}

/// Apply fetched changes: fast-forward only. Merge workflows are out of
/// scope; a diverged history is a failure the user resolves elsewhere.
fn fast_forward(repo: &git2::Repository, branch: &str) -> Result<(), SyncError> {
    let Ok(fetch_head) = repo.find_reference("FETCH_HEAD") else {
        // Nothing fetched (empty remote); already up to date.
        return Ok(());
    };
    let fetch_commit = fetch_head
        .peel_to_commit()
        .map_err(|e| classify_git_error(&e))?;
    let annotated = repo
        .find_annotated_commit(fetch_commit.id())
        .map_err(|e| classify_git_error(&e))?;
    let (analysis, _) = repo
        .merge_analysis(&[&annotated])
        .map_err(|e| classify_git_error(&e))?;

    if analysis.is_up_to_date() {
        return Ok(());
    }

    if !(analysis.is_fast_forward() || analysis.is_unborn()) {
        return Err(SyncError::Backend {
            message: format!(
                "cannot fast-forward '{branch}': local and remote histories have diverged"
            ),
        });
    }

    let refname = format!("refs/heads/{branch}");
    match repo.find_reference(&refname) {
        Ok(mut reference) => {
            // Safe checkout runs before the branch pointer moves:
            // uncommitted local edits block the pull and leave the
            // repository exactly as it was.
            repo.checkout_tree(
                fetch_commit.as_object(),
                Some(git2::build::CheckoutBuilder::default().safe()),
            )
            .map_err(checkout_blocked)?;
            reference
                .set_target(
                    fetch_commit.id(),
                    &format!("pull: fast-forward to {}", fetch_commit.id()),
                )
                .map_err(|e| classify_git_error(&e))?;
            repo.set_head(&refname).map_err(|e| classify_git_error(&e))?;
        }
        Err(_) => {
            // Unborn local branch: create it at the fetched tip. No local
            // commits exist yet, so the forced first checkout cannot
            // discard committed work.
            repo.reference(
                &refname,
                fetch_commit.id(),
                true,
                "pull: branch created from fetch",
            )
            .map_err(|e| classify_git_error(&e))?;
            repo.set_head(&refname).map_err(|e| classify_git_error(&e))?;
            repo.checkout_head(Some(git2::build::CheckoutBuilder::default().force()))
                .map_err(|e| classify_git_error(&e))?;
        }
    }
    Ok(())
}

/// A checkout conflict means uncommitted local edits sit in the way of the
/// fast-forward; report that in the user's terms instead of libgit2's.
fn checkout_blocked(error: git2::Error) -> SyncError {
    if error.code() == git2::ErrorCode::Conflict {
        return SyncError::Backend {
            message: "uncommitted local changes would be overwritten by this pull; \
                      commit or discard them first"
                .to_string(),
        };
    }
    classify_git_error(&error)
}
