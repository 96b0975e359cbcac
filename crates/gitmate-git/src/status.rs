//! Structured working-tree status facts.
//!
//! The advisory layer consumes exactly four booleans. They are queried as
//! structured fields from libgit2, never scraped out of a human-readable
//! status report, and derived fresh on every call so concurrent external
//! edits are always reflected.

use serde::Serialize;

use crate::{RepositoryHandle, Result};

/// Point-in-time status facts. Never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    /// Working tree differs from the index
    pub unstaged: bool,
    /// Index differs from HEAD
    pub staged: bool,
    /// Local branch is ahead of its remote-tracking branch
    pub ahead: bool,
    /// At least one remote is configured
    pub remote_configured: bool,
}

impl RepositoryHandle {
    /// Compute the current [`StatusSnapshot`].
    ///
    /// # Errors
    ///
    /// Returns an error if the status scan fails.
    pub fn status_snapshot(&self) -> Result<StatusSnapshot> {
        let statuses = self.raw().statuses(Some(
            git2::StatusOptions::new()
                .include_untracked(true)
                .recurse_untracked_dirs(true),
        ))?;

        let worktree_pending = git2::Status::WT_NEW
            | git2::Status::WT_MODIFIED
            | git2::Status::WT_DELETED
            | git2::Status::WT_TYPECHANGE
            | git2::Status::WT_RENAMED;
        let index_pending = git2::Status::INDEX_NEW
            | git2::Status::INDEX_MODIFIED
            | git2::Status::INDEX_DELETED
            | git2::Status::INDEX_TYPECHANGE
            | git2::Status::INDEX_RENAMED;

        let mut unstaged = false;
        let mut staged = false;
        for entry in statuses.iter() {
            let status = entry.status();
            unstaged |= status.intersects(worktree_pending);
            staged |= status.intersects(index_pending);
        }

        Ok(StatusSnapshot {
            unstaged,
            staged,
            ahead: self.commits_ahead()? > 0,
            remote_configured: !self.remotes()?.is_empty(),
        })
    }

    /// How far the current branch is ahead of its upstream. Zero when HEAD
    /// is unborn, detached, or the branch has no upstream configured.
    fn commits_ahead(&self) -> Result<usize> {
        let head = match self.raw().head() {
            Ok(head) => head,
            Err(_) => return Ok(0),
        };
        if !head.is_branch() {
            return Ok(0);
        }
        let Some(local) = head.target() else {
            return Ok(0);
        };

        let branch = git2::Branch::wrap(head);
        let Ok(upstream) = branch.upstream() else {
            return Ok(0);
        };
        let Some(remote_tip) = upstream.get().target() else {
            return Ok(0);
        };

        let (ahead, _behind) = self.raw().graph_ahead_behind(local, remote_tip)?;
        Ok(ahead)
    }
}

#[cfg(test)]
mod tests {
    use crate::RepositoryHandle;
    use gitmate_test_utils::git::{real_git_repo_with_commit, repo_with_pushed_remote};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn clean_repository_has_no_pending_facts() {
        let dir = TempDir::new().unwrap();
        real_git_repo_with_commit(dir.path());
        let handle = RepositoryHandle::load(dir.path()).unwrap();

        let snapshot = handle.status_snapshot().unwrap();
        assert!(!snapshot.unstaged);
        assert!(!snapshot.staged);
        assert!(!snapshot.ahead);
        assert!(!snapshot.remote_configured);
    }

    #[test]
    fn untracked_file_sets_unstaged_only() {
        let dir = TempDir::new().unwrap();
        real_git_repo_with_commit(dir.path());
        let handle = RepositoryHandle::load(dir.path()).unwrap();

        fs::write(dir.path().join("scratch.txt"), "x").unwrap();
        let snapshot = handle.status_snapshot().unwrap();
        assert!(snapshot.unstaged);
        assert!(!snapshot.staged);
    }

    #[test]
    fn staging_moves_the_fact_from_unstaged_to_staged() {
        let dir = TempDir::new().unwrap();
        real_git_repo_with_commit(dir.path());
        let handle = RepositoryHandle::load(dir.path()).unwrap();

        fs::write(dir.path().join("scratch.txt"), "x").unwrap();
        handle.stage_all().unwrap();

        let snapshot = handle.status_snapshot().unwrap();
        assert!(!snapshot.unstaged);
        assert!(snapshot.staged);
    }

    #[test]
    fn worktree_deletion_counts_as_unstaged() {
        let dir = TempDir::new().unwrap();
        real_git_repo_with_commit(dir.path());
        let handle = RepositoryHandle::load(dir.path()).unwrap();

        fs::remove_file(dir.path().join("README.md")).unwrap();
        let snapshot = handle.status_snapshot().unwrap();
        assert!(snapshot.unstaged);
    }

    #[test]
    fn remote_configured_flag_tracks_remotes() {
        let dir = TempDir::new().unwrap();
        real_git_repo_with_commit(dir.path());
        let handle = RepositoryHandle::load(dir.path()).unwrap();

        assert!(!handle.status_snapshot().unwrap().remote_configured);
        handle
            .add_remote("origin", "https://example.com/r.git")
            .unwrap();
        assert!(handle.status_snapshot().unwrap().remote_configured);
    }

    #[test]
    fn local_commit_after_push_sets_ahead() {
        let work = TempDir::new().unwrap();
        let remote = TempDir::new().unwrap();
        repo_with_pushed_remote(work.path(), remote.path());
        let handle = RepositoryHandle::load(work.path()).unwrap();

        assert!(!handle.status_snapshot().unwrap().ahead);

        fs::write(work.path().join("more.txt"), "more").unwrap();
        handle.stage_all().unwrap();
        handle.commit("one more").unwrap();

        assert!(handle.status_snapshot().unwrap().ahead);
    }

    #[test]
    fn snapshot_is_stable_for_unchanged_repository() {
        let dir = TempDir::new().unwrap();
        real_git_repo_with_commit(dir.path());
        let handle = RepositoryHandle::load(dir.path()).unwrap();

        fs::write(dir.path().join("scratch.txt"), "x").unwrap();
        let first = handle.status_snapshot().unwrap();
        let second = handle.status_snapshot().unwrap();
        assert_eq!(first, second);
    }
}
