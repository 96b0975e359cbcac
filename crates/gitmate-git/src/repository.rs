//! Repository lifecycle and local mutators.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Author identity, as stored under `user.name` / `user.email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// The one bound working tree.
///
/// Created by [`RepositoryHandle::init`] or [`RepositoryHandle::load`] and
/// replaced wholesale when the user selects a different folder. All local
/// operations are synchronous and expected to complete quickly against a
/// local repository; network operations never go through this handle
/// directly (see `gitmate-core`).
pub struct RepositoryHandle {
    path: PathBuf,
    inner: git2::Repository,
}

impl RepositoryHandle {
    /// Create a new repository at `path` and bind to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InitFailed`] on permission or I/O failure.
    pub fn init(path: &Path) -> Result<Self> {
        let inner = git2::Repository::init(path).map_err(|e| Error::InitFailed {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;
        Ok(Self::bind(inner, path))
    }

    /// Open an existing repository at `path` and bind to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotARepository`] if `path` does not contain a
    /// repository marker.
    pub fn load(path: &Path) -> Result<Self> {
        let inner = git2::Repository::open(path).map_err(|_| Error::NotARepository {
            path: path.to_path_buf(),
        })?;
        Ok(Self::bind(inner, path))
    }

    fn bind(inner: git2::Repository, fallback: &Path) -> Self {
        // Prefer the resolved working directory; dunce strips the \\?\
        // prefix git2 can produce on Windows.
        let path = inner
            .workdir()
            .map(|w| dunce::simplified(w).to_path_buf())
            .unwrap_or_else(|| fallback.to_path_buf());
        Self { path, inner }
    }

    /// The bound working tree location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn raw(&self) -> &git2::Repository {
        &self.inner
    }

    /// Whether at least one commit is reachable from HEAD.
    #[must_use]
    pub fn has_commits(&self) -> bool {
        match self.inner.head() {
            Ok(head) => head.peel_to_commit().is_ok(),
            Err(_) => false,
        }
    }

    /// Stage every untracked and modified file currently present on disk.
    ///
    /// Files that disappear between the status scan and staging are skipped;
    /// a missing-file race is tolerated, not an error. Deletions are never
    /// staged by this operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the status scan or an index write fails.
    pub fn stage_all(&self) -> Result<()> {
        let statuses = self.inner.statuses(Some(
            git2::StatusOptions::new()
                .include_untracked(true)
                .recurse_untracked_dirs(true),
        ))?;

        let mut index = self.inner.index()?;
        for entry in statuses.iter() {
            let status = entry.status();
            let pending = git2::Status::WT_NEW
                | git2::Status::WT_MODIFIED
                | git2::Status::WT_TYPECHANGE
                | git2::Status::WT_RENAMED;
            if !status.intersects(pending) {
                continue;
            }
            let Some(rel) = entry.path() else { continue };
            if !self.path.join(rel).exists() {
                tracing::debug!(file = rel, "file removed since status scan, skipping");
                continue;
            }
            index.add_path(Path::new(rel))?;
        }
        index.write()?;
        Ok(())
    }

    /// Commit the current index with `message`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyIndex`] when nothing is staged, or
    /// [`Error::CommitRejected`] when the backend refuses the commit (for
    /// example when no author signature can be resolved).
    pub fn commit(&self, message: &str) -> Result<git2::Oid> {
        let mut index = self.inner.index()?;

        let parent = match self.inner.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };

        let staged = match &parent {
            Some(commit) => {
                let head_tree = commit.tree()?;
                let diff =
                    self.inner
                        .diff_tree_to_index(Some(&head_tree), Some(&index), None)?;
                diff.deltas().len() > 0
            }
            None => !index.is_empty(),
        };
        if !staged {
            return Err(Error::EmptyIndex);
        }

        let signature = self.inner.signature().map_err(|e| Error::CommitRejected {
            message: e.message().to_string(),
        })?;

        let tree_id = index.write_tree()?;
        let tree = self.inner.find_tree(tree_id)?;
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = self
            .inner
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .map_err(|e| Error::CommitRejected {
                message: e.message().to_string(),
            })?;
        Ok(oid)
    }

    /// Configure a named remote, replacing any existing remote of the same
    /// name. Never merges or duplicates.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote cannot be deleted or recreated.
    pub fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        if self.inner.find_remote(name).is_ok() {
            self.inner.remote_delete(name)?;
        }
        self.inner.remote(name, url)?;
        Ok(())
    }

    /// Names of all configured remotes. Empty when none are configured.
    ///
    /// # Errors
    ///
    /// Returns an error only if the remote list cannot be read.
    pub fn remotes(&self) -> Result<Vec<String>> {
        let names = self.inner.remotes()?;
        Ok(names.iter().flatten().map(String::from).collect())
    }

    /// URL of the named remote, or `None` when it is not configured.
    ///
    /// # Errors
    ///
    /// Never fails for a missing remote; propagates nothing else in
    /// practice.
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        let Ok(remote) = self.inner.find_remote(name) else {
            return Ok(None);
        };
        Ok(remote.url().map(String::from))
    }

    /// Read the author identity, chaining local and global configuration.
    /// Returns `None` when either key is unset rather than failing.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read at all.
    pub fn identity(&self) -> Result<Option<Identity>> {
        let config = self.inner.config()?.snapshot()?;
        let name = config.get_string("user.name").ok();
        let email = config.get_string("user.email").ok();
        Ok(match (name, email) {
            (Some(name), Some(email)) => Some(Identity { name, email }),
            _ => None,
        })
    }

    /// Write the author identity into the repository configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be written.
    pub fn set_identity(&self, name: &str, email: &str) -> Result<()> {
        let mut config = self.inner.config()?;
        config.set_str("user.name", name)?;
        config.set_str("user.email", email)?;
        Ok(())
    }
}
