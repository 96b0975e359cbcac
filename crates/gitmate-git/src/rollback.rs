//! Hard reset to an earlier commit.

use crate::{Error, RepositoryHandle, Result};

impl RepositoryHandle {
    /// Move the branch pointer and working tree to `commit_id`, discarding
    /// everything committed after it.
    ///
    /// Irreversible by gitmate; the confirmation gate lives with the caller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RollbackTargetNotFound`] when `commit_id` does not
    /// resolve to a commit in this repository.
    pub fn rollback(&self, commit_id: &str) -> Result<()> {
        let target = self
            .raw()
            .revparse_single(commit_id)
            .and_then(|object| object.peel(git2::ObjectType::Commit))
            .map_err(|_| Error::RollbackTargetNotFound {
                reference: commit_id.to_string(),
            })?;

        self.raw().reset(&target, git2::ResetType::Hard, None)?;
        Ok(())
    }
}
