//! Commit log projection for display.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::{RepositoryHandle, Result};

/// Display-ready view of a single commit. Never constructed by gitmate,
/// only projected from the backend's log.
#[derive(Debug, Clone, Serialize)]
pub struct CommitRecord {
    /// Full commit hash
    pub id: String,
    /// Commit time (not author time)
    pub timestamp: DateTime<Utc>,
    /// Raw, untrimmed commit message
    pub message: String,
    /// Author display name
    pub author: String,
}

impl CommitRecord {
    /// Hash truncated to 7 characters for display.
    #[must_use]
    pub fn short_id(&self) -> &str {
        &self.id[..self.id.len().min(7)]
    }

    /// First line of the message, for list rows.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

impl RepositoryHandle {
    /// Project the commit log, newest first, optionally bounded by `since`.
    ///
    /// The revwalk is time-sorted newest-first, so a `since` bound ends the
    /// scan at the first commit older than it, a prefix scan rather than a
    /// filter over the whole history. History display is best-effort: any backend
    /// error yields an empty sequence.
    #[must_use]
    pub fn history(&self, since: Option<DateTime<Utc>>) -> Vec<CommitRecord> {
        match self.walk_history(since) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "history query failed, showing empty log");
                Vec::new()
            }
        }
    }

    fn walk_history(&self, since: Option<DateTime<Utc>>) -> Result<Vec<CommitRecord>> {
        let repo = self.raw();
        let mut revwalk = repo.revwalk()?;
        revwalk.push_head()?;
        revwalk.set_sorting(git2::Sort::TIME)?;

        let mut records = Vec::new();
        for oid in revwalk {
            let commit = repo.find_commit(oid?)?;
            let Some(timestamp) = Utc.timestamp_opt(commit.time().seconds(), 0).single() else {
                // An epoch fallback would end a `since` prefix scan early;
                // skip the record instead.
                tracing::warn!(
                    id = %commit.id(),
                    seconds = commit.time().seconds(),
                    "commit time out of representable range, skipping record"
                );
                continue;
            };

            if let Some(bound) = since
                && timestamp < bound
            {
                break;
            }

            let author = commit.author();
            records.push(CommitRecord {
                id: commit.id().to_string(),
                timestamp,
                message: commit.message().unwrap_or("").to_string(),
                author: author.name().unwrap_or("Unknown").to_string(),
            });
        }
        Ok(records)
    }
}
