//! Repository-state advisory.
//!
//! Pure projection of a [`StatusSnapshot`] into an ordered list of
//! human-readable recommendations. The function is deterministic and
//! side-effect free: it never touches the repository, and two calls against
//! the same snapshot yield identical output.

use gitmate_git::StatusSnapshot;

/// The messages the advisor can emit, exposed so the presentation layer and
/// tests refer to one copy of each string.
pub mod messages {
    pub const STAGE_THEN_COMMIT: &str =
        "You have both unstaged and staged changes. Stage everything first, then commit.";
    pub const STAGE: &str =
        "The working tree has unstaged changes. Stage them to include them in the next commit.";
    pub const COMMIT: &str =
        "The staging area has changes waiting. Commit them to record a snapshot.";
    pub const PUSH: &str =
        "Local commits have not been pushed. Push to back them up to the remote.";
    pub const CONFIGURE_REMOTE: &str =
        "No remote is configured. Add a repository URL to enable push and pull.";
    pub const CLEAN: &str = "The repository is clean. Nothing to do.";
    pub const NO_REPOSITORY: &str = "Select or initialize a repository to get started.";
}

/// Ordered sequence of recommendations. Never empty: when no condition
/// triggers it carries the single clean message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    lines: Vec<String>,
}

impl Advisory {
    /// The recommendation lines, highest priority first.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether the advisory is the single clean message.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.lines.len() == 1 && self.lines[0] == messages::CLEAN
    }

    /// Advisory for a session with no bound repository.
    #[must_use]
    pub fn unbound() -> Self {
        Self {
            lines: vec![messages::NO_REPOSITORY.to_string()],
        }
    }

    /// Advisory when status could not be read; degrade to the clean message
    /// rather than propagating.
    #[must_use]
    pub fn clean() -> Self {
        Self {
            lines: vec![messages::CLEAN.to_string()],
        }
    }
}

/// Derive the advisory for a snapshot.
///
/// Precedence: the combined stage-then-commit line outranks either single
/// staging line; the push and configure-remote lines are independent and
/// appended after, in that order.
#[must_use]
pub fn advise(snapshot: &StatusSnapshot) -> Advisory {
    let mut lines: Vec<&str> = Vec::new();

    if snapshot.unstaged && snapshot.staged {
        lines.push(messages::STAGE_THEN_COMMIT);
    } else if snapshot.unstaged {
        lines.push(messages::STAGE);
    } else if snapshot.staged {
        lines.push(messages::COMMIT);
    }

    if snapshot.ahead {
        lines.push(messages::PUSH);
    }
    if !snapshot.remote_configured {
        lines.push(messages::CONFIGURE_REMOTE);
    }

    if lines.is_empty() {
        lines.push(messages::CLEAN);
    }

    Advisory {
        lines: lines.into_iter().map(String::from).collect(),
    }
}
