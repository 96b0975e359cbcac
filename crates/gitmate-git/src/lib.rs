//! Git backend layer for gitmate
//!
//! Wraps libgit2 behind a small stateful handle plus read-only projections:
//!
//! - [`RepositoryHandle`] — lifecycle (init/load) and local mutators
//!   (staging, commit, remotes, identity, rollback)
//! - [`StatusSnapshot`] — the four structured status facts the advisory
//!   layer consumes, derived fresh on every call
//! - [`CommitRecord`] — display-ready commit log projection
//! - [`locate`] — best-effort discovery of the git executable
//!
//! Network operations (push/pull) live one layer up, in `gitmate-core`,
//! because they need a background execution unit. This crate is entirely
//! synchronous.

pub mod error;
pub mod history;
pub mod locate;
pub mod repository;
pub mod rollback;
pub mod status;

pub use error::{Error, Result};
pub use history::CommitRecord;
pub use repository::{Identity, RepositoryHandle};
pub use status::StatusSnapshot;
