//! Advisory and sync orchestration layer for gitmate
//!
//! Sits between the git backend (`gitmate-git`) and the presentation layer:
//!
//! ```text
//!        presentation (CLI / GUI)
//!                  |
//!             gitmate-core
//!        (advisor, sync, session)
//!                  |
//!             gitmate-git
//!              (libgit2)
//! ```
//!
//! - [`advisor`] — pure projection of a status snapshot into ordered,
//!   human-readable recommendations
//! - [`sync`] — push/pull as background, progress-reporting operations with
//!   admission-time mutual exclusion and transport failure classification
//! - [`session`] — the single bound repository handle plus operation gating

pub mod advisor;
pub mod error;
pub mod session;
pub mod sync;

pub use advisor::{Advisory, advise};
pub use error::{Error, Result};
pub use session::Session;
pub use sync::{IdentitySource, SyncError, SyncEvent, SyncKind, SyncOrchestrator, SyncTask};
