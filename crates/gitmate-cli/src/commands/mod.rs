//! Command implementations for the gitmate CLI

mod commit;
mod doctor;
mod history;
mod identity;
mod init;
mod remote;
mod rollback;
mod status;
mod sync;

pub use commit::{run_commit, run_stage};
pub use doctor::run_doctor;
pub use history::run_history;
pub use identity::{run_identity_set, run_identity_show};
pub use init::run_init;
pub use remote::{run_remote_set, run_remote_show};
pub use rollback::run_rollback;
pub use status::run_status;
pub use sync::{run_pull, run_push};

use std::path::Path;

use gitmate_core::Session;

use crate::error::Result;

/// Bind a session to `path`, failing when it is not a repository.
pub(crate) fn open_session(path: &Path) -> Result<Session> {
    let mut session = Session::new();
    session.load_repository(path)?;
    Ok(session)
}
