//! Transport failure classification.
//!
//! The presentation layer drives two distinct recovery paths: a guided
//! troubleshooting flow for auth/connectivity trouble, and a raw error view
//! for everything else. The distinction is made here, once, as a first-class
//! error kind.

use git2::{ErrorClass, ErrorCode};

use super::SyncError;

/// Message fragments libgit2 and common transports emit when a remote
/// cannot be read or reached.
const REMOTE_UNREADABLE_INDICATORS: &[&str] = &[
    "could not read from remote",
    "authentication",
    "failed to connect",
    "connection refused",
    "connection timed out",
    "could not resolve",
    "unable to access",
    "permission denied",
    "publickey",
];

/// Classify a backend error into [`SyncError::AuthOrConnectivity`] or
/// [`SyncError::Backend`].
#[must_use]
pub fn classify_git_error(error: &git2::Error) -> SyncError {
    let message = error.message().to_string();

    let transport_class = matches!(
        error.class(),
        ErrorClass::Net | ErrorClass::Ssh | ErrorClass::Http
    );
    let auth_code = matches!(error.code(), ErrorCode::Auth | ErrorCode::Certificate);
    let lowered = message.to_lowercase();
    let unreadable_message = REMOTE_UNREADABLE_INDICATORS
        .iter()
        .any(|fragment| lowered.contains(fragment));

    if transport_class || auth_code || unreadable_message {
        SyncError::AuthOrConnectivity { message }
    } else {
        SyncError::Backend { message }
    }
}
