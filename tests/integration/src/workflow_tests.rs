//! End-to-end local workflows through the session layer
//!
//! These tests exercise the complete advisory cycle a user walks through:
//! init -> edit -> stage -> commit -> remote setup, plus rollback.

use std::fs;

use gitmate_core::advisor::messages;
use gitmate_core::Session;
use gitmate_test_utils::git::{commit_file, real_git_repo_with_commit};
use tempfile::TempDir;

#[test]
fn advisory_cycle_follows_the_user_from_init_to_clean() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::new();
    session.init_repository(dir.path()).unwrap();
    session.set_identity("Test User", "test@test.com").unwrap();

    // Fresh repository: nothing staged, nothing to push, no remote.
    assert_eq!(
        session.advise().lines(),
        &[messages::CONFIGURE_REMOTE.to_string()]
    );

    fs::write(dir.path().join("notes.txt"), "first note").unwrap();
    assert_eq!(session.advise().lines()[0], messages::STAGE);

    session.stage_all().unwrap();
    assert_eq!(session.advise().lines()[0], messages::COMMIT);

    session.commit("add notes").unwrap();
    assert_eq!(
        session.advise().lines(),
        &[messages::CONFIGURE_REMOTE.to_string()]
    );

    session
        .add_remote("origin", "https://example.com/notes.git")
        .unwrap();
    assert!(session.advise().is_clean());
}

#[test]
fn partial_staging_surfaces_the_combined_message() {
    let dir = TempDir::new().unwrap();
    real_git_repo_with_commit(dir.path());
    let mut session = Session::new();
    session.load_repository(dir.path()).unwrap();
    session
        .add_remote("origin", "https://example.com/r.git")
        .unwrap();

    fs::write(dir.path().join("staged.txt"), "staged").unwrap();
    session.stage_all().unwrap();
    fs::write(dir.path().join("unstaged.txt"), "unstaged").unwrap();

    assert_eq!(session.advise().lines()[0], messages::STAGE_THEN_COMMIT);
}

#[test]
fn rollback_round_trip_restores_the_earlier_tree() {
    let dir = TempDir::new().unwrap();
    real_git_repo_with_commit(dir.path());
    commit_file(dir.path(), "keep.txt", "keep", "second commit");
    commit_file(dir.path(), "drop.txt", "drop", "third commit");

    let mut session = Session::new();
    session.load_repository(dir.path()).unwrap();
    assert_eq!(session.history(None).len(), 3);

    let second = session.history(None)[1].id.clone();
    session.rollback(&second).unwrap();

    let history = session.history(None);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].message.trim(), "second commit");
    assert!(dir.path().join("keep.txt").exists());
    assert!(!dir.path().join("drop.txt").exists());

    // The repository keeps working after the reset.
    commit_file(dir.path(), "next.txt", "next", "fourth commit");
    assert_eq!(session.history(None).len(), 3);
}

#[test]
fn rollback_by_short_hash_matches_full_hash() {
    let dir = TempDir::new().unwrap();
    real_git_repo_with_commit(dir.path());
    commit_file(dir.path(), "extra.txt", "extra", "second commit");

    let mut session = Session::new();
    session.load_repository(dir.path()).unwrap();
    let history = session.history(None);
    let target = history[1].short_id().to_string();

    session.rollback(&target).unwrap();
    assert_eq!(session.history(None).len(), 1);
}
