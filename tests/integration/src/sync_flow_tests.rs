//! Push and pull flows against local bare remotes
//!
//! The local filesystem transport gives real libgit2 pushes and fetches
//! without any network, so these tests cover the full RUNNING -> terminal
//! lifecycle end to end.

use std::fs;
use std::path::Path;

use gitmate_core::{IdentitySource, Session, SyncError};
use gitmate_git::Identity;
use gitmate_test_utils::git::{bare_remote, commit_file, real_git_repo_with_commit};
use tempfile::TempDir;

/// Identity source for flows where preflight must never need one.
struct NoPrompt;
impl IdentitySource for NoPrompt {
    fn request_identity(&self) -> Option<Identity> {
        None
    }
}

fn bound_session(path: &Path) -> Session {
    let mut session = Session::new();
    session.load_repository(path).unwrap();
    session
}

/// Fresh repository wired to pull from `remote`, with a deterministic
/// `main` branch head.
fn stale_clone(path: &Path, remote: &Path) -> Session {
    let repo = git2::Repository::init(path).unwrap();
    repo.set_head("refs/heads/main").unwrap();
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@test.com").unwrap();
    drop(config);

    let session = bound_session(path);
    session
        .add_remote("origin", &remote.display().to_string())
        .unwrap();
    session
}

fn remote_tip(remote: &Path) -> git2::Oid {
    let repo = git2::Repository::open_bare(remote).unwrap();
    repo.find_reference("refs/heads/main")
        .unwrap()
        .target()
        .unwrap()
}

#[tokio::test]
async fn push_round_trip_updates_the_bare_remote() {
    let work = TempDir::new().unwrap();
    let remote = TempDir::new().unwrap();
    real_git_repo_with_commit(work.path());
    bare_remote(remote.path());

    let session = bound_session(work.path());
    session
        .add_remote("origin", &remote.path().display().to_string())
        .unwrap();

    let task = session.push(&NoPrompt).unwrap();
    task.wait().await.unwrap();

    let local_tip = git2::Repository::open(work.path())
        .unwrap()
        .head()
        .unwrap()
        .target()
        .unwrap();
    assert_eq!(remote_tip(remote.path()), local_tip);
}

#[tokio::test]
async fn second_repository_pulls_pushed_commits() {
    let upstream = TempDir::new().unwrap();
    let remote = TempDir::new().unwrap();
    let downstream = TempDir::new().unwrap();

    real_git_repo_with_commit(upstream.path());
    bare_remote(remote.path());
    let publisher = bound_session(upstream.path());
    publisher
        .add_remote("origin", &remote.path().display().to_string())
        .unwrap();
    publisher.push(&NoPrompt).unwrap().wait().await.unwrap();

    let consumer = stale_clone(downstream.path(), remote.path());
    consumer.pull().unwrap().wait().await.unwrap();

    assert_eq!(consumer.history(None).len(), 1);
    assert!(downstream.path().join("README.md").exists());
}

#[tokio::test]
async fn pull_fast_forwards_after_new_upstream_commits() {
    let upstream = TempDir::new().unwrap();
    let remote = TempDir::new().unwrap();
    let downstream = TempDir::new().unwrap();

    real_git_repo_with_commit(upstream.path());
    bare_remote(remote.path());
    let publisher = bound_session(upstream.path());
    publisher
        .add_remote("origin", &remote.path().display().to_string())
        .unwrap();
    publisher.push(&NoPrompt).unwrap().wait().await.unwrap();

    let consumer = stale_clone(downstream.path(), remote.path());
    consumer.pull().unwrap().wait().await.unwrap();

    commit_file(upstream.path(), "update.txt", "v2", "second commit");
    publisher.push(&NoPrompt).unwrap().wait().await.unwrap();

    consumer.pull().unwrap().wait().await.unwrap();
    let history = consumer.history(None);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].message.trim(), "second commit");
    assert!(downstream.path().join("update.txt").exists());
}

#[tokio::test]
async fn repeated_pull_is_up_to_date() {
    let upstream = TempDir::new().unwrap();
    let remote = TempDir::new().unwrap();
    let downstream = TempDir::new().unwrap();

    real_git_repo_with_commit(upstream.path());
    bare_remote(remote.path());
    let publisher = bound_session(upstream.path());
    publisher
        .add_remote("origin", &remote.path().display().to_string())
        .unwrap();
    publisher.push(&NoPrompt).unwrap().wait().await.unwrap();

    let consumer = stale_clone(downstream.path(), remote.path());
    consumer.pull().unwrap().wait().await.unwrap();
    consumer.pull().unwrap().wait().await.unwrap();

    assert_eq!(consumer.history(None).len(), 1);
}

#[tokio::test]
async fn push_after_pull_round_trips_new_work() {
    let upstream = TempDir::new().unwrap();
    let remote = TempDir::new().unwrap();
    let downstream = TempDir::new().unwrap();

    real_git_repo_with_commit(upstream.path());
    bare_remote(remote.path());
    let publisher = bound_session(upstream.path());
    publisher
        .add_remote("origin", &remote.path().display().to_string())
        .unwrap();
    publisher.push(&NoPrompt).unwrap().wait().await.unwrap();

    let consumer = stale_clone(downstream.path(), remote.path());
    consumer.pull().unwrap().wait().await.unwrap();

    fs::write(downstream.path().join("reply.txt"), "reply").unwrap();
    consumer.stage_all().unwrap();
    consumer.commit("reply from downstream").unwrap();
    consumer.push(&NoPrompt).unwrap().wait().await.unwrap();

    let tip = remote_tip(remote.path());
    let local_tip = git2::Repository::open(downstream.path())
        .unwrap()
        .head()
        .unwrap()
        .target()
        .unwrap();
    assert_eq!(tip, local_tip);
}

#[tokio::test]
async fn pull_refuses_to_overwrite_uncommitted_edits() {
    let upstream = TempDir::new().unwrap();
    let remote = TempDir::new().unwrap();
    let downstream = TempDir::new().unwrap();

    real_git_repo_with_commit(upstream.path());
    bare_remote(remote.path());
    let publisher = bound_session(upstream.path());
    publisher
        .add_remote("origin", &remote.path().display().to_string())
        .unwrap();
    publisher.push(&NoPrompt).unwrap().wait().await.unwrap();

    let consumer = stale_clone(downstream.path(), remote.path());
    consumer.pull().unwrap().wait().await.unwrap();

    // The user edits README.md without committing while upstream rewrites
    // the same file.
    fs::write(downstream.path().join("README.md"), "local edit").unwrap();
    commit_file(upstream.path(), "README.md", "# upstream v2", "second commit");
    publisher.push(&NoPrompt).unwrap().wait().await.unwrap();

    let outcome = consumer.pull().unwrap().wait().await;
    assert!(matches!(outcome, Err(SyncError::Backend { .. })));

    // Nothing was clobbered and the branch pointer did not move.
    assert_eq!(
        fs::read_to_string(downstream.path().join("README.md")).unwrap(),
        "local edit"
    );
    assert_eq!(consumer.history(None).len(), 1);

    // The failure released the slot; discarding the edit unblocks a retry.
    fs::write(downstream.path().join("README.md"), "# Test").unwrap();
    consumer.pull().unwrap().wait().await.unwrap();
    assert_eq!(
        fs::read_to_string(downstream.path().join("README.md")).unwrap(),
        "# upstream v2"
    );
}

#[tokio::test]
async fn missing_local_remote_fails_with_the_backend_message() {
    let work = TempDir::new().unwrap();
    real_git_repo_with_commit(work.path());

    let session = bound_session(work.path());
    session
        .add_remote(
            "origin",
            &work.path().join("does-not-exist").display().to_string(),
        )
        .unwrap();

    let task = session.push(&NoPrompt).unwrap();
    let outcome = task.wait().await;
    assert!(outcome.is_err());

    // The failed operation released the slot; the next one is admitted.
    let task = session.push(&NoPrompt).unwrap();
    assert!(task.wait().await.is_err());
}

#[tokio::test]
async fn unreachable_host_classifies_as_auth_or_connectivity() {
    let work = TempDir::new().unwrap();
    real_git_repo_with_commit(work.path());

    let session = bound_session(work.path());
    // Port 1 on loopback refuses immediately; no external network involved.
    session
        .add_remote("origin", "http://127.0.0.1:1/repo.git")
        .unwrap();

    let task = session.push(&NoPrompt).unwrap();
    let outcome = task.wait().await;
    assert!(matches!(
        outcome,
        Err(SyncError::AuthOrConnectivity { .. })
    ));
}
