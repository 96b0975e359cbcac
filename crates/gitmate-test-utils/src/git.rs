//! Git repository fixtures at graded realism levels.
//!
//! Choose the lowest-realism fixture that satisfies your test's needs —
//! fakes are faster and have fewer external dependencies.

use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Commits made through the `git` CLI within the same second have an
/// unspecified relative order under a time-sorted revwalk, so every
/// CLI-made commit is stamped with a strictly increasing committer date.
static COMMIT_CLOCK: AtomicI64 = AtomicI64::new(0);

fn next_commit_date() -> String {
    let tick = COMMIT_CLOCK.fetch_add(1, Ordering::Relaxed);
    format!("{} +0000", Utc::now().timestamp() + tick)
}

/// Creates a minimal `.git` directory structure **without** initialising a
/// real git repository.
///
/// Realism level: **FAKE** — directory structure only, no git object store.
///
/// Use for: tests that need a `.git` marker to satisfy path detection logic
/// but do not perform any real git operations.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn fake_git_dir(path: &Path) {
    fs::create_dir(path.join(".git"))
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to create .git: {e}"));
    fs::write(path.join(".git/HEAD"), "ref: refs/heads/main\n")
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to write HEAD: {e}"));
    fs::create_dir_all(path.join(".git/refs/heads"))
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to create refs/heads: {e}"));
    fs::write(path.join(".git/refs/heads/main"), "")
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to write refs/heads/main: {e}"));
}

/// Initialises a real git repository using `git2`, with a test identity in
/// the local config but no commits.
///
/// Realism level: **REAL** — valid git object store, empty history.
///
/// # Panics
/// Panics if `git2::Repository::init` or the config write fails.
pub fn real_git_repo(path: &Path) -> git2::Repository {
    let repo = git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    });
    {
        let mut config = repo
            .config()
            .unwrap_or_else(|e| panic!("real_git_repo: failed to open config: {e}"));
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@test.com").unwrap();
    }
    repo
}

/// Initialises a real git repository with an initial commit using the `git`
/// CLI.
///
/// Realism level: **REAL WITH HISTORY** — valid git state, `main` branch,
/// one commit in history.
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) {
    run_git(path, &["init"]);
    run_git(path, &["config", "user.email", "test@test.com"]);
    run_git(path, &["config", "user.name", "Test User"]);
    run_git(path, &["config", "commit.gpgsign", "false"]);

    fs::write(path.join("README.md"), "# Test")
        .unwrap_or_else(|e| panic!("real_git_repo_with_commit: failed to write README.md: {e}"));

    run_git(path, &["add", "."]);
    run_git_commit(path, "Initial commit");
    // Best-effort: older git versions may not support this flag
    let _ = Command::new("git")
        .args(["branch", "-m", "main"])
        .current_dir(path)
        .output();
}

/// Writes `content` to `file` and commits it via the `git` CLI.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_file(path: &Path, file: &str, content: &str, message: &str) {
    fs::write(path.join(file), content)
        .unwrap_or_else(|e| panic!("commit_file: failed to write {file}: {e}"));
    run_git(path, &["add", file]);
    run_git_commit(path, message);
}

/// Creates a commit with a controlled timestamp using `git2` directly.
///
/// Both author and committer time are set to `when`, so time-windowed
/// history queries see deterministic boundaries. The commit touches a file
/// named after the message so every commit has distinct content.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_at(repo: &git2::Repository, message: &str, when: DateTime<Utc>) -> git2::Oid {
    let workdir = repo.workdir().expect("commit_at: bare repository");
    let file = format!("{}.txt", message.replace(' ', "_"));
    fs::write(workdir.join(&file), message)
        .unwrap_or_else(|e| panic!("commit_at: failed to write {file}: {e}"));

    let mut index = repo.index().expect("commit_at: failed to open index");
    index
        .add_path(Path::new(&file))
        .expect("commit_at: failed to stage file");
    index.write().expect("commit_at: failed to write index");

    let time = git2::Time::new(when.timestamp(), 0);
    let sig = git2::Signature::new("Test User", "test@test.com", &time)
        .expect("commit_at: failed to build signature");

    let tree_id = index.write_tree().expect("commit_at: failed to write tree");
    let tree = repo.find_tree(tree_id).expect("commit_at: missing tree");

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("commit_at: commit failed")
}

/// Initialises a bare repository at `path`, suitable as a push/pull target
/// over the local transport.
///
/// # Panics
/// Panics if initialisation fails.
pub fn bare_remote(path: &Path) {
    git2::Repository::init_bare(path).unwrap_or_else(|e| {
        panic!(
            "bare_remote: failed to init bare repository at {}: {e}",
            path.display()
        )
    });
}

/// Builds a working repository at `work` with one commit, a bare remote at
/// `remote`, and the initial commit already pushed with upstream tracking
/// (`git push -u origin main`).
///
/// Use for: tests that need the ahead-of-remote fact or a pull source.
///
/// # Panics
/// Panics if any git operation fails.
pub fn repo_with_pushed_remote(work: &Path, remote: &Path) {
    real_git_repo_with_commit(work);
    bare_remote(remote);
    run_git(
        work,
        &["remote", "add", "origin", &remote.display().to_string()],
    );
    run_git(work, &["push", "-u", "origin", "main"]);
}

fn run_git(path: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

fn run_git_commit(path: &Path, message: &str) {
    let date = next_commit_date();
    let output = Command::new("git")
        .args(["commit", "-m", message])
        .env("GIT_AUTHOR_DATE", &date)
        .env("GIT_COMMITTER_DATE", &date)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git commit -m {message:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git commit -m {message:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}
