//! Best-effort discovery of the git executable.
//!
//! gitmate links libgit2 and never shells out for repository operations,
//! but a working git installation is still what provisions credential
//! helpers and SSH configuration for the remotes gitmate pushes to. The
//! locator runs once at startup so a missing installation can be surfaced
//! to the user up front.

use std::path::PathBuf;

/// Environment variable the platform installer records the binary under.
pub const GIT_PATH_OVERRIDE: &str = "GITMATE_GIT";

#[cfg(windows)]
const GIT_BINARY: &str = "git.exe";
#[cfg(not(windows))]
const GIT_BINARY: &str = "git";

/// Locate the git executable.
///
/// Search order, first hit wins:
/// 1. the installer binding in [`GIT_PATH_OVERRIDE`];
/// 2. well-known installation directories for the platform;
/// 3. a scan of the process `PATH`.
#[must_use]
pub fn locate_git() -> Option<PathBuf> {
    if let Some(bound) = std::env::var_os(GIT_PATH_OVERRIDE) {
        let path = PathBuf::from(bound);
        if path.is_file() {
            return Some(path);
        }
        tracing::warn!(
            path = %path.display(),
            "{GIT_PATH_OVERRIDE} points at a missing file, falling through"
        );
    }

    for dir in well_known_dirs() {
        let candidate = dir.join(GIT_BINARY);
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    which::which(GIT_BINARY).ok()
}

#[cfg(windows)]
fn well_known_dirs() -> Vec<PathBuf> {
    ["ProgramFiles", "ProgramFiles(x86)", "LocalAppData"]
        .iter()
        .filter_map(std::env::var_os)
        .map(|base| PathBuf::from(base).join("Git").join("bin"))
        .collect()
}

#[cfg(not(windows))]
fn well_known_dirs() -> Vec<PathBuf> {
    ["/usr/bin", "/usr/local/bin", "/opt/homebrew/bin"]
        .iter()
        .map(PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn override_variable_wins() {
        let dir = TempDir::new().unwrap();
        let fake_git = dir.path().join(GIT_BINARY);
        fs::write(&fake_git, "").unwrap();

        // SAFETY: test-only process-global mutation; no other test reads
        // this variable.
        unsafe { std::env::set_var(GIT_PATH_OVERRIDE, &fake_git) };
        let located = locate_git();
        unsafe { std::env::remove_var(GIT_PATH_OVERRIDE) };

        assert_eq!(located, Some(fake_git));
    }
}
