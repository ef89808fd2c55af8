//! Git working-tree cleanliness check.
//!
//! The layout rewrite is a destructive edit of a tracked file, so the add
//! flow refuses to run unless the target project is a clean git checkout the
//! user can diff and revert.

use std::path::Path;
use std::process::Command;

use crate::error::GitError;

/// Fail unless `root` is inside a git repository with a clean working tree.
pub fn ensure_clean_worktree(root: &Path) -> Result<(), GitError> {
    let inside = Command::new("git")
        .arg("-C")
        .arg(root)
        .args(["rev-parse", "--is-inside-work-tree"])
        .output()?;
    if !inside.status.success() {
        return Err(GitError::NotARepository);
    }

    let status = Command::new("git")
        .arg("-C")
        .arg(root)
        .args(["status", "--porcelain"])
        .output()?;
    if !status.status.success() {
        let stderr = String::from_utf8_lossy(&status.stderr).trim().to_string();
        return Err(GitError::Command(stderr));
    }

    if !status.stdout.is_empty() {
        return Err(GitError::DirtyWorktree);
    }
    Ok(())
}
