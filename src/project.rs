//! Next.js project shape check.

use std::path::Path;

use crate::error::ProjectError;

/// Fail unless `root` looks like a Next.js app-router project. The layout
/// candidates live under `app/` or `src/app/`, so one of those directories
/// must exist before anything else runs.
pub fn ensure_next_project(root: &Path) -> Result<(), ProjectError> {
    if root.join("app").is_dir() || root.join("src").join("app").is_dir() {
        Ok(())
    } else {
        Err(ProjectError::NotNextApp)
    }
}
