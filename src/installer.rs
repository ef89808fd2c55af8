//! Component installer invocation.
//!
//! The theme's CSS and component payload is applied by the registry's own
//! installer (`shadcn` CLI) rather than reimplemented here. The runner is
//! configurable so npx/bunx setups work too.

use std::path::Path;
use std::process::Command;

use crate::error::InstallerError;

/// Run `<runner> shadcn@latest add <theme-url> --yes` in `root`. Returns the
/// command's stdout for display.
pub fn install_theme_components(
    root: &Path,
    runner: &str,
    base_url: &str,
    theme: &str,
) -> Result<String, InstallerError> {
    let theme_url = format!("{}/r/themes/{theme}.json", base_url.trim_end_matches('/'));

    let mut parts = runner.split_whitespace();
    let program = parts.next().ok_or(InstallerError::EmptyRunner)?;

    tracing::debug!(runner = %runner, url = %theme_url, "running component installer");
    let output = Command::new(program)
        .args(parts)
        .args(["shadcn@latest", "add", &theme_url, "--yes"])
        .current_dir(root)
        .output()
        .map_err(InstallerError::Spawn)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(InstallerError::Failed(
            output.status.code().unwrap_or(-1),
            stderr,
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::TestTempDir;

    #[test]
    fn empty_runner_is_rejected() {
        let fixture = TestTempDir::new("installer-empty");
        let err = install_theme_components(fixture.path(), "  ", "https://example.com", "mocha")
            .unwrap_err();
        assert!(matches!(err, InstallerError::EmptyRunner));
    }

    #[test]
    fn missing_program_reports_spawn_failure() {
        let fixture = TestTempDir::new("installer-missing");
        let err = install_theme_components(
            fixture.path(),
            "themeup-no-such-runner-xyz",
            "https://example.com",
            "mocha",
        )
        .unwrap_err();
        assert!(matches!(err, InstallerError::Spawn(_)));
    }

    #[test]
    fn failing_command_surfaces_exit_code() {
        let fixture = TestTempDir::new("installer-failed");
        // `false` ignores its arguments and exits 1.
        let err = install_theme_components(fixture.path(), "false", "https://example.com", "mocha")
            .unwrap_err();
        assert!(matches!(err, InstallerError::Failed(1, _)));
    }
}
