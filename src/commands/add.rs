//! `themeup add` — install a theme and wire its fonts into the layout.

use std::path::Path;
use std::time::Duration;

use crate::config::Config;
use crate::error::{CliError, RegistryError};
use crate::ui::Renderer;
use crate::{fonts, git, installer, layout, project, registry};

/// Flags for the add flow.
#[derive(Debug, Default)]
pub struct AddOptions {
    /// Skip the confirmation prompt.
    pub yes: bool,
}

/// Run the full add flow against the project at `root`.
///
/// Ordering matters: all checks and prompts come before the installer runs,
/// and the layout rewrite is the last mutation so a failed fetch leaves the
/// project's source untouched.
pub async fn run(
    config: &Config,
    renderer: &Renderer,
    root: &Path,
    theme_name: &str,
    options: &AddOptions,
) -> Result<(), CliError> {
    project::ensure_next_project(root)?;

    renderer.activity("Checking git status...");
    git::ensure_clean_worktree(root)?;

    if !options.yes {
        let question = format!("Add theme \"{theme_name}\" and update layout with fonts?");
        if !renderer.confirm(&question)? {
            renderer.activity("Operation cancelled");
            return Ok(());
        }
    }

    renderer.activity(&format!("Adding theme: {theme_name}"));
    renderer.activity("Running component installer...");
    let installer_output = installer::install_theme_components(
        root,
        &config.installer.runner,
        &config.registry.base_url,
        theme_name,
    )?;
    if !installer_output.is_empty() {
        tracing::debug!(output = %installer_output, "installer output");
    }

    let client = registry::http_client(Duration::from_secs(config.network.timeout_secs))
        .map_err(RegistryError::from)?;

    renderer.activity("Fetching theme data...");
    let theme = registry::fetch_theme(&client, &config.registry.base_url, theme_name).await?;

    let font_names = registry::extract_theme_fonts(&theme);
    if font_names.is_empty() {
        renderer.activity("No custom fonts found in theme");
        return Ok(());
    }
    renderer.activity(&format!(
        "Found {} font(s): {}",
        font_names.len(),
        font_names.join(", ")
    ));

    renderer.activity("Fetching font weights from editor...");
    let weights = fonts::fetch_editor_font_weights(&client, &config.registry.editor_url).await?;

    renderer.activity("Validating fonts against Google Fonts...");
    let outcome = fonts::filter_valid_google_fonts(&client, &font_names, &weights).await;
    for (name, reason) in &outcome.skipped {
        renderer.warn(&format!("skipping {name}: {reason}"));
    }
    if outcome.valid.is_empty() {
        renderer.activity("No Google Fonts found in theme");
        return Ok(());
    }

    renderer.activity("Updating layout file...");
    let layout_path = layout::update_layout_with_fonts(root, &outcome.valid)?;

    let added: Vec<&str> = outcome.valid.iter().map(|f| f.name.as_str()).collect();
    renderer.success("Theme added");
    renderer.field(
        "Theme",
        if theme.title.is_empty() {
            theme_name
        } else {
            &theme.title
        },
    );
    renderer.field("Fonts added", &added.join(", "));
    renderer.field("Layout", &layout_path.display().to_string());
    Ok(())
}
