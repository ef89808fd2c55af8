//! `themeup list` — print the registry catalog.

use std::time::Duration;

use crate::config::Config;
use crate::error::{CliError, RegistryError};
use crate::registry;
use crate::ui::Renderer;

/// Longest description shown per catalog row.
const MAX_DESCRIPTION_CHARS: usize = 60;

pub async fn run(config: &Config, renderer: &Renderer) -> Result<(), CliError> {
    let client = registry::http_client(Duration::from_secs(config.network.timeout_secs))
        .map_err(RegistryError::from)?;

    renderer.activity("Fetching theme registry...");
    let themes = registry::fetch_registry(&client, &config.registry.base_url).await?;
    if themes.is_empty() {
        renderer.activity("Registry has no themes");
        return Ok(());
    }

    for theme in &themes {
        let title = if theme.title.is_empty() {
            theme.name.as_str()
        } else {
            theme.title.as_str()
        };
        println!(
            "{:<28} {:<28} {}",
            theme.name,
            title,
            truncate_chars(&theme.description, MAX_DESCRIPTION_CHARS)
        );
    }
    Ok(())
}

/// Truncate by characters and append an ellipsis when truncation occurs.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let prefix: String = text.chars().take(max_chars).collect();
    format!("{prefix}...")
}
