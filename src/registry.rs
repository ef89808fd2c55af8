//! Theme registry client.
//!
//! Themes live in a shadcn-style registry: a catalog at `/r/registry.json`
//! and one JSON document per theme at `/r/themes/<name>.json`. The only part
//! of a theme this tool cares about is the font stacks named in its CSS
//! variables.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::RegistryError;

/// CSS variables that name font stacks.
const FONT_PROPERTIES: [&str; 3] = ["font-sans", "font-mono", "font-serif"];

/// One theme document from the registry.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "cssVars", default)]
    pub css_vars: ThemeCssVars,
}

/// CSS variable sets of a theme. Each set is an open map; only the font
/// properties are read here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemeCssVars {
    #[serde(default)]
    pub theme: BTreeMap<String, String>,
    #[serde(default)]
    pub light: BTreeMap<String, String>,
    #[serde(default)]
    pub dark: BTreeMap<String, String>,
}

/// Build the shared HTTP client used for registry and webfont requests.
pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("themeup/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Fetch the theme catalog.
pub async fn fetch_registry(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<Vec<ThemeData>, RegistryError> {
    let url = format!("{}/r/registry.json", base_url.trim_end_matches('/'));
    get_json(client, &url).await
}

/// Fetch one theme document by name.
pub async fn fetch_theme(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
) -> Result<ThemeData, RegistryError> {
    let url = format!("{}/r/themes/{name}.json", base_url.trim_end_matches('/'));
    get_json(client, &url).await
}

async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, RegistryError> {
    tracing::debug!(url = %url, "registry request");
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let line: String = body.lines().next().unwrap_or_default().chars().take(200).collect();
        return Err(RegistryError::Status(status.as_u16(), line));
    }
    response.json::<T>().await.map_err(RegistryError::from)
}

/// Collect the font family names a theme references, across all variable
/// sets, deduplicated in first-seen order. Stacks are split on commas and
/// quotes are stripped.
pub fn extract_theme_fonts(theme: &ThemeData) -> Vec<String> {
    let mut fonts: Vec<String> = Vec::new();
    let sets = [
        &theme.css_vars.theme,
        &theme.css_vars.light,
        &theme.css_vars.dark,
    ];

    for vars in sets {
        for property in FONT_PROPERTIES {
            let Some(stack) = vars.get(property) else {
                continue;
            };
            for entry in stack.split(',') {
                let family = entry.replace(['\'', '"'], "");
                let family = family.trim();
                if !family.is_empty() && !fonts.iter().any(|f| f == family) {
                    fonts.push(family.to_string());
                }
            }
        }
    }

    fonts
}
