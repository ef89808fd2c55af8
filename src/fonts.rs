//! Google font references and webfont service integration.
//!
//! A [`GoogleFont`] pairs a family name with the weight-range token the
//! stylesheet service expects (e.g. `wght@100..900`). This module renders
//! font references to stylesheet URLs and layout markup, scrapes the
//! registry's editor page for the weight map, and probes Google Fonts to
//! filter out system fonts before anything touches the layout file.

use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashMap;

use crate::error::RegistryError;

/// Origin serving font stylesheets.
pub const FONT_STYLESHEET_ORIGIN: &str = "https://fonts.googleapis.com";

/// Origin serving the font files themselves.
pub const FONT_FILE_ORIGIN: &str = "https://fonts.gstatic.com";

/// Comment inserted above the stylesheet links. The `See:` shape is load
/// bearing: the layout scrubber keys on it, so older annotations with the
/// same shape are cleaned up too.
const TRACKING_COMMENT: &str = "{/* Theme fonts (see: https://tweakcn.com/editor/theme) */}";

/// Lint suppression emitted before each stylesheet link.
const LINT_COMMENT: &str = "{/* eslint-disable-next-line @next/next/no-page-custom-font */}";

/// A validated Google webfont requested by a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleFont {
    /// Display name of the family, may contain spaces ("Roboto Mono").
    pub name: String,
    /// Weight-range token, passed through to the stylesheet URL unmodified.
    pub weights: String,
}

impl GoogleFont {
    /// Stylesheet URL for this font, with whitespace runs in the name
    /// encoded as `+`.
    pub fn stylesheet_url(&self) -> String {
        format!(
            "{FONT_STYLESHEET_ORIGIN}/css2?family={}:{}&display=optional",
            url_safe_name(&self.name),
            self.weights
        )
    }

    /// Full layout markup for this font alone: preconnect pair, tracking
    /// comment, lint suppression, stylesheet link.
    pub fn link_markup(&self) -> String {
        combined_link_markup(std::slice::from_ref(self))
    }
}

/// Replace runs of whitespace with `+` for use in a `family=` parameter.
fn url_safe_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("+")
}

/// Build one combined markup block: the preconnect pair and tracking comment
/// once, then a lint suppression and stylesheet link per font, in input
/// order. Lines carry no indentation; the injector indents them.
pub fn combined_link_markup(fonts: &[GoogleFont]) -> String {
    let mut block = String::new();
    block.push_str(&format!(
        "<link rel='preconnect' href='{FONT_STYLESHEET_ORIGIN}' />\n"
    ));
    block.push_str(&format!(
        "<link rel='preconnect' href='{FONT_FILE_ORIGIN}' crossOrigin='anonymous' />\n"
    ));
    block.push_str(TRACKING_COMMENT);
    block.push('\n');
    for font in fonts {
        block.push_str(LINT_COMMENT);
        block.push('\n');
        block.push_str(&format!(
            "<link href='{}' rel='stylesheet' />\n",
            font.stylesheet_url()
        ));
    }
    // No trailing newline; callers join lines with their own separators.
    block.truncate(block.trim_end_matches('\n').len());
    block
}

// ---------------------------------------------------------------------------
// Editor weight scraping
// ---------------------------------------------------------------------------

/// Fetch the registry's editor page and extract the font-name → weight-spec
/// map from the Google Fonts URL it references.
pub async fn fetch_editor_font_weights(
    client: &reqwest::Client,
    editor_url: &str,
) -> Result<HashMap<String, String>, RegistryError> {
    let response = client.get(editor_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RegistryError::Status(status.as_u16(), snippet(&body)));
    }

    let html = response.text().await?;
    let url = find_stylesheet_url(&html).ok_or_else(|| {
        RegistryError::Malformed(format!("no Google Fonts URL found on {editor_url}"))
    })?;
    tracing::debug!(url = %url, "editor page stylesheet url");

    parse_font_weights_from_url(&url)
}

/// Locate the `css2` stylesheet URL in the editor page HTML.
///
/// Prefers `<link href=...>` elements; falls back to a raw-text scan since
/// the URL may only appear in inlined framework state.
fn find_stylesheet_url(html: &str) -> Option<String> {
    let prefix = format!("{FONT_STYLESHEET_ORIGIN}/css2?");

    let document = Html::parse_document(html);
    let links = Selector::parse("link[href]").expect("valid link selector");
    for element in document.select(&links) {
        if let Some(href) = element.value().attr("href") {
            if href.starts_with(&prefix) {
                return Some(href.to_string());
            }
        }
    }

    let raw = Regex::new(r#"https://fonts\.googleapis\.com/css2\?[^"'\s\\<]+"#)
        .expect("valid stylesheet url pattern");
    raw.find(html)
        .map(|m| m.as_str().replace("&amp;", "&"))
}

/// Parse `family=` parameters out of a Google Fonts `css2` URL.
///
/// Names come back with spaces (the `+` encoding is undone by the query
/// parser); a family without a `:` maps to an empty weight spec.
pub fn parse_font_weights_from_url(
    url: &str,
) -> Result<HashMap<String, String>, RegistryError> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| RegistryError::Malformed(format!("bad stylesheet url `{url}`: {e}")))?;

    let mut weights = HashMap::new();
    for (key, value) in parsed.query_pairs() {
        if key != "family" {
            continue;
        }
        match value.split_once(':') {
            Some((name, spec)) => weights.insert(name.to_string(), spec.to_string()),
            None => weights.insert(value.to_string(), String::new()),
        };
    }
    Ok(weights)
}

// ---------------------------------------------------------------------------
// Webfont validation
// ---------------------------------------------------------------------------

/// Why a theme font was left out of the injection set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The stylesheet probe failed; this is a system font.
    NotAGoogleFont,
    /// The font exists but the editor page lists no weights for it.
    NoWeights,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAGoogleFont => write!(f, "not in Google Fonts"),
            Self::NoWeights => write!(f, "no weights found"),
        }
    }
}

/// Result of filtering theme fonts against Google Fonts.
#[derive(Debug, Default)]
pub struct FontFilterOutcome {
    /// Fonts confirmed to exist, with their weight specs resolved.
    pub valid: Vec<GoogleFont>,
    /// Fonts dropped from the batch, with the reason.
    pub skipped: Vec<(String, SkipReason)>,
}

/// Probe Google Fonts for a family name. Any transport error counts as
/// "does not exist".
pub async fn validate_google_font(client: &reqwest::Client, name: &str) -> bool {
    let url = format!(
        "{FONT_STYLESHEET_ORIGIN}/css2?family={}&display=optional",
        url_safe_name(name)
    );
    match client.head(&url).send().await {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}

/// Keep the fonts that exist on Google Fonts and have a weight entry.
pub async fn filter_valid_google_fonts(
    client: &reqwest::Client,
    names: &[String],
    weights: &HashMap<String, String>,
) -> FontFilterOutcome {
    let mut outcome = FontFilterOutcome::default();

    for name in names {
        if !validate_google_font(client, name).await {
            tracing::debug!(font = %name, "skipping: stylesheet probe failed");
            outcome
                .skipped
                .push((name.clone(), SkipReason::NotAGoogleFont));
            continue;
        }

        let Some(spec) = lookup_weights(weights, name) else {
            tracing::debug!(font = %name, "skipping: no weight entry");
            outcome.skipped.push((name.clone(), SkipReason::NoWeights));
            continue;
        };

        outcome.valid.push(GoogleFont {
            name: name.clone(),
            weights: spec,
        });
    }

    outcome
}

/// Find the weight spec for a name, tolerating either encoding of spaces.
/// Empty specs count as missing: a family listed without weights is a system
/// font as far as the stylesheet service is concerned.
fn lookup_weights(weights: &HashMap<String, String>, name: &str) -> Option<String> {
    let candidates = [
        name.to_string(),
        name.split_whitespace().collect::<Vec<_>>().join("+"),
        name.replace('+', " "),
    ];
    candidates
        .iter()
        .filter_map(|key| weights.get(key))
        .find(|spec| !spec.is_empty())
        .cloned()
}

/// First line of a body, capped, for error messages.
fn snippet(body: &str) -> String {
    let line = body.lines().next().unwrap_or_default();
    line.chars().take(200).collect()
}
