//! Layout file font injection.
//!
//! Locates the project's root layout file, scrubs previously inserted font
//! markup, and injects a freshly generated combined block before `</head>`
//! (synthesizing a head when the layout has none). The file is treated as
//! text with pattern-based detection; pulling in a JSX parser for one known
//! file is not worth the dependency.
//!
//! The scrub patterns key on stable structural markers (the two font origins
//! and the comment shapes) rather than exact whitespace, so files written by
//! older releases that emitted per-font blocks still clean up.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::LayoutError;
use crate::fonts::{combined_link_markup, GoogleFont, FONT_FILE_ORIGIN, FONT_STYLESHEET_ORIGIN};

/// Candidate layout locations, highest priority first.
const LAYOUT_CANDIDATES: [&str; 4] = [
    "app/layout.tsx",
    "src/app/layout.tsx",
    "app/layout.js",
    "src/app/layout.js",
];

/// Find the project's root layout file under `root`.
pub fn locate_layout(root: &Path) -> Option<PathBuf> {
    LAYOUT_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.is_file())
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// Compiled patterns shared by the scrubber and injector.
///
/// The `regex` crate has no lookaround, so attribute-order tolerance works by
/// matching whole `<link ...>` elements and classifying the matched text with
/// the secondary patterns below.
struct MarkupPatterns {
    /// Any `<link ...>` element, single- or multi-line, self-closing or not.
    link_element: Regex,
    /// Any `{/* ... */}` JSX comment.
    jsx_comment: Regex,
    preconnect_rel: Regex,
    stylesheet_origin_href: Regex,
    file_origin_href: Regex,
    stylesheet_link_href: Regex,
    /// Tracking annotations: a comment body of the shape `See: <url>`.
    see_annotation: Regex,
    lint_suppression: Regex,
    head_close: Regex,
    body_open: Regex,
}

fn markup_patterns() -> &'static MarkupPatterns {
    static PATTERNS: OnceLock<MarkupPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let stylesheet_origin = regex::escape(FONT_STYLESHEET_ORIGIN);
        let file_origin = regex::escape(FONT_FILE_ORIGIN);
        MarkupPatterns {
            link_element: Regex::new(r"(?is)<link\b[^>]*>").expect("valid link pattern"),
            jsx_comment: Regex::new(r"(?s)\{\s*/\*.*?\*/\s*\}").expect("valid comment pattern"),
            preconnect_rel: Regex::new(r#"(?i)rel\s*=\s*['"]preconnect['"]"#)
                .expect("valid preconnect pattern"),
            stylesheet_origin_href: Regex::new(&format!(
                r#"(?i)href\s*=\s*['"]{stylesheet_origin}/?['"]"#
            ))
            .expect("valid stylesheet origin pattern"),
            file_origin_href: Regex::new(&format!(r#"(?i)href\s*=\s*['"]{file_origin}/?['"]"#))
                .expect("valid file origin pattern"),
            stylesheet_link_href: Regex::new(&format!(
                r#"(?i)href\s*=\s*['"]{stylesheet_origin}/css2\?"#
            ))
            .expect("valid stylesheet link pattern"),
            see_annotation: Regex::new(r"(?i)see:\s*https?://").expect("valid see pattern"),
            lint_suppression: Regex::new(r"(?i)eslint-disable-next-line")
                .expect("valid lint pattern"),
            head_close: Regex::new(r"(?i)</head\s*>").expect("valid head pattern"),
            body_open: Regex::new(r"(?i)<body\b").expect("valid body pattern"),
        }
    })
}

// ---------------------------------------------------------------------------
// Scrubber
// ---------------------------------------------------------------------------

/// Remove all previously inserted font markup: preconnect links to the two
/// font origins, tracking and lint-suppression comments, and stylesheet
/// links into the `css2` endpoint (any family).
///
/// Idempotent, and independent of the fonts being added in the current run:
/// the replacement block is always regenerated from the full font set, so
/// everything from prior runs goes.
pub fn scrub_font_markup(content: &str) -> String {
    let patterns = markup_patterns();
    let mut ranges: Vec<(usize, usize)> = Vec::new();

    for m in patterns.link_element.find_iter(content) {
        let element = m.as_str();
        let preconnect = patterns.preconnect_rel.is_match(element)
            && (patterns.stylesheet_origin_href.is_match(element)
                || patterns.file_origin_href.is_match(element));
        let stylesheet = patterns.stylesheet_link_href.is_match(element);
        if preconnect || stylesheet {
            ranges.push(expand_to_line(content, m.start(), m.end()));
        }
    }

    for m in patterns.jsx_comment.find_iter(content) {
        let comment = m.as_str();
        if patterns.see_annotation.is_match(comment) || patterns.lint_suppression.is_match(comment)
        {
            ranges.push(expand_to_line(content, m.start(), m.end()));
        }
    }

    if ranges.is_empty() {
        return content.to_string();
    }
    tracing::debug!(fragments = ranges.len(), "scrubbing existing font markup");

    ranges.sort_unstable();
    let mut scrubbed = String::with_capacity(content.len());
    let mut cursor = 0;
    for (start, end) in ranges {
        if end <= cursor {
            continue;
        }
        scrubbed.push_str(&content[cursor..start.max(cursor)]);
        cursor = end;
    }
    scrubbed.push_str(&content[cursor..]);
    scrubbed
}

/// Widen a fragment to consume its line indentation and trailing newline, so
/// repeated scrub+inject cycles do not accumulate blank lines.
fn expand_to_line(content: &str, start: usize, end: usize) -> (usize, usize) {
    let bytes = content.as_bytes();
    let mut start = start;
    while start > 0 && matches!(bytes[start - 1], b' ' | b'\t') {
        start -= 1;
    }
    let mut end = end;
    while end < bytes.len() && matches!(bytes[end], b' ' | b'\t') {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'\r' {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'\n' {
        end += 1;
    }
    (start, end)
}

// ---------------------------------------------------------------------------
// Injector
// ---------------------------------------------------------------------------

/// Insert the combined font block into scrubbed layout content.
///
/// The block goes immediately before the first `</head>`; when the layout
/// has no head at all, a complete head block is synthesized before the first
/// `<body>`. Content with neither marker cannot be modified safely.
pub fn inject_font_markup(content: &str, fonts: &[GoogleFont]) -> Result<String, LayoutError> {
    let patterns = markup_patterns();
    let block = combined_link_markup(fonts);

    if let Some(m) = patterns.head_close.find(content) {
        tracing::debug!("inserting font links before </head>");
        return Ok(insert_block_before(content, m.start(), &block));
    }
    if let Some(m) = patterns.body_open.find(content) {
        tracing::debug!("no head element; synthesizing one before <body>");
        let framed = format!("<head>\n{block}\n</head>");
        return Ok(insert_block_before(content, m.start(), &framed));
    }
    Err(LayoutError::NoInsertionPoint)
}

/// Insert `block` (unindented lines) on its own lines immediately before the
/// marker at `marker_start`, matching the marker line's indentation. A marker
/// that shares its line with other content gets a line break instead.
fn insert_block_before(content: &str, marker_start: usize, block: &str) -> String {
    let line_start = content[..marker_start]
        .rfind('\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    let prefix = &content[line_start..marker_start];
    let own_line = prefix.chars().all(|c| c == ' ' || c == '\t');

    let mut updated = String::with_capacity(content.len() + block.len() + 16);
    if own_line {
        updated.push_str(&content[..line_start]);
        for line in block.lines() {
            updated.push_str(prefix);
            updated.push_str(line);
            updated.push('\n');
        }
        updated.push_str(&content[line_start..]);
    } else {
        updated.push_str(&content[..marker_start]);
        updated.push('\n');
        for line in block.lines() {
            updated.push_str(line);
            updated.push('\n');
        }
        updated.push_str(&content[marker_start..]);
    }
    updated
}

// ---------------------------------------------------------------------------
// Rewrite
// ---------------------------------------------------------------------------

/// Rewrite the project's layout file with stylesheet links for `fonts`.
///
/// Whole-file read, in-memory scrub + inject, whole-file write; the file is
/// untouched unless both transforms succeed. Returns the path written.
pub fn update_layout_with_fonts(
    root: &Path,
    fonts: &[GoogleFont],
) -> Result<PathBuf, LayoutError> {
    let path = locate_layout(root).ok_or(LayoutError::NotFound)?;
    let content = fs::read_to_string(&path)?;

    let scrubbed = scrub_font_markup(&content);
    let updated = inject_font_markup(&scrubbed, fonts)?;
    fs::write(&path, &updated)?;

    for font in fonts {
        tracing::info!(font = %font.name, "added font link");
    }
    tracing::info!(
        path = %path.display(),
        fonts = fonts.len(),
        "updated layout with font links"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::TestTempDir;

    fn font(name: &str, weights: &str) -> GoogleFont {
        GoogleFont {
            name: name.into(),
            weights: weights.into(),
        }
    }

    fn sample_fonts() -> Vec<GoogleFont> {
        vec![font("Inter", "wght@400..700"), font("Roboto Mono", "wght@400")]
    }

    const SAMPLE_LAYOUT: &str = r#"import './globals.css'

export default function RootLayout({
  children,
}: {
  children: React.ReactNode
}) {
  return (
    <html lang='en'>
      <head>
        <meta charSet='utf-8' />
      </head>
      <body>{children}</body>
    </html>
  )
}
"#;

    // ---- locator ----

    #[test]
    fn locator_prefers_app_layout_tsx() {
        let fixture = TestTempDir::new("locator-priority");
        fixture.write_text("app/layout.tsx", "a");
        fixture.write_text("src/app/layout.js", "b");
        let path = locate_layout(fixture.path()).unwrap();
        assert!(path.ends_with("app/layout.tsx"), "got: {}", path.display());
    }

    #[test]
    fn locator_falls_through_candidates_in_order() {
        let fixture = TestTempDir::new("locator-order");
        fixture.write_text("src/app/layout.js", "b");
        fixture.write_text("app/layout.js", "a");
        let path = locate_layout(fixture.path()).unwrap();
        assert!(path.ends_with("app/layout.js"), "got: {}", path.display());
    }

    #[test]
    fn locator_returns_none_without_layout() {
        let fixture = TestTempDir::new("locator-none");
        fixture.write_text("app/page.tsx", "not a layout");
        assert!(locate_layout(fixture.path()).is_none());
    }

    // ---- injector ----

    #[test]
    fn inject_combined_block_before_head_close() {
        let updated = inject_font_markup("<head>\n</head>", &sample_fonts()).unwrap();
        assert_eq!(updated.matches("rel='preconnect'").count(), 2);
        assert_eq!(updated.matches("rel='stylesheet'").count(), 2);
        assert!(updated.contains("family=Inter:wght@400..700"));
        assert!(updated.contains("family=Roboto+Mono:wght@400"));
        let links = updated.find("rel='preconnect'").unwrap();
        let head_close = updated.find("</head>").unwrap();
        assert!(links < head_close);
    }

    #[test]
    fn inject_matches_marker_indentation() {
        let updated = inject_font_markup(SAMPLE_LAYOUT, &sample_fonts()).unwrap();
        assert!(
            updated.contains("\n      <link rel='preconnect'"),
            "block should sit at </head> indentation:\n{updated}"
        );
    }

    #[test]
    fn inject_uses_first_head_close_only() {
        let updated =
            inject_font_markup("<head>\n</head>\n<template>\n</head>\n", &sample_fonts()).unwrap();
        let first = updated.find("</head>").unwrap();
        assert!(updated[..first].contains("rel='stylesheet'"));
        assert!(!updated[first..].contains("rel='stylesheet'"));
    }

    #[test]
    fn inject_synthesizes_head_before_body() {
        let updated = inject_font_markup("<body>\n  <div/>\n</body>", &sample_fonts()).unwrap();
        assert!(updated.starts_with("<head>\n"));
        let head_close = updated.find("</head>").unwrap();
        let body = updated.find("<body>").unwrap();
        assert!(head_close < body);
        assert_eq!(updated.matches("rel='stylesheet'").count(), 2);
    }

    #[test]
    fn inject_is_case_insensitive_about_markers() {
        let updated = inject_font_markup("<HEAD>\n</HEAD>", &sample_fonts()).unwrap();
        assert!(updated.contains("rel='stylesheet'"));

        let updated = inject_font_markup("<BODY>\n</BODY>", &sample_fonts()).unwrap();
        assert!(updated.contains("<head>"));
    }

    #[test]
    fn inject_handles_marker_sharing_a_line() {
        let updated = inject_font_markup("<html><head></head></html>", &sample_fonts()).unwrap();
        assert!(updated.contains("rel='stylesheet'"));
        let links = updated.find("rel='stylesheet'").unwrap();
        assert!(links < updated.find("</head>").unwrap());
    }

    #[test]
    fn inject_without_markers_is_a_structural_error() {
        let err = inject_font_markup("<div>no markers here</div>", &sample_fonts()).unwrap_err();
        assert!(matches!(err, LayoutError::NoInsertionPoint));
    }

    // ---- scrubber ----

    #[test]
    fn scrub_removes_everything_inject_added() {
        let base = scrub_font_markup(SAMPLE_LAYOUT);
        let injected = inject_font_markup(&base, &sample_fonts()).unwrap();
        let scrubbed = scrub_font_markup(&injected);
        assert_eq!(scrubbed, base);
        assert!(!scrubbed.contains("fonts.googleapis.com"));
        assert!(!scrubbed.contains("fonts.gstatic.com"));
        assert!(!scrubbed.contains("eslint-disable-next-line"));
    }

    #[test]
    fn scrub_is_idempotent() {
        let injected = inject_font_markup(SAMPLE_LAYOUT, &sample_fonts()).unwrap();
        let once = scrub_font_markup(&injected);
        let twice = scrub_font_markup(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn scrub_handles_legacy_per_font_blocks() {
        // Shape emitted by earlier releases: double quotes, multi-line
        // elements, flipped attribute order, one block per font.
        let content = r#"<head>
      <link rel="preconnect" href="https://fonts.googleapis.com" />
      <link
        href="https://fonts.gstatic.com"
        rel="preconnect"
        crossorigin="anonymous"
      />
      {/* See: https://chatgpt.com/c/681ca606 */}
      {/* eslint-disable-next-line @next/next/no-page-custom-font */}
      <link
        href="https://fonts.googleapis.com/css2?family=Inter:wght@400&display=optional"
        rel="stylesheet"
      />
</head>"#;
        let scrubbed = scrub_font_markup(content);
        assert!(!scrubbed.contains("fonts.googleapis.com"));
        assert!(!scrubbed.contains("fonts.gstatic.com"));
        assert!(!scrubbed.contains("See:"));
        assert!(!scrubbed.contains("eslint-disable-next-line"));
        assert!(scrubbed.contains("<head>"));
        assert!(scrubbed.contains("</head>"));
    }

    #[test]
    fn scrub_leaves_unrelated_markup_alone() {
        let content = r#"<head>
  <meta charSet='utf-8' />
  <link rel='icon' href='/favicon.ico' />
  <link rel='preconnect' href='https://cdn.example.com' />
  <link href='/styles.css' rel='stylesheet' />
</head>"#;
        assert_eq!(scrub_font_markup(content), content);
    }

    #[test]
    fn scrub_does_not_leave_blank_lines() {
        let injected = inject_font_markup(SAMPLE_LAYOUT, &sample_fonts()).unwrap();
        let scrubbed = scrub_font_markup(&injected);
        assert!(!scrubbed.contains("\n\n\n"), "got:\n{scrubbed}");
    }

    // ---- pipeline properties ----

    #[test]
    fn scrub_then_inject_reaches_a_fixed_point() {
        let fonts = sample_fonts();
        let first = inject_font_markup(&scrub_font_markup(SAMPLE_LAYOUT), &fonts).unwrap();
        let second = inject_font_markup(&scrub_font_markup(&first), &fonts).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn synthesized_head_is_stable_across_reruns() {
        let fonts = sample_fonts();
        let source = "  <body>\n    <div/>\n  </body>\n";
        let first = inject_font_markup(&scrub_font_markup(source), &fonts).unwrap();
        let second = inject_font_markup(&scrub_font_markup(&first), &fonts).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rerun_with_different_fonts_replaces_the_set() {
        let first = inject_font_markup(SAMPLE_LAYOUT, &sample_fonts()).unwrap();
        let replacement = [font("Lora", "wght@400..600")];
        let second = inject_font_markup(&scrub_font_markup(&first), &replacement).unwrap();
        assert!(second.contains("family=Lora"));
        assert!(!second.contains("family=Inter"));
        assert!(!second.contains("family=Roboto+Mono"));
        assert_eq!(second.matches("rel='preconnect'").count(), 2);
    }

    // ---- rewrite ----

    #[test]
    fn update_rewrites_the_located_layout() {
        let fixture = TestTempDir::new("update-layout");
        let path = fixture.write_text("app/layout.tsx", SAMPLE_LAYOUT);
        let written = update_layout_with_fonts(fixture.path(), &sample_fonts()).unwrap();
        assert_eq!(written, path);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("family=Inter"));
        assert!(content.contains("family=Roboto+Mono"));
    }

    #[test]
    fn update_without_layout_file_fails() {
        let fixture = TestTempDir::new("update-missing");
        let err = update_layout_with_fonts(fixture.path(), &sample_fonts()).unwrap_err();
        assert!(matches!(err, LayoutError::NotFound));
    }

    #[test]
    fn update_leaves_file_untouched_on_structural_error() {
        let fixture = TestTempDir::new("update-structural");
        let path = fixture.write_text("app/layout.tsx", "<div>no markers here</div>");
        let err = update_layout_with_fonts(fixture.path(), &sample_fonts()).unwrap_err();
        assert!(matches!(err, LayoutError::NoInsertionPoint));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "<div>no markers here</div>");
    }
}
