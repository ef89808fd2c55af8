//! themeup — install tweakcn themes into a Next.js project.
//!
//! The interesting part is the layout font-injection engine in [`layout`]:
//! it locates the project's root layout file, scrubs any font markup left by
//! earlier runs, and injects a freshly generated block of preconnect hints
//! and stylesheet links, idempotently. The rest of the crate feeds it: the
//! registry client resolves which fonts a theme wants, the editor scraper
//! resolves their weights, and the webfont validator drops system fonts.
//!
//! # Quick start
//!
//! ```no_run
//! use themeup::fonts::GoogleFont;
//! use themeup::layout::update_layout_with_fonts;
//!
//! let fonts = vec![GoogleFont {
//!     name: "Inter".into(),
//!     weights: "wght@100..900".into(),
//! }];
//! let path = update_layout_with_fonts(std::path::Path::new("."), &fonts).unwrap();
//! println!("updated {}", path.display());
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod fonts;
pub mod git;
pub mod installer;
pub mod layout;
pub mod project;
pub mod registry;
#[cfg(test)]
pub mod testsupport;
pub mod ui;
