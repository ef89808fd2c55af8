//! Terminal output renderer for status and result messages.
//!
//! Progress chrome goes to stderr; results (the success summary, catalog
//! listings) go to stdout so the tool stays pipeable.

use crossterm::style::{Color, Stylize};
use std::io::{self, BufRead, Write};

/// Styled terminal writer honoring a color toggle.
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// Lifecycle text for the step currently running.
    pub fn activity(&self, text: &str) {
        eprintln!("{}", self.paint(text, Color::Cyan));
    }

    /// One key/value row of the result summary.
    pub fn field(&self, key: &str, value: &str) {
        println!("  {} {value}", self.paint(&format!("{key}:"), Color::DarkGrey));
    }

    /// Final success line.
    pub fn success(&self, text: &str) {
        println!("{}", self.paint(&format!("✓ {text}"), Color::Green));
    }

    pub fn warn(&self, msg: &str) {
        eprintln!("{}", self.paint(&format!("warning: {msg}"), Color::Yellow));
    }

    pub fn error(&self, msg: &str) {
        eprintln!("{}", self.paint(&format!("error: {msg}"), Color::Red));
    }

    /// Ask a yes/no question on stderr and read one answer line from stdin.
    /// Defaults to "no".
    pub fn confirm(&self, question: &str) -> io::Result<bool> {
        eprint!("{} [y/N] ", self.paint(question, Color::Cyan));
        io::stderr().flush()?;
        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(is_affirmative(&input))
    }
}

fn is_affirmative(input: &str) -> bool {
    let answer = input.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
