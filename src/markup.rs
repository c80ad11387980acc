//! The site's text micro-format.
//!
//! Admins write plain text with two inline markers:
//!
//! - `[[words]]` renders as a gradient highlight,
//! - `**words**` renders as bold,
//!
//! and line breaks are preserved. Everything else is HTML-escaped, so stored
//! content can be injected into the page as-is.

use once_cell::sync::Lazy;
use regex::Regex;

static HIGHLIGHT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[(.*?)\]\]").expect("valid regex"));
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));

pub const HIGHLIGHT_CLASS: &str = "gradient_text";
pub const BOLD_CLASS: &str = "font-bold";

/// Escapes the characters that could open a tag or an entity.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

/// format_text
///
/// Renders the micro-format to an HTML fragment. Markers never span lines.
pub fn format_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let escaped = escape_html(text);
    let highlighted = HIGHLIGHT.replace_all(
        &escaped,
        format!(r#"<span class="{HIGHLIGHT_CLASS}">$1</span>"#).as_str(),
    );
    let bolded = BOLD.replace_all(
        &highlighted,
        format!(r#"<strong class="{BOLD_CLASS}">$1</strong>"#).as_str(),
    );

    bolded.replace('\n', "<br />")
}
