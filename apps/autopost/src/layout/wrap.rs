//! Greedy word wrap.
//!
//! Same algorithm as a browser canvas text wrapper: grow the current line one
//! word at a time and break when the candidate would exceed `max_width`. A word
//! is never split; a word wider than the line sits alone and overflows.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrappedText {
    pub lines: Vec<String>,
    pub line_height: f32,
    /// `lines.len() × line_height`.
    pub total_height: f32,
}

/// Wraps `text` so no multi-word line measures wider than `max_width`.
/// `measure` returns the rendered width of a substring in the same units.
pub fn wrap<F>(text: &str, max_width: f32, line_height: f32, measure: F) -> WrappedText
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if measure(&candidate) > max_width && !current.is_empty() {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    let total_height = lines.len() as f32 * line_height;
    WrappedText {
        lines,
        line_height,
        total_height,
    }
}
