//! Output formatting for diff results.
//!
//! Every change is rendered as one line of the form
//! `<Action> <path>: <values>`, where values are `new` for `Add`,
//! `old -> new` for `Change` and `old` for `Remove`. Terminal output colors
//! the same lines; JSON output serializes the changes and statistics.
//!
//! # Examples
//!
//! ```
//! use mapdiff::{compute_diff, format_diff, parse_json, OutputFormat, OutputOptions};
//!
//! let old = parse_json(r#"{"age": 30}"#).unwrap();
//! let new = parse_json(r#"{"age": 31}"#).unwrap();
//! let diff = compute_diff(&old, &new);
//!
//! let output = format_diff(&diff, &OutputFormat::Plain, &OutputOptions::default()).unwrap();
//! assert!(output.starts_with("Change age: 30 -> 31"));
//! ```

use crate::diff::{Change, ChangeType, Diff, DiffStats};
use crate::error::OutputError;
use crate::tree::Node;
use colored::*;
use serde::Serialize;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored terminal output with ANSI escape codes
    Terminal,
    /// JSON representation of the diff
    Json,
    /// Plain text, no colors (suitable for piping)
    Plain,
}

/// Options for controlling output formatting.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Truncate rendered values longer than this
    pub max_value_length: Option<usize>,
    /// Append a summary line after the changes
    pub summary: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            max_value_length: None,
            summary: true,
        }
    }
}

/// Formats a diff according to the specified format and options.
pub fn format_diff(
    diff: &Diff,
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Terminal => Ok(format_lines(diff, options, true)),
        OutputFormat::Json => format_json(diff),
        OutputFormat::Plain => Ok(format_lines(diff, options, false)),
    }
}

/// Formats one line per change, colored when `colorize` is set.
///
/// Color scheme: green for `Add`, yellow for `Change`, red for `Remove`.
fn format_lines(diff: &Diff, options: &OutputOptions, colorize: bool) -> String {
    if diff.is_empty() {
        let message = "No changes detected.";
        return if colorize {
            message.dimmed().to_string()
        } else {
            message.to_string()
        };
    }

    let mut output = String::new();
    for change in &diff.changes {
        let line = format_change(change, options.max_value_length);
        if colorize {
            output.push_str(&colorize_line(&line, change.change_type));
        } else {
            output.push_str(&line);
        }
        output.push('\n');
    }

    if options.summary {
        output.push('\n');
        output.push_str(&format_summary(&diff.stats));
    }

    output
}

fn colorize_line(line: &str, change_type: ChangeType) -> String {
    match change_type {
        ChangeType::Added => line.green().to_string(),
        ChangeType::Changed => line.yellow().to_string(),
        ChangeType::Removed => line.red().to_string(),
    }
}

/// Formats a single change, truncating each value to `max_len` if given.
fn format_change(change: &Change, max_len: Option<usize>) -> String {
    change.render_with(|node| format_value(node, max_len))
}

/// Formats a node value for display, truncating at a char boundary.
///
/// Limits too small to hold the `...` marker cut the text without it.
fn format_value(node: &Node, max_len: Option<usize>) -> String {
    let text = node.to_string();
    match max_len {
        Some(max) if text.chars().count() > max => {
            if max < 3 {
                return text.chars().take(max).collect();
            }
            let kept: String = text.chars().take(max - 3).collect();
            format!("{}...", kept)
        }
        _ => text,
    }
}
