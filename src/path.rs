//! Path addressing for tree positions.
//!
//! A position is reached by a sequence of [`PathNode`]s from the root and is
//! rendered as a dotted/bracketed expression:
//!
//! - map keys are joined with `.`, e.g. `a.b.c`
//! - list indices are written as `[i]`, e.g. `a[0].b`
//! - a key containing a literal `.` is wrapped in parentheses, e.g. `a.(e5.f1)`
//!
//! # Examples
//!
//! ```
//! use mapdiff::path::{render_path, PathNode};
//!
//! let path = vec![
//!     PathNode::key("a2"),
//!     PathNode::Index(0),
//!     PathNode::key("e5.f1"),
//! ];
//! assert_eq!(render_path(&path), "a2[0].(e5.f1)");
//! ```

use std::fmt::Write;

/// A single addressing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathNode {
    /// A map key
    Key(String),
    /// A list index
    Index(usize),
}

impl PathNode {
    pub fn key(key: impl Into<String>) -> Self {
        PathNode::Key(key.into())
    }
}

/// Renders a sequence of path nodes into its string address.
///
/// Separators at either end are stripped, so the root itself renders as the
/// empty string and a trailing empty key leaves no dangling `.`.
pub fn render_path(nodes: &[PathNode]) -> String {
    let mut rendered = String::new();
    for node in nodes {
        match node {
            PathNode::Key(key) if key.contains('.') => {
                rendered.push_str(".(");
                rendered.push_str(key);
                rendered.push(')');
            }
            PathNode::Key(key) => {
                rendered.push('.');
                rendered.push_str(key);
            }
            PathNode::Index(index) => {
                // writing into a String cannot fail
                let _ = write!(rendered, "[{}]", index);
            }
        }
    }
    rendered.trim_matches('.').to_string()
}
