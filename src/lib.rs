//! mapdiff - structural diff for untyped nested data.
//!
//! This library compares two trees of maps, lists and scalars and reports a
//! flat, canonically ordered list of differences. Each difference is
//! addressed by a dotted/bracketed path such as `a2[0].b2.(e5.f1)`.
//!
//! # Example
//!
//! ```
//! use mapdiff::{compute_diff, parse_json};
//!
//! let old = parse_json(r#"{"d3": 3, "d4": [4, 5]}"#).unwrap();
//! let new = parse_json(r#"{"d4": [4], "d7": 3}"#).unwrap();
//!
//! for change in &compute_diff(&old, &new).changes {
//!     println!("{}", change);
//! }
//! // Add d7: 3
//! // Remove d3: 3
//! // Remove d4[1]: 5
//! ```

pub mod access;
pub mod diff;
pub mod error;
pub mod output;
pub mod parser;
pub mod path;
pub mod tree;

// Re-export commonly used types for convenience
pub use access::{get, get_items, set_items, KeyPath};
pub use diff::{compare_changes, compute_diff, Change, ChangeType, Diff, DiffStats};
pub use error::{AccessError, OutputError, ParseError};
pub use output::{format_diff, OutputFormat, OutputOptions};
pub use parser::{parse_file, parse_json, parse_str, parse_toml, parse_yaml, Format};
pub use path::{render_path, PathNode};
pub use tree::{Map, Node, Scalar};
