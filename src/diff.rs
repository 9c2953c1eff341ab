//! Core structural diff algorithm.
//!
//! This module walks two trees in lock-step and produces a flat list of
//! changes. Maps are compared by key presence, lists positionally by index,
//! and every other combination of values is compared as a whole. The result
//! is sorted into a canonical order: all `Add` records, then all `Change`
//! records, then all `Remove` records, each group ordered by path.
//!
//! # Examples
//!
//! ```
//! use mapdiff::{compute_diff, parse_json};
//!
//! let old = parse_json(r#"{"d3": 3, "d4": [4, 5]}"#).unwrap();
//! let new = parse_json(r#"{"d4": [4], "d7": 3}"#).unwrap();
//!
//! let diff = compute_diff(&old, &new);
//! let lines: Vec<String> = diff.changes.iter().map(|c| c.to_string()).collect();
//!
//! assert_eq!(lines, vec!["Add d7: 3", "Remove d3: 3", "Remove d4[1]: 5"]);
//! ```

use crate::path::{render_path, PathNode};
use crate::tree::{Map, Node};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

/// The kind of difference found at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChangeType {
    /// Position exists in new but not old
    #[serde(rename = "Add")]
    Added,
    /// Position exists in both with different values
    #[serde(rename = "Change")]
    Changed,
    /// Position exists in old but not new
    #[serde(rename = "Remove")]
    Removed,
}

impl ChangeType {
    /// The label used for display and for ordering.
    pub fn label(&self) -> &'static str {
        match self {
            ChangeType::Added => "Add",
            ChangeType::Changed => "Change",
            ChangeType::Removed => "Remove",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single difference between two trees.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    /// Rendered address of the position (e.g. `a2[0].b2.(e5.f1)`)
    pub path: String,
    /// Type of change
    pub change_type: ChangeType,
    /// Old value (None for Added changes)
    pub old_value: Option<Node>,
    /// New value (None for Removed changes)
    pub new_value: Option<Node>,
}

impl Change {
    pub fn added(nodes: &[PathNode], value: &Node) -> Self {
        Self {
            path: render_path(nodes),
            change_type: ChangeType::Added,
            old_value: None,
            new_value: Some(value.clone()),
        }
    }

    pub fn removed(nodes: &[PathNode], value: &Node) -> Self {
        Self {
            path: render_path(nodes),
            change_type: ChangeType::Removed,
            old_value: Some(value.clone()),
            new_value: None,
        }
    }

    pub fn changed(nodes: &[PathNode], old: &Node, new: &Node) -> Self {
        Self {
            path: render_path(nodes),
            change_type: ChangeType::Changed,
            old_value: Some(old.clone()),
            new_value: Some(new.clone()),
        }
    }

    /// Renders the change as `<Action> <path>: <values>`, formatting each
    /// present value with `value`. An absent value is written as `<nil>`.
    pub fn render_with(&self, value: impl Fn(&Node) -> String) -> String {
        let side = |node: Option<&Node>| node.map_or_else(|| "<nil>".to_string(), &value);
        let rendered = match self.change_type {
            ChangeType::Added => side(self.new_value.as_ref()),
            ChangeType::Changed => format!(
                "{} -> {}",
                side(self.old_value.as_ref()),
                side(self.new_value.as_ref())
            ),
            ChangeType::Removed => side(self.old_value.as_ref()),
        };
        format!("{} {}: {}", self.change_type, self.path, rendered)
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(Node::to_string))
    }
}

/// Statistics about the diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub added: usize,
    pub changed: usize,
    pub removed: usize,
}

impl DiffStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_changes(changes: &[Change]) -> Self {
        let mut stats = Self::new();
        for change in changes {
            match change.change_type {
                ChangeType::Added => stats.added += 1,
                ChangeType::Changed => stats.changed += 1,
                ChangeType::Removed => stats.removed += 1,
            }
        }
        stats
    }

    pub fn total_changes(&self) -> usize {
        self.added + self.changed + self.removed
    }

    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

/// The complete, canonically ordered diff result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diff {
    pub changes: Vec<Change>,
    pub stats: DiffStats,
}

impl Diff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }
}

/// Computes the structural diff between two trees.
///
/// This never fails: any combination of shapes is classified as added,
/// removed or changed. Both trees are left untouched and the returned
/// changes are sorted with [`compare_changes`].
///
/// # Examples
///
/// ```
/// use mapdiff::{compute_diff, parse_json, ChangeType};
///
/// let old = parse_json(r#"{"x": {"a": 1}}"#).unwrap();
/// let new = parse_json(r#"{"x": [1, 2]}"#).unwrap();
/// let diff = compute_diff(&old, &new);
///
/// assert_eq!(diff.len(), 1);
/// assert_eq!(diff.changes[0].change_type, ChangeType::Changed);
/// assert_eq!(diff.changes[0].to_string(), r#"Change x: {"a":1} -> [1,2]"#);
/// ```
pub fn compute_diff(old: &Node, new: &Node) -> Diff {
    let mut changes = Vec::new();
    let mut path = Vec::new();
    diff_nodes(old, new, &mut path, &mut changes);
    changes.sort_by(compare_changes);

    let stats = DiffStats::from_changes(&changes);
    debug!(
        added = stats.added,
        changed = stats.changed,
        removed = stats.removed,
        "diff computed"
    );

    Diff { changes, stats }
}

/// Canonical ordering: by action label, then by path.
pub fn compare_changes(a: &Change, b: &Change) -> Ordering {
    a.change_type
        .label()
        .cmp(b.change_type.label())
        .then_with(|| a.path.cmp(&b.path))
}

/// Classifies one position and recurses into matching containers.
fn diff_nodes(old: &Node, new: &Node, path: &mut Vec<PathNode>, changes: &mut Vec<Change>) {
    match (old, new) {
        (Node::Map(old_map), Node::Map(new_map)) => diff_maps(old_map, new_map, path, changes),
        (Node::List(old_list), Node::List(new_list)) => {
            diff_lists(old_list, new_list, path, changes)
        }
        _ => {
            if !old.structural_eq(new) {
                changes.push(Change::changed(path, old, new));
            }
        }
    }
}

fn diff_maps(old_map: &Map, new_map: &Map, path: &mut Vec<PathNode>, changes: &mut Vec<Change>) {
    for (key, old_value) in old_map {
        path.push(PathNode::Key(key.clone()));
        match new_map.get(key) {
            Some(new_value) => diff_nodes(old_value, new_value, path, changes),
            None => changes.push(Change::removed(path, old_value)),
        }
        path.pop();
    }

    for (key, new_value) in new_map {
        if old_map.contains_key(key) {
            continue;
        }
        path.push(PathNode::Key(key.clone()));
        changes.push(Change::added(path, new_value));
        path.pop();
    }
}

/// Lists are compared by index; no alignment is attempted.
fn diff_lists(
    old_list: &[Node],
    new_list: &[Node],
    path: &mut Vec<PathNode>,
    changes: &mut Vec<Change>,
) {
    let min_len = old_list.len().min(new_list.len());

    for (i, (old_item, new_item)) in old_list.iter().zip(new_list).enumerate() {
        path.push(PathNode::Index(i));
        diff_nodes(old_item, new_item, path, changes);
        path.pop();
    }

    for (i, item) in new_list.iter().enumerate().skip(min_len) {
        path.push(PathNode::Index(i));
        changes.push(Change::added(path, item));
        path.pop();
    }

    for (i, item) in old_list.iter().enumerate().skip(min_len) {
        path.push(PathNode::Index(i));
        changes.push(Change::removed(path, item));
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Scalar;

    fn map(entries: Vec<(&str, Node)>) -> Node {
        Node::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn test_diff_stats_new() {
        let stats = DiffStats::new();
        assert_eq!(stats.total_changes(), 0);
        assert!(stats.is_empty());
    }

    #[test]
    fn test_diff_identical_scalars() {
        assert!(compute_diff(&Node::null(), &Node::null()).is_empty());
        assert!(compute_diff(&Node::from(true), &Node::from(true)).is_empty());
        assert!(compute_diff(&Node::from(42i64), &Node::from(42i64)).is_empty());
        assert!(compute_diff(&Node::from("hello"), &Node::from("hello")).is_empty());
    }

    #[test]
    fn test_diff_root_scalar_change() {
        let diff = compute_diff(&Node::from(1i64), &Node::from(2i64));
        assert_eq!(diff.len(), 1);
        assert_eq!(diff.changes[0].path, "");
        assert_eq!(diff.changes[0].change_type, ChangeType::Changed);
    }

    #[test]
    fn test_diff_null_to_string() {
        let old = map(vec![("d5", Node::null())]);
        let new = map(vec![("d5", Node::from("nil"))]);
        let diff = compute_diff(&old, &new);
        assert_eq!(diff.changes[0].to_string(), "Change d5: <nil> -> nil");
    }

    #[test]
    fn test_diff_opaque_not_expanded() {
        let old_inner = map(vec![("e3", Node::from("v3")), ("e4", Node::from("v4"))]);
        let new_inner = map(vec![("e3", Node::from("v4")), ("e4", Node::from("v4"))]);
        let old = map(vec![("m", Node::opaque(old_inner.clone()))]);
        let new = map(vec![("m", Node::opaque(new_inner.clone()))]);

        let diff = compute_diff(&old, &new);
        assert_eq!(diff.len(), 1);
        let change = &diff.changes[0];
        assert_eq!(change.path, "m");
        assert_eq!(change.change_type, ChangeType::Changed);
        assert_eq!(
            change.old_value,
            Some(Node::Scalar(Scalar::Opaque(Box::new(old_inner))))
        );
        assert_eq!(
            change.new_value,
            Some(Node::Scalar(Scalar::Opaque(Box::new(new_inner))))
        );
    }

    #[test]
    fn test_diff_opaque_vs_map_is_changed() {
        let inner = map(vec![("a", Node::from(1i64))]);
        let old = map(vec![("m", inner.clone())]);
        let new = map(vec![("m", Node::opaque(inner))]);
        let diff = compute_diff(&old, &new);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff.changes[0].path, "m");
    }

    #[test]
    fn test_path_does_not_leak_between_siblings() {
        let old = map(vec![
            ("a", map(vec![("x", Node::from(1i64))])),
            ("b", map(vec![("y", Node::from(1i64))])),
        ]);
        let new = map(vec![
            ("a", map(vec![("x", Node::from(2i64))])),
            ("b", map(vec![("y", Node::from(2i64))])),
        ]);
        let paths: Vec<String> = compute_diff(&old, &new)
            .changes
            .into_iter()
            .map(|c| c.path)
            .collect();
        assert_eq!(paths, vec!["a.x", "b.y"]);
    }

    #[test]
    fn test_compare_changes_orders_by_label_then_path() {
        let value = Node::from(1i64);
        let remove = Change::removed(&[PathNode::key("a")], &value);
        let add = Change::added(&[PathNode::key("z")], &value);
        let change = Change::changed(&[PathNode::key("m")], &value, &value);

        let mut changes = vec![remove.clone(), change.clone(), add.clone()];
        changes.sort_by(compare_changes);
        assert_eq!(changes, vec![add, change, remove]);
    }

    #[test]
    fn test_change_display() {
        let added = Change {
            path: "a1.b1.c1.d7".to_string(),
            change_type: ChangeType::Added,
            old_value: None,
            new_value: Some(Node::from(3i64)),
        };
        assert_eq!(added.to_string(), "Add a1.b1.c1.d7: 3");

        let changed = Change {
            path: "a1.b1.c1.d5".to_string(),
            change_type: ChangeType::Changed,
            old_value: None,
            new_value: Some(Node::from("nil")),
        };
        assert_eq!(changed.to_string(), "Change a1.b1.c1.d5: <nil> -> nil");

        let removed = Change {
            path: "a1.b1.c1.d4[1]".to_string(),
            change_type: ChangeType::Removed,
            old_value: Some(Node::from(5i64)),
            new_value: None,
        };
        assert_eq!(removed.to_string(), "Remove a1.b1.c1.d4[1]: 5");
    }
}
