//! Error tree construction.
//!
//! This module provides [`ErrorNode`], the nested shape produced from
//! property paths, and [`TreeBuilder`], which folds `(segments, message)`
//! pairs into it.
//!
//! A path may be both the target of an error and the parent of deeper
//! errors (an object-level constraint on `items[0]` next to a property
//! constraint on `items[0].name`). Such a node is a [`ErrorNode::Branch`]
//! whose own messages live in its `root` list, rendered under the
//! [`ROOT_KEY`] key.
//!
//! A property that is itself named `_root` is an ordinary child. Its key
//! gains one leading underscore when rendered (`_root` becomes `__root`,
//! `__root` becomes `___root`), so the rendered `_root` key always means
//! "this node's own messages".

use std::borrow::Cow;

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Key under which a branch's own messages are rendered.
pub const ROOT_KEY: &str = "_root";

/// A node of the error tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorNode {
    /// Messages attached to one exact path, in arrival order.
    Leaf(Vec<String>),
    /// A level of nesting.
    Branch {
        /// Messages targeting this node itself.
        root: Option<Vec<String>>,
        /// Child nodes by segment, in insertion order.
        children: IndexMap<String, ErrorNode>,
    },
}

impl Default for ErrorNode {
    fn default() -> Self {
        Self::branch()
    }
}

impl ErrorNode {
    /// Creates an empty branch.
    pub fn branch() -> Self {
        ErrorNode::Branch {
            root: None,
            children: IndexMap::new(),
        }
    }

    /// Returns true for a branch with no messages and no children.
    pub fn is_empty(&self) -> bool {
        match self {
            ErrorNode::Leaf(messages) => messages.is_empty(),
            ErrorNode::Branch { root, children } => root.is_none() && children.is_empty(),
        }
    }

    /// Returns the child at `segment`, if this is a branch that has one.
    pub fn get(&self, segment: &str) -> Option<&ErrorNode> {
        match self {
            ErrorNode::Leaf(_) => None,
            ErrorNode::Branch { children, .. } => children.get(segment),
        }
    }

    /// Returns the messages attached directly to this node.
    ///
    /// For a leaf these are its messages, for a branch its `root` list.
    pub fn messages(&self) -> &[String] {
        match self {
            ErrorNode::Leaf(messages) => messages,
            ErrorNode::Branch { root, .. } => root.as_deref().unwrap_or(&[]),
        }
    }

    /// Counts every message in this subtree.
    pub fn message_count(&self) -> usize {
        match self {
            ErrorNode::Leaf(messages) => messages.len(),
            ErrorNode::Branch { root, children } => {
                root.as_ref().map_or(0, Vec::len)
                    + children.values().map(ErrorNode::message_count).sum::<usize>()
            }
        }
    }

    /// Renders the node as JSON.
    ///
    /// Leaves become arrays of strings. Branches become objects with the
    /// `_root` list first (when present) followed by the children. Child
    /// keys spelled like the root key are escaped, see [`rendered_key`].
    pub fn to_value(&self) -> Value {
        match self {
            ErrorNode::Leaf(messages) => Value::from(messages.clone()),
            ErrorNode::Branch { root, children } => {
                let mut object = Map::new();
                if let Some(messages) = root {
                    object.insert(ROOT_KEY.to_string(), Value::from(messages.clone()));
                }
                for (segment, child) in children {
                    object.insert(rendered_key(segment).into_owned(), child.to_value());
                }
                Value::Object(object)
            }
        }
    }

    /// Replaces a leaf with a branch holding the leaf's messages as `root`.
    fn promote(&mut self) {
        if let ErrorNode::Leaf(messages) = self {
            tracing::trace!(messages = messages.len(), "promoting leaf to branch");
            let messages = std::mem::take(messages);
            *self = ErrorNode::Branch {
                root: Some(messages),
                children: IndexMap::new(),
            };
        }
    }

    /// Promotes this node if needed and returns its branch parts.
    fn branch_mut(&mut self) -> (&mut Option<Vec<String>>, &mut IndexMap<String, ErrorNode>) {
        self.promote();
        match self {
            ErrorNode::Branch { root, children } => (root, children),
            ErrorNode::Leaf(_) => unreachable!("promote always leaves a branch"),
        }
    }

    /// Appends a message targeting this node itself.
    fn push_own(&mut self, message: String) {
        match self {
            ErrorNode::Leaf(messages) => messages.push(message),
            ErrorNode::Branch { root, .. } => root.get_or_insert_with(Vec::new).push(message),
        }
    }
}

/// Returns the object key a child segment renders under.
///
/// Segments made of one or more underscores followed by `root` get one more
/// leading underscore; every other segment renders as is.
///
/// ```rust
/// use violation_response::tree::rendered_key;
///
/// assert_eq!(rendered_key("name"), "name");
/// assert_eq!(rendered_key("_root"), "__root");
/// assert_eq!(rendered_key("__root"), "___root");
/// assert_eq!(rendered_key("root"), "root");
/// ```
pub fn rendered_key(segment: &str) -> Cow<'_, str> {
    let escaped = segment.starts_with('_') && segment.trim_start_matches('_') == "root";
    if escaped {
        Cow::Owned(format!("_{}", segment))
    } else {
        Cow::Borrowed(segment)
    }
}

impl From<&ErrorNode> for Value {
    fn from(node: &ErrorNode) -> Self {
        node.to_value()
    }
}

/// Accumulates messages into an [`ErrorNode`] tree.
///
/// The builder starts from an empty branch and is mutated once per message.
/// Nothing is ever removed; the only restructuring is promotion of a leaf
/// into a branch when a deeper path arrives under it.
///
/// # Example
///
/// ```rust
/// use violation_response::{PropertyPath, TreeBuilder};
/// use serde_json::json;
///
/// let mut builder = TreeBuilder::new();
/// builder.insert(PropertyPath::parse("items[0]").as_slice(), "Item is invalid");
/// builder.insert(PropertyPath::parse("items[0].name").as_slice(), "Name is required");
///
/// assert_eq!(
///     builder.build().to_value(),
///     json!({"items": {"0": {"_root": ["Item is invalid"], "name": ["Name is required"]}}})
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    root: ErrorNode,
}

impl TreeBuilder {
    /// Creates a builder holding an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one message at the location named by `segments`.
    ///
    /// An empty segment list targets the root of the tree. Every other
    /// segment, including one spelled `_root`, names a child.
    pub fn insert<S: AsRef<str>>(&mut self, segments: &[S], message: impl Into<String>) {
        let message = message.into();

        let Some((last, parents)) = segments.split_last() else {
            self.root.push_own(message);
            return;
        };

        let mut node = &mut self.root;
        for segment in parents {
            let (_, children) = node.branch_mut();
            node = children
                .entry(segment.as_ref().to_string())
                .or_insert_with(ErrorNode::branch);
        }

        let (_, children) = node.branch_mut();
        match children.entry(last.as_ref().to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(ErrorNode::Leaf(vec![message]));
            }
            Entry::Occupied(mut entry) => entry.get_mut().push_own(message),
        }
    }

    /// Returns the accumulated tree.
    pub fn build(self) -> ErrorNode {
        self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(entries: &[(&str, &str)]) -> ErrorNode {
        let mut builder = TreeBuilder::new();
        for (path, message) in entries {
            let segments: Vec<&str> = if path.is_empty() {
                Vec::new()
            } else {
                path.split('.').collect()
            };
            builder.insert(&segments, *message);
        }
        builder.build()
    }

    #[test]
    fn test_empty_builder_yields_empty_branch() {
        let tree = TreeBuilder::new().build();
        assert!(tree.is_empty());
        assert_eq!(tree.to_value(), json!({}));
    }

    #[test]
    fn test_single_segment() {
        let tree = build(&[("name", "required")]);
        assert_eq!(tree.to_value(), json!({"name": ["required"]}));
    }

    #[test]
    fn test_root_messages() {
        let tree = build(&[("", "first"), ("", "second")]);
        assert_eq!(tree.to_value(), json!({"_root": ["first", "second"]}));
        assert_eq!(tree.messages(), &["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_shared_prefix() {
        let tree = build(&[("a.b", "1"), ("a.c", "2")]);
        assert_eq!(tree.to_value(), json!({"a": {"b": ["1"], "c": ["2"]}}));
    }

    #[test]
    fn test_messages_accumulate_in_order() {
        let tree = build(&[("a.b", "1"), ("a.b", "2"), ("a.b", "3")]);
        assert_eq!(tree.get("a").unwrap().get("b").unwrap().messages(), &["1", "2", "3"]);
    }

    #[test]
    fn test_leaf_then_branch_promotes() {
        let tree = build(&[("a", "m1"), ("a.b", "m2")]);
        assert_eq!(tree.to_value(), json!({"a": {"_root": ["m1"], "b": ["m2"]}}));
    }

    #[test]
    fn test_branch_then_leaf_folds_into_root() {
        let tree = build(&[("a.b", "m2"), ("a", "m1")]);
        assert_eq!(tree.to_value(), json!({"a": {"_root": ["m1"], "b": ["m2"]}}));
    }

    #[test]
    fn test_promotion_order_independent() {
        let forward = build(&[("a", "m1"), ("a.b", "m2")]);
        let reverse = build(&[("a.b", "m2"), ("a", "m1")]);
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_deep_promotion_keeps_all_messages() {
        let tree = build(&[
            ("a", "1"),
            ("a.b", "2"),
            ("a.b.c", "3"),
            ("a", "4"),
            ("a.b", "5"),
        ]);
        assert_eq!(
            tree.to_value(),
            json!({"a": {"_root": ["1", "4"], "b": {"_root": ["2", "5"], "c": ["3"]}}})
        );
        assert_eq!(tree.message_count(), 5);
    }

    #[test]
    fn test_root_and_fields_together() {
        let tree = build(&[("name", "required"), ("", "object invalid")]);
        assert_eq!(
            tree.to_value(),
            json!({"_root": ["object invalid"], "name": ["required"]})
        );
    }

    #[test]
    fn test_field_named_root_stays_separate() {
        let tree = build(&[("a._root.b", "real field"), ("a.b", "other")]);
        assert_eq!(
            tree.to_value(),
            json!({"a": {"__root": {"b": ["real field"]}, "b": ["other"]}})
        );
        assert_eq!(tree.get("a").unwrap().get("_root").unwrap().message_count(), 1);
    }

    #[test]
    fn test_field_named_root_next_to_own_messages() {
        let tree = build(&[("a", "own"), ("a._root", "field"), ("a.__root", "deeper")]);
        assert_eq!(
            tree.to_value(),
            json!({"a": {"_root": ["own"], "__root": ["field"], "___root": ["deeper"]}})
        );
        assert_eq!(tree.message_count(), 3);
    }

    #[test]
    fn test_root_key_first_in_rendered_object() {
        let tree = build(&[("a.b", "child"), ("a", "own")]);
        let value = tree.to_value();
        let keys: Vec<&String> = value["a"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["_root", "b"]);
    }
}
