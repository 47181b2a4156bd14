//! The document tree model.
//!
//! A configuration document is a tree of [`Node`]s. Each node carries a
//! [`Value`] — a mapping, a sequence or a scalar — together with the comments
//! attached to it in the source text: an optional block comment (the lines
//! preceding the node) and an optional inline comment (trailing the node's
//! line). Nodes are exclusively owned by their parent; the tree is acyclic.
//!
//! # Usage
//!
//! ```
//! use upkeep::node::{Mapping, Node, Scalar};
//!
//! let tree = Mapping::new()
//!     .with("name", Node::from("default"))
//!     .with(
//!         "nested",
//!         Node::from(Mapping::new().with("a", Node::from(1))),
//!     );
//!
//! let name = tree.get(&"name".into()).unwrap();
//! assert!(name.is_scalar());
//! assert_eq!(name.as_scalar().unwrap().as_str(), Some("default"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

mod mapping;
mod scalar;

pub use mapping::Mapping;
pub use scalar::Scalar;

/// Where a comment is attached relative to its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentPlacement {
    /// Text on the line(s) preceding the node.
    Block,
    /// Text trailing the node's own line.
    Inline,
}

/// The payload of a [`Node`]: a mapping, a sequence or a scalar leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Ordered key → node pairs with unique keys.
    Mapping(Mapping),
    /// Ordered list of nodes.
    Sequence(Vec<Node>),
    /// Leaf value.
    Scalar(Scalar),
}

impl Value {
    /// Returns the type name as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Mapping(_) => "mapping",
            Value::Sequence(_) => "sequence",
            Value::Scalar(_) => "scalar",
        }
    }
}

/// A single node of a document tree: a value plus its attached comments.
///
/// Comments travel with the node through every update operation — supplying
/// a defaults subtree, relocating a user node and keeping a customized leaf
/// all preserve them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    block_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_comment: Option<String>,
}

impl Node {
    /// Creates a node from a value, with no comments.
    pub fn new(value: impl Into<Value>) -> Self {
        Node {
            value: value.into(),
            block_comment: None,
            inline_comment: None,
        }
    }

    /// Returns the node's value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns a mutable reference to the node's value.
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Replaces the node's value, keeping its comments.
    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.value = value.into();
    }

    /// Returns true if this node holds a mapping.
    pub fn is_mapping(&self) -> bool {
        matches!(self.value, Value::Mapping(_))
    }

    /// Returns true if this node holds a sequence.
    pub fn is_sequence(&self) -> bool {
        matches!(self.value, Value::Sequence(_))
    }

    /// Returns true if this node holds a scalar.
    pub fn is_scalar(&self) -> bool {
        matches!(self.value, Value::Scalar(_))
    }

    /// Returns the mapping held by this node, if any.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match &self.value {
            Value::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Returns a mutable reference to the mapping held by this node, if any.
    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match &mut self.value {
            Value::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Returns the sequence held by this node, if any.
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match &self.value {
            Value::Sequence(nodes) => Some(nodes),
            _ => None,
        }
    }

    /// Returns a mutable reference to the sequence held by this node, if any.
    pub fn as_sequence_mut(&mut self) -> Option<&mut Vec<Node>> {
        match &mut self.value {
            Value::Sequence(nodes) => Some(nodes),
            _ => None,
        }
    }

    /// Returns the scalar held by this node, if any.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match &self.value {
            Value::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Returns the comment at `placement`, if any.
    pub fn comment(&self, placement: CommentPlacement) -> Option<&str> {
        match placement {
            CommentPlacement::Block => self.block_comment.as_deref(),
            CommentPlacement::Inline => self.inline_comment.as_deref(),
        }
    }

    /// Sets the comment at `placement`.
    pub fn set_comment(&mut self, placement: CommentPlacement, text: impl Into<String>) {
        let slot = match placement {
            CommentPlacement::Block => &mut self.block_comment,
            CommentPlacement::Inline => &mut self.inline_comment,
        };
        *slot = Some(text.into());
    }

    /// Clears the comment at `placement`.
    pub fn clear_comment(&mut self, placement: CommentPlacement) {
        match placement {
            CommentPlacement::Block => self.block_comment = None,
            CommentPlacement::Inline => self.inline_comment = None,
        }
    }

    /// Builder method to attach a block comment.
    pub fn with_block_comment(mut self, text: impl Into<String>) -> Self {
        self.block_comment = Some(text.into());
        self
    }

    /// Builder method to attach an inline comment.
    pub fn with_inline_comment(mut self, text: impl Into<String>) -> Self {
        self.inline_comment = Some(text.into());
        self
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::new(Scalar::Null)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::Scalar(scalar) => write!(f, "{scalar}"),
            Value::Sequence(nodes) => {
                write!(f, "[")?;
                for (i, node) in nodes.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{node}")?;
                }
                write!(f, "]")
            }
            Value::Mapping(mapping) => {
                write!(f, "{{")?;
                let mut first = true;
                for (key, node) in mapping.iter() {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {node}")?;
                    first = false;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Value::Mapping(value)
    }
}

impl From<Vec<Node>> for Value {
    fn from(value: Vec<Node>) -> Self {
        Value::Sequence(value)
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<Mapping> for Node {
    fn from(value: Mapping) -> Self {
        Node::new(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::new(value)
    }
}

impl From<Scalar> for Node {
    fn from(value: Scalar) -> Self {
        Node::new(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::new(Scalar::Bool(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::new(Scalar::Int(value))
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::new(Scalar::Int(value as i64))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::new(Scalar::Float(value))
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::new(Scalar::Text(value))
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::new(Scalar::Text(value.to_string()))
    }
}
