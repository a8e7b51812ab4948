//! Selectors - predicates over a single node
//!
//! A selector is a pure function `&DomNode -> bool`. Built-in kinds are enum
//! variants so they can be inspected and compared in tests; anything else goes
//! through [`Selector::custom`].
//!
//! Several selectors passed to one operation are OR-ed together, and an empty
//! list matches every node. See [`match_any`].

use dom::{DomNode, NodeType};
use std::fmt;
use std::sync::Arc;

/// Caller-supplied predicate
pub type Predicate = Arc<dyn Fn(&DomNode) -> bool + Send + Sync>;

#[derive(Clone)]
pub enum Selector {
    /// Elements with this tag
    Tag(String),
    /// Elements whose `id` attribute equals the value
    Id(String),
    /// Elements whose whitespace-separated `class` list contains the token
    Class(String),
    /// Elements whose attribute `key` equals `value`
    Attr { key: String, value: String },
    /// Any node of this type
    Type(NodeType),
    Custom(Predicate),
}

impl Selector {
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&DomNode) -> bool + Send + Sync + 'static,
    {
        Selector::Custom(Arc::new(predicate))
    }

    /// Evaluate against one node
    pub fn matches(&self, node: &DomNode) -> bool {
        match self {
            Selector::Tag(tag) => node.tag_name() == Some(tag.as_str()),
            Selector::Id(id) => node.is_element() && attr_or_empty(node, "id") == id.as_str(),
            Selector::Class(class) => {
                node.is_element()
                    && attr_or_empty(node, "class")
                        .split_whitespace()
                        .any(|token| token == class.as_str())
            }
            Selector::Attr { key, value } => {
                node.is_element() && attr_or_empty(node, key) == value.as_str()
            }
            Selector::Type(node_type) => node.node_type == *node_type,
            Selector::Custom(predicate) => predicate(node),
        }
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            Selector::Id(id) => f.debug_tuple("Id").field(id).finish(),
            Selector::Class(class) => f.debug_tuple("Class").field(class).finish(),
            Selector::Attr { key, value } => f
                .debug_struct("Attr")
                .field("key", key)
                .field("value", value)
                .finish(),
            Selector::Type(node_type) => f.debug_tuple("Type").field(node_type).finish(),
            Selector::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Absent and empty attributes both read as `""`
fn attr_or_empty<'n>(node: &'n DomNode, key: &str) -> &'n str {
    node.attr(key).unwrap_or("")
}

pub fn by_tag(tag: impl Into<String>) -> Selector {
    Selector::Tag(tag.into())
}

pub fn by_id(id: impl Into<String>) -> Selector {
    Selector::Id(id.into())
}

pub fn by_class(class: impl Into<String>) -> Selector {
    Selector::Class(class.into())
}

pub fn by_attr(key: impl Into<String>, value: impl Into<String>) -> Selector {
    Selector::Attr {
        key: key.into(),
        value: value.into(),
    }
}

pub fn by_type(node_type: NodeType) -> Selector {
    Selector::Type(node_type)
}

/// True when `selectors` is empty or any of them matches
#[inline]
pub fn match_any(node: &DomNode, selectors: &[Selector]) -> bool {
    selectors.is_empty() || selectors.iter().any(|s| s.matches(node))
}
