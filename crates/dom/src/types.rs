//! Core node type definitions
//!
//! Key design principles:
//! 1. Use u32 for indices (4 bytes vs 8 bytes pointer)
//! 2. Every relation is an index, never a pointer
//! 3. Use SmallVec for small arrays (avoid heap allocation)

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Node identifier (index into arena)
/// u32 allows 4 billion nodes, enough for any document
pub type NodeId = u32;

/// Node type, numbered as in the DOM specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            3 => Some(NodeType::Text),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            10 => Some(NodeType::DocumentType),
            _ => None,
        }
    }

    /// Whether nodes of this type may have children
    pub fn is_container(self) -> bool {
        matches!(self, NodeType::Element | NodeType::Document)
    }
}

/// A single `key="value"` pair on an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The tree node
///
/// Layout:
/// - Small fixed-size fields first (better packing)
/// - Five link slots give O(1) navigation in every direction
/// - Attributes keep source order; duplicate keys are allowed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomNode {
    pub node_id: NodeId,
    pub node_type: NodeType,

    // Navigation indices
    pub parent_id: Option<NodeId>,
    pub first_child_id: Option<NodeId>,
    pub last_child_id: Option<NodeId>,
    pub next_sibling_id: Option<NodeId>,
    pub prev_sibling_id: Option<NodeId>,

    /// Tag for elements, doctype name for doctypes, `#text` etc. otherwise
    pub node_name: String,
    /// Data payload of text and comment nodes
    pub node_value: String,
    pub attributes: SmallVec<[Attribute; 4]>, // Most elements have <4 attributes
}

impl DomNode {
    /// Create a detached node; the arena assigns `node_id` on insertion
    pub fn new(node_type: NodeType, node_name: impl Into<String>) -> Self {
        Self {
            node_id: 0,
            node_type,
            parent_id: None,
            first_child_id: None,
            last_child_id: None,
            next_sibling_id: None,
            prev_sibling_id: None,
            node_name: node_name.into(),
            node_value: String::new(),
            attributes: SmallVec::new(),
        }
    }

    /// Get tag name for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        if self.node_type == NodeType::Element {
            Some(&self.node_name)
        } else {
            None
        }
    }

    /// Check if node is an element
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if node is text
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    pub fn has_children(&self) -> bool {
        self.first_child_id.is_some()
    }

    /// Get attribute value. The first occurrence of a repeated key wins.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == name)
            .map(|a| a.value.as_str())
    }
}
