//! Arena-based DOM tree storage
//!
//! "Bad programmers worry about the code. Good programmers worry about
//! data structures and their relationships."
//!
//! This arena eliminates:
//! - Rc/Arc overhead and parent/child reference cycles
//! - Recursive function calls (stack overflow risk)
//! - Cache misses (nodes stored sequentially)
//!
//! ## Memory Layout
//!
//! ```text
//! Arena: Vec<DomNode>
//!        [Node0][Node1][Node2]...
//!         ↑ 4-byte index, not 8-byte pointer
//!
//! parent ─first_child→ a ─next_sibling→ b ─next_sibling→ c
//!        ←────────────────last_child──────────────────── ┘
//! ```

use crate::error::{DomError, Result};
use crate::types::{Attribute, DomNode, NodeId, NodeType};

/// Arena allocator for DOM nodes
///
/// Nodes are added detached and linked with [`DomArena::append_child`].
/// Links are only ever written here, so sibling chains stay consistent.
#[derive(Debug)]
pub struct DomArena {
    /// All nodes stored sequentially (cache-friendly)
    nodes: Vec<DomNode>,

    /// Root node ID (if set)
    root_id: Option<NodeId>,
}

impl DomArena {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(1024), // Pre-allocate for typical page
            root_id: None,
        }
    }

    /// Create arena with specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root_id: None,
        }
    }

    /// Add a detached node to the arena, returns its ID
    pub fn add_node(&mut self, mut node: DomNode) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        node.node_id = node_id;
        node.parent_id = None;
        node.first_child_id = None;
        node.last_child_id = None;
        node.next_sibling_id = None;
        node.prev_sibling_id = None;
        self.nodes.push(node);
        node_id
    }

    pub fn create_document(&mut self) -> NodeId {
        self.add_node(DomNode::new(NodeType::Document, "#document"))
    }

    pub fn create_element<I>(&mut self, tag: &str, attributes: I) -> NodeId
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut node = DomNode::new(NodeType::Element, tag);
        node.attributes = attributes
            .into_iter()
            .map(|(key, value)| Attribute { key, value })
            .collect();
        self.add_node(node)
    }

    pub fn create_text(&mut self, data: &str) -> NodeId {
        let mut node = DomNode::new(NodeType::Text, "#text");
        node.node_value = data.to_string();
        self.add_node(node)
    }

    pub fn create_comment(&mut self, data: &str) -> NodeId {
        let mut node = DomNode::new(NodeType::Comment, "#comment");
        node.node_value = data.to_string();
        self.add_node(node)
    }

    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.add_node(DomNode::new(NodeType::DocumentType, name))
    }

    /// Link `child` as the last child of `parent`
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<()> {
        let parent = self.get(parent_id)?;
        if !parent.node_type.is_container() {
            return Err(DomError::InvalidNodeType {
                expected: "Element or Document parent".to_string(),
                actual: format!("{:?}", parent.node_type),
            });
        }
        let last_child_id = parent.last_child_id;

        let child = self.get(child_id)?;
        if child.node_type == NodeType::Document {
            return Err(DomError::InvalidNodeType {
                expected: "non-Document child".to_string(),
                actual: format!("{:?}", child.node_type),
            });
        }
        if child_id == parent_id || self.ancestors(parent_id).any(|id| id == child_id) {
            return Err(DomError::CycleDetected(child_id));
        }
        if child.parent_id.is_some() {
            return Err(DomError::AlreadyAttached(child_id));
        }

        match last_child_id {
            Some(last_id) => self.get_mut(last_id)?.next_sibling_id = Some(child_id),
            None => self.get_mut(parent_id)?.first_child_id = Some(child_id),
        }
        self.get_mut(parent_id)?.last_child_id = Some(child_id);

        let child = self.get_mut(child_id)?;
        child.parent_id = Some(parent_id);
        child.prev_sibling_id = last_child_id;

        Ok(())
    }

    /// Get node by ID (immutable)
    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.nodes
            .get(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID (mutable)
    ///
    /// Link fields should not be edited through this handle.
    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Infallible lookup for hot traversal paths
    #[inline]
    pub fn node(&self, node_id: NodeId) -> Option<&DomNode> {
        self.nodes.get(node_id as usize)
    }

    pub fn contains(&self, node_id: NodeId) -> bool {
        (node_id as usize) < self.nodes.len()
    }

    /// Set root node
    pub fn set_root(&mut self, node_id: NodeId) -> Result<()> {
        // Verify node exists
        self.get(node_id)?;
        self.root_id = Some(node_id);
        Ok(())
    }

    /// Get root node ID
    pub fn root_id(&self) -> Option<NodeId> {
        self.root_id
    }

    /// Get root node
    pub fn root(&self) -> Result<&DomNode> {
        let root_id = self
            .root_id
            .ok_or_else(|| DomError::MalformedInput("No root node set".to_string()))?;
        self.get(root_id)
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterator over all nodes
    pub fn iter(&self) -> impl Iterator<Item = &DomNode> {
        self.nodes.iter()
    }

    /// Iterator over all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| i as NodeId)
    }

    /// Child IDs of a node in document order
    pub fn children(&self, node_id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let first = self.node(node_id).and_then(|n| n.first_child_id);
        std::iter::successors(first, move |&id| self.node(id).and_then(|n| n.next_sibling_id))
    }

    /// Parent chain of a node, nearest first, excluding the node itself
    pub fn ancestors(&self, node_id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let parent = self.node(node_id).and_then(|n| n.parent_id);
        std::iter::successors(parent, move |&id| self.node(id).and_then(|n| n.parent_id))
    }

    /// Get parent of a node
    pub fn parent(&self, node_id: NodeId) -> Result<Option<&DomNode>> {
        let node = self.get(node_id)?;
        match node.parent_id {
            Some(parent_id) => Ok(Some(self.get(parent_id)?)),
            None => Ok(None),
        }
    }

    /// Traverse tree depth-first in document order (iterative, no recursion)
    ///
    /// Visits `start_id` itself, then every descendant.
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(&DomNode) -> Result<()>,
    {
        let start = self.get(start_id)?;
        visit(start)?;

        let mut stack: Vec<NodeId> = start.first_child_id.into_iter().collect();
        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            visit(node)?;

            // Sibling below child: the child's subtree is finished first
            if let Some(next_id) = node.next_sibling_id {
                stack.push(next_id);
            }
            if let Some(child_id) = node.first_child_id {
                stack.push(child_id);
            }
        }

        Ok(())
    }

    /// Clear arena (reuse allocation)
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root_id = None;
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}
