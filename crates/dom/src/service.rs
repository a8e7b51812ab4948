//! DOM Service - builds a [`DomArena`] from serialized trees
//!
//! The query layer never parses markup. Trees reach it already built, and
//! this service is the adapter for the one wire shape we accept: the JSON
//! returned by the DevTools `DOM.getDocument` command.
//!
//! Handles:
//! - Node type / name / value / attribute extraction
//! - Tag normalization (DevTools reports upper-case `nodeName`)
//! - Optional comment stripping
//! - Depth limiting for hostile input

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::*;
use serde_json::Value;

/// Configuration for DOM service
#[derive(Debug, Clone)]
pub struct DomServiceConfig {
    pub max_depth: usize,
    pub keep_comments: bool,
    pub lowercase_tags: bool,
}

impl Default for DomServiceConfig {
    fn default() -> Self {
        Self {
            max_depth: 512,
            keep_comments: true,
            lowercase_tags: true,
        }
    }
}

/// Main DOM service
pub struct DomService {
    config: DomServiceConfig,
    arena: DomArena,
}

impl DomService {
    /// Create new DOM service with default config
    pub fn new() -> Self {
        Self::with_config(DomServiceConfig::default())
    }

    /// Create DOM service with custom config
    pub fn with_config(config: DomServiceConfig) -> Self {
        Self {
            config,
            arena: DomArena::new(),
        }
    }

    pub fn config(&self) -> &DomServiceConfig {
        &self.config
    }

    /// Get reference to internal arena
    pub fn arena(&self) -> &DomArena {
        &self.arena
    }

    /// Hand the built tree over to the caller
    pub fn into_arena(self) -> DomArena {
        self.arena
    }

    /// Parse raw JSON text, see [`DomService::parse_cdp_dom_tree`]
    pub fn parse_cdp_dom_str(&mut self, json: &str) -> Result<NodeId> {
        let value: Value = serde_json::from_str(json)?;
        self.parse_cdp_dom_tree(&value)
    }

    /// Parse a `DOM.getDocument` response and rebuild the arena from it
    ///
    /// Input format:
    /// ```json
    /// {
    ///   "root": {
    ///     "nodeType": 9,
    ///     "nodeName": "#document",
    ///     "children": [{
    ///       "nodeType": 1,
    ///       "nodeName": "DIV",
    ///       "attributes": ["class", "container"],
    ///       "children": [{ "nodeType": 3, "nodeName": "#text", "nodeValue": "Hi" }]
    ///     }]
    ///   }
    /// }
    /// ```
    ///
    /// `shadowRoots` and `contentDocument` are not followed.
    pub fn parse_cdp_dom_tree(&mut self, cdp_response: &Value) -> Result<NodeId> {
        let root = cdp_response
            .get("root")
            .ok_or_else(|| DomError::MalformedInput("Missing 'root' in response".to_string()))?;

        // Built aside and swapped in on success; a failed parse keeps the old tree
        let mut arena = DomArena::new();
        let root_id = self
            .parse_node(&mut arena, root, None, 0)?
            .ok_or_else(|| DomError::MalformedInput("Root node was filtered out".to_string()))?;
        arena.set_root(root_id)?;

        tracing::debug!(
            "[DomService] Built tree with {} nodes (root {})",
            arena.len(),
            root_id
        );
        self.arena = arena;

        Ok(root_id)
    }

    /// Recursively parse a node; `None` when the node is filtered out
    fn parse_node(
        &self,
        arena: &mut DomArena,
        cdp_node: &Value,
        parent_id: Option<NodeId>,
        depth: usize,
    ) -> Result<Option<NodeId>> {
        if depth > self.config.max_depth {
            return Err(DomError::MaxDepthExceeded {
                current: depth,
                max: self.config.max_depth,
            });
        }

        let node_type_val = cdp_node["nodeType"]
            .as_u64()
            .ok_or_else(|| DomError::MalformedInput("Missing nodeType".to_string()))?;

        let node_type = u8::try_from(node_type_val)
            .ok()
            .and_then(NodeType::from_u8)
            .ok_or_else(|| DomError::InvalidNodeType {
                expected: "Element, Text, Comment, Document or DocumentType".to_string(),
                actual: format!("{}", node_type_val),
            })?;

        if node_type == NodeType::Comment && !self.config.keep_comments {
            tracing::trace!("[DomService] Dropping comment at depth {}", depth);
            return Ok(None);
        }

        let mut node_name = cdp_node["nodeName"].as_str().unwrap_or("").to_string();
        if node_type == NodeType::Element && self.config.lowercase_tags {
            node_name.make_ascii_lowercase();
        }

        let mut node = DomNode::new(node_type, node_name);
        node.node_value = cdp_node["nodeValue"].as_str().unwrap_or("").to_string();

        // Attributes arrive flattened: [k0, v0, k1, v1, ...]
        if let Some(attrs) = cdp_node["attributes"].as_array() {
            for pair in attrs.chunks_exact(2) {
                if let (Some(key), Some(value)) = (pair[0].as_str(), pair[1].as_str()) {
                    node.attributes.push(Attribute::new(key, value));
                }
            }
        }

        let current_node_id = arena.add_node(node);
        if let Some(parent_id) = parent_id {
            arena.append_child(parent_id, current_node_id)?;
        }

        if let Some(children) = cdp_node["children"].as_array() {
            for child in children {
                self.parse_node(arena, child, Some(current_node_id), depth + 1)?;
            }
        }

        Ok(Some(current_node_id))
    }
}

impl Default for DomService {
    fn default() -> Self {
        Self::new()
    }
}
