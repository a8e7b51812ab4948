//! Traversal primitives shared by every [`Set`](crate::Set) operation
//!
//! No recursion anywhere: descendant walks keep an explicit stack, link
//! chains are plain iterators. A dangling link ends the chain it is on.

use ahash::AHashSet;
use dom::{DomArena, DomNode, NodeId};
use smallvec::SmallVec;

pub(crate) type NodeIds = SmallVec<[NodeId; 8]>;

/// What the walker does after visiting a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Continue into the node's children
    Descend,
    /// Leave the node's subtree unvisited, continue with its siblings
    Skip,
    /// End the walk
    Stop,
}

/// Pre-order walk over the strict descendants of `start`
///
/// Returns `true` if `visit` stopped the walk.
pub(crate) fn walk_descendants<F>(arena: &DomArena, start: NodeId, mut visit: F) -> bool
where
    F: FnMut(&DomNode) -> Step,
{
    let mut stack: SmallVec<[NodeId; 32]> = arena
        .node(start)
        .and_then(|n| n.first_child_id)
        .into_iter()
        .collect();

    while let Some(node_id) = stack.pop() {
        let Some(node) = arena.node(node_id) else {
            continue;
        };

        let step = visit(node);
        if step == Step::Stop {
            return true;
        }

        // Sibling below child: the child's subtree is finished first
        if let Some(next_id) = node.next_sibling_id {
            stack.push(next_id);
        }
        if step == Step::Descend {
            if let Some(child_id) = node.first_child_id {
                stack.push(child_id);
            }
        }
    }

    false
}

/// Follow one link field from `start` until it runs out
pub(crate) fn chain<'a>(
    arena: &'a DomArena,
    start: Option<NodeId>,
    link: fn(&DomNode) -> Option<NodeId>,
) -> impl Iterator<Item = &'a DomNode> + 'a {
    std::iter::successors(start.and_then(|id| arena.node(id)), move |node| {
        link(node).and_then(|id| arena.node(id))
    })
}

/// Ordered output with first-visit-wins deduplication
pub(crate) struct Collector {
    seen: AHashSet<NodeId>,
    ids: NodeIds,
}

impl Collector {
    pub(crate) fn new() -> Self {
        Self {
            seen: AHashSet::new(),
            ids: NodeIds::new(),
        }
    }

    /// Returns `false` if the node was already collected
    pub(crate) fn push(&mut self, node_id: NodeId) -> bool {
        if self.seen.insert(node_id) {
            self.ids.push(node_id);
            true
        } else {
            false
        }
    }

    pub(crate) fn contains(&self, node_id: NodeId) -> bool {
        self.seen.contains(&node_id)
    }

    pub(crate) fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    pub(crate) fn into_ids(self) -> NodeIds {
        self.ids
    }
}
