//! Set - an ordered selection of nodes in one arena
//!
//! Every operation takes `&self` plus a slice of selectors and returns a new
//! `Set`, so pipelines chain freely:
//!
//! ```text
//! root ─find(.list)→ [ul] ─children()→ [li, li] ─text()→ "First valueSecond value"
//! ```
//!
//! Nothing here fails. No match, an empty input and an out-of-range index
//! all produce an empty `Set` (or `""` for the scalar extractors), and the
//! next stage runs on that just as well.

use crate::selector::{match_any, Selector};
use crate::walk::{chain, walk_descendants, Collector, NodeIds, Step};
use dom::{DomArena, DomNode, NodeId};
use std::fmt;

/// Snapshot of node references borrowed against a [`DomArena`]
#[derive(Clone)]
pub struct Set<'a> {
    arena: &'a DomArena,
    ids: NodeIds,
}

/// How far a descendant search goes below a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Depth {
    /// Stop at a match, its descendants are not examined
    Shallow,
    /// Keep walking into a match's descendants
    Nested,
}

impl<'a> Set<'a> {
    /// Build a set from node ids. Ids the arena does not know are dropped.
    pub fn new<I>(arena: &'a DomArena, ids: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        let ids = ids.into_iter().filter(|&id| arena.contains(id)).collect();
        Self { arena, ids }
    }

    /// Singleton of the arena's root, empty if no root is set
    pub fn root(arena: &'a DomArena) -> Self {
        Self::new(arena, arena.root_id())
    }

    pub fn of(arena: &'a DomArena, node_id: NodeId) -> Self {
        Self::new(arena, Some(node_id))
    }

    pub fn empty(arena: &'a DomArena) -> Self {
        Self {
            arena,
            ids: NodeIds::new(),
        }
    }

    fn from_ids(arena: &'a DomArena, ids: NodeIds) -> Self {
        Self { arena, ids }
    }

    fn traced(self, op: &'static str, inputs: usize) -> Self {
        tracing::trace!("[Set] {}: {} -> {} nodes", op, inputs, self.ids.len());
        self
    }

    pub fn arena(&self) -> &'a DomArena {
        self.arena
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn node_ids(&self) -> &[NodeId] {
        &self.ids
    }

    /// Member at `index`
    pub fn get(&self, index: usize) -> Option<&'a DomNode> {
        self.ids.get(index).and_then(|&id| self.arena.node(id))
    }

    pub fn iter(&self) -> Iter<'_, 'a> {
        Iter {
            arena: self.arena,
            inner: self.ids.iter(),
        }
    }

    /// Matching element descendants, including matches nested in matches
    ///
    /// Never includes the members themselves. Output is in member order,
    /// document order within a member, without duplicates.
    pub fn find(&self, selectors: &[Selector]) -> Set<'a> {
        let found = self.descendants(selectors, Depth::Nested);
        Self::from_ids(self.arena, found.into_ids()).traced("find", self.len())
    }

    /// Alias of [`Set::find`]
    pub fn find_all(&self, selectors: &[Selector]) -> Set<'a> {
        let found = self.descendants(selectors, Depth::Nested);
        Self::from_ids(self.arena, found.into_ids()).traced("find_all", self.len())
    }

    /// Matching element descendants, without looking inside a match
    ///
    /// No result is a descendant of another result, even when members of
    /// this set are nested in each other.
    pub fn find_shallow(&self, selectors: &[Selector]) -> Set<'a> {
        let found = self.descendants(selectors, Depth::Shallow);

        let ids = if self.ids.len() > 1 {
            let arena = self.arena;
            found
                .ids()
                .iter()
                .copied()
                .filter(|&id| !arena.ancestors(id).any(|a| found.contains(a)))
                .collect()
        } else {
            found.into_ids()
        };

        Self::from_ids(self.arena, ids).traced("find_shallow", self.len())
    }

    fn descendants(&self, selectors: &[Selector], depth: Depth) -> Collector {
        let mut out = Collector::new();

        for &id in &self.ids {
            walk_descendants(self.arena, id, |node| {
                if node.is_element() && match_any(node, selectors) {
                    out.push(node.node_id);
                    match depth {
                        Depth::Shallow => Step::Skip,
                        Depth::Nested => Step::Descend,
                    }
                } else {
                    Step::Descend
                }
            });
        }

        out
    }

    /// Matching element children of each member
    pub fn children(&self, selectors: &[Selector]) -> Set<'a> {
        self.child_nodes(selectors, true)
            .traced("children", self.len())
    }

    /// Matching children of each member, text/comment/doctype included
    pub fn contents(&self, selectors: &[Selector]) -> Set<'a> {
        self.child_nodes(selectors, false)
            .traced("contents", self.len())
    }

    fn child_nodes(&self, selectors: &[Selector], elements_only: bool) -> Set<'a> {
        let mut out = Collector::new();

        for node in self.iter() {
            for child in chain(self.arena, node.first_child_id, |n| n.next_sibling_id) {
                if (!elements_only || child.is_element()) && match_any(child, selectors) {
                    out.push(child.node_id);
                }
            }
        }

        Self::from_ids(self.arena, out.into_ids())
    }

    /// First matching element child of each member
    pub fn first_child(&self, selectors: &[Selector]) -> Set<'a> {
        self.first_along(selectors, |n| n.first_child_id, |n| n.next_sibling_id)
            .traced("first_child", self.len())
    }

    /// Last matching element child of each member
    pub fn last_child(&self, selectors: &[Selector]) -> Set<'a> {
        self.first_along(selectors, |n| n.last_child_id, |n| n.prev_sibling_id)
            .traced("last_child", self.len())
    }

    /// Nearest matching element sibling after each member
    pub fn next(&self, selectors: &[Selector]) -> Set<'a> {
        self.first_along(selectors, |n| n.next_sibling_id, |n| n.next_sibling_id)
            .traced("next", self.len())
    }

    /// Nearest matching element sibling before each member
    pub fn prev(&self, selectors: &[Selector]) -> Set<'a> {
        self.first_along(selectors, |n| n.prev_sibling_id, |n| n.prev_sibling_id)
            .traced("prev", self.len())
    }

    /// For each member, enter a link chain at `start` and keep the first
    /// matching element reached by repeatedly following `step`
    fn first_along(
        &self,
        selectors: &[Selector],
        start: fn(&DomNode) -> Option<NodeId>,
        step: fn(&DomNode) -> Option<NodeId>,
    ) -> Set<'a> {
        let mut out = Collector::new();

        for node in self.iter() {
            let hit = chain(self.arena, start(node), step)
                .find(|n| n.is_element() && match_any(n, selectors));
            if let Some(hit) = hit {
                out.push(hit.node_id);
            }
        }

        Self::from_ids(self.arena, out.into_ids())
    }

    /// The first matching element descendant across all members
    ///
    /// Same walk as [`Set::find`], but it ends at the first hit.
    pub fn first(&self, selectors: &[Selector]) -> Set<'a> {
        let mut hit = None;

        for &id in &self.ids {
            let stopped = walk_descendants(self.arena, id, |node| {
                if node.is_element() && match_any(node, selectors) {
                    hit = Some(node.node_id);
                    Step::Stop
                } else {
                    Step::Descend
                }
            });
            if stopped {
                break;
            }
        }

        Self::new(self.arena, hit).traced("first", self.len())
    }

    /// Members that match, in their current order
    pub fn filter(&self, selectors: &[Selector]) -> Set<'a> {
        let ids = self
            .iter()
            .filter(|node| match_any(node, selectors))
            .map(|node| node.node_id)
            .collect();

        Self::from_ids(self.arena, ids).traced("filter", self.len())
    }

    /// Singleton of the member at `index`; empty when out of range or negative
    ///
    /// Positional pick, not equality: compare two sets with `==`.
    pub fn eq(&self, index: isize) -> Set<'a> {
        let id = usize::try_from(index)
            .ok()
            .and_then(|i| self.ids.get(i).copied());

        Self::new(self.arena, id).traced("eq", self.len())
    }

    /// Attribute `key` of the first member, `""` if absent or the set is empty
    pub fn attr(&self, key: &str) -> &'a str {
        self.get(0).and_then(|node| node.attr(key)).unwrap_or("")
    }

    /// Text of every member and its descendants, in document order,
    /// concatenated without separators
    pub fn text(&self) -> String {
        let mut text = String::new();

        for &id in &self.ids {
            let walked = self.arena.traverse_df(id, |node| {
                if node.is_text() {
                    text.push_str(&node.node_value);
                }
                Ok(())
            });
            if let Err(err) = walked {
                tracing::debug!("[Set] text: stopped early under node {}: {}", id, err);
            }
        }

        text
    }
}

impl PartialEq for Set<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.ids == other.ids
    }
}

impl Eq for Set<'_> {}

impl fmt::Debug for Set<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Set").field("ids", &self.ids.as_slice()).finish()
    }
}

/// Iterator over the nodes of a [`Set`]
pub struct Iter<'s, 'a> {
    arena: &'a DomArena,
    inner: std::slice::Iter<'s, NodeId>,
}

impl<'s, 'a> Iterator for Iter<'s, 'a> {
    type Item = &'a DomNode;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.inner.by_ref().find_map(|&id| arena.node(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl<'s, 'a> IntoIterator for &'s Set<'a> {
    type Item = &'a DomNode;
    type IntoIter = Iter<'s, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
