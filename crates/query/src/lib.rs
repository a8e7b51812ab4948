//! Query - selector matching and traversal over an arena DOM
//!
//! The tree is built elsewhere (see the `dom` crate); this crate only reads
//! it. A [`Set`] is an ordered, borrowed selection of nodes, and every
//! operation on it yields another `Set`, so lookups read as pipelines.
//!
//! ```
//! use dom::DomService;
//! use query::{by_class, Set};
//!
//! let mut service = DomService::new();
//! service
//!     .parse_cdp_dom_tree(&serde_json::json!({
//!         "root": {
//!             "nodeType": 9,
//!             "nodeName": "#document",
//!             "children": [{
//!                 "nodeType": 1,
//!                 "nodeName": "UL",
//!                 "attributes": ["class", "list"],
//!                 "children": [
//!                     { "nodeType": 1, "nodeName": "LI",
//!                       "children": [{ "nodeType": 3, "nodeName": "#text", "nodeValue": "a" }] },
//!                     { "nodeType": 1, "nodeName": "LI",
//!                       "children": [{ "nodeType": 3, "nodeName": "#text", "nodeValue": "b" }] }
//!                 ]
//!             }]
//!         }
//!     }))
//!     .unwrap();
//!
//! let root = Set::root(service.arena());
//! let items = root.find(&[by_class("list")]).children(&[]);
//! assert_eq!(items.len(), 2);
//! assert_eq!(items.text(), "ab");
//! ```
//!
//! ## Semantics in one place
//!
//! - Several selectors on one call are OR-ed; none at all matches everything.
//! - Traversals consider elements only, except [`Set::contents`] and
//!   [`Set::filter`], which test whatever nodes they are given.
//! - Results keep first-visit order and never repeat a node.
//! - Nothing fails: no match means an empty `Set`.

pub mod selector;
pub mod set;
mod walk;

pub use selector::{by_attr, by_class, by_id, by_tag, by_type, match_any, Predicate, Selector};
pub use set::{Iter, Set};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Selector>();
        assert_send_sync::<Set<'static>>();
    }
}
