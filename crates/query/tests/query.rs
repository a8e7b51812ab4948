//! End-to-end pipelines over a tree built from DevTools JSON

use dom::{DomArena, DomService, NodeId, NodeType};
use query::{by_attr, by_class, by_id, by_tag, by_type, Selector, Set};
use serde_json::{json, Value};

fn text(data: &str) -> Value {
    json!({ "nodeType": 3, "nodeName": "#text", "nodeValue": data })
}

fn element(tag: &str, attributes: &[&str], children: Vec<Value>) -> Value {
    json!({
        "nodeType": 1,
        "nodeName": tag.to_ascii_uppercase(),
        "attributes": attributes,
        "children": children,
    })
}

/// ```html
/// <html><head></head><body>
///   <div class="container">
///     <ul class="list"><li><strong>First</strong> value</li><li>Second value</li></ul>
///   </div>
///   <span class="foo">Span
///     <div class="foo">Div
///       <div class="bar">Bar</div>
///     </div>
///   </span>
///   <!-- trailer -->
/// </body></html>
/// ```
fn document() -> DomArena {
    let list = element(
        "ul",
        &["class", "list"],
        vec![
            element(
                "li",
                &[],
                vec![element("strong", &[], vec![text("First")]), text(" value")],
            ),
            element("li", &[], vec![text("Second value")]),
        ],
    );
    let container = element(
        "div",
        &["class", "container"],
        vec![text("\n    "), list, text("\n  ")],
    );
    let foo = element(
        "span",
        &["class", "foo"],
        vec![
            text("Span\n    "),
            element(
                "div",
                &["class", "foo", "id", "inner"],
                vec![
                    text("Div\n      "),
                    element("div", &["class", "bar"], vec![text("Bar")]),
                    text("\n    "),
                ],
            ),
            text("\n  "),
        ],
    );
    let body = element(
        "body",
        &[],
        vec![
            text("\n  "),
            container,
            text("\n  "),
            foo,
            text("\n  "),
            json!({ "nodeType": 8, "nodeName": "#comment", "nodeValue": " trailer " }),
        ],
    );

    let response = json!({
        "root": {
            "nodeType": 9,
            "nodeName": "#document",
            "children": [
                { "nodeType": 10, "nodeName": "html" },
                element("html", &["lang", "en"], vec![element("head", &[], vec![]), body]),
            ]
        }
    });

    let mut service = DomService::new();
    service.parse_cdp_dom_tree(&response).unwrap();
    service.into_arena()
}

fn tags(set: &Set<'_>) -> Vec<String> {
    set.iter().map(|n| n.node_name.clone()).collect()
}

#[test]
fn test_find_by_class() {
    let arena = document();
    let body = Set::root(&arena).find(&[by_tag("body")]);

    let found = body.find(&[by_class("container")]);
    assert_eq!(found.len(), 1);
    assert_eq!(found.attr("class"), "container");
}

#[test]
fn test_find_by_class_children_text() {
    let arena = document();
    let text = Set::root(&arena)
        .find(&[by_class("list")])
        .children(&[])
        .text();

    assert_eq!(text, "First valueSecond value");
}

#[test]
fn test_find_by_class_contents() {
    let arena = document();
    let set = Set::root(&arena)
        .find(&[by_class("container")])
        .contents(&[]);

    assert_eq!(set.len(), 3);
    assert_eq!(set.get(1).unwrap().attr("class"), Some("list"));
    assert!(set.get(0).unwrap().is_text());
    assert!(set.get(2).unwrap().is_text());
}

#[test]
fn test_find_by_class_duplicates() {
    let arena = document();
    let foos = Set::root(&arena).find(&[by_class("foo")]);
    assert_eq!(foos.len(), 2);

    let set = foos.find(&[by_class("bar")]);
    assert_eq!(set.len(), 1);
    assert_eq!(set.text(), "Bar");
}

#[test]
fn test_find_shallow_hides_nested_matches() {
    let arena = document();
    let root = Set::root(&arena);

    let shallow = root.find_shallow(&[by_class("foo")]);
    assert_eq!(tags(&shallow), vec!["span"]);

    let nested = root.find_all(&[by_class("foo")]);
    assert_eq!(tags(&nested), vec!["span", "div"]);
}

#[test]
fn test_first_by_tag() {
    let arena = document();
    let set = Set::root(&arena).first(&[by_tag("div")]);

    assert_eq!(set.len(), 1);
    assert_eq!(set.attr("class"), "container");
}

#[test]
fn test_first_by_class_next_prev() {
    let arena = document();
    let set = Set::root(&arena)
        .first(&[by_class("list")])
        .first(&[])
        .next(&[]);

    assert_eq!(set.text(), "Second value");

    let set = set.prev(&[]);
    assert_eq!(set.text(), "First value");
}

#[test]
fn test_first_and_last_child() {
    let arena = document();
    let list = Set::root(&arena).find(&[by_class("list")]);

    assert_eq!(list.first_child(&[]).text(), "First value");
    assert_eq!(list.last_child(&[]).text(), "Second value");
    assert!(list.first_child(&[by_tag("strong")]).is_empty());
}

#[test]
fn test_multiple_selectors_are_or() {
    let arena = document();
    let found = Set::root(&arena).find(&[by_class("bar"), by_tag("ul"), by_id("inner")]);

    assert_eq!(tags(&found), vec!["ul", "div", "div"]);
    assert_eq!(found.eq(2).attr("class"), "bar");
}

#[test]
fn test_contents_reaches_comments_and_doctype() {
    let arena = document();
    let root = Set::root(&arena);

    let doctype = root.contents(&[by_type(NodeType::DocumentType)]);
    assert_eq!(doctype.len(), 1);

    let body = root.find(&[by_tag("body")]);
    let comments = body.contents(&[by_type(NodeType::Comment)]);
    assert_eq!(comments.get(0).unwrap().node_value, " trailer ");

    // Traversals other than contents/filter never yield non-elements
    assert!(root.find(&[by_type(NodeType::Text)]).is_empty());
    assert!(body.children(&[by_type(NodeType::Comment)]).is_empty());
}

#[test]
fn test_filter_is_order_preserving_subsequence() {
    let arena = document();
    let all = Set::root(&arena).find(&[]);
    let selectors = [by_tag("div"), by_attr("lang", "en")];

    let filtered = all.filter(&selectors);
    assert_eq!(tags(&filtered), vec!["html", "div", "div", "div"]);

    let mut positions = filtered
        .node_ids()
        .iter()
        .map(|id| all.node_ids().iter().position(|x| x == id).unwrap());
    let mut last = positions.next().unwrap();
    for pos in positions {
        assert!(pos > last);
        last = pos;
    }
    assert!(filtered.iter().all(|n| query::match_any(n, &selectors)));
}

#[test]
fn test_find_shallow_results_never_nest() {
    let arena = document();
    let everything: Vec<NodeId> = arena.node_ids().collect();
    let members = Set::new(&arena, everything);

    let shallow = members.find_shallow(&[by_tag("div"), by_tag("li"), by_tag("strong")]);
    for node in &shallow {
        assert!(arena
            .ancestors(node.node_id)
            .all(|a| !shallow.node_ids().contains(&a)));
    }
    assert_eq!(tags(&shallow), vec!["div", "div"]);
}

#[test]
fn test_dedup_over_every_member() {
    let arena = document();
    let everything: Vec<NodeId> = arena.node_ids().collect();
    let members = Set::new(&arena, everything);

    for result in [members.find(&[]), members.next(&[]), members.prev(&[])] {
        let mut ids = result.node_ids().to_vec();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), result.len());
    }
}

#[test]
fn test_custom_selector() {
    let arena = document();
    let classless = Selector::custom(|node| node.is_element() && node.attr("class").is_none());

    let found = Set::root(&arena)
        .find(&[by_class("container")])
        .find(&[classless]);
    assert_eq!(tags(&found), vec!["li", "strong", "li"]);
}

#[test]
fn test_chain_after_miss_stays_empty() {
    let arena = document();
    let set = Set::root(&arena)
        .find(&[by_id("missing")])
        .children(&[])
        .last_child(&[])
        .prev(&[])
        .find_shallow(&[]);

    assert!(set.is_empty());
    assert_eq!(set.attr("class"), "");
    assert_eq!(set.text(), "");
    assert!(set.eq(0).is_empty());
}

#[test]
fn test_parallel_queries_share_arena() {
    let arena = document();

    std::thread::scope(|scope| {
        let handles: Vec<_> = ["list", "foo", "bar"]
            .into_iter()
            .map(|class| {
                let arena = &arena;
                scope.spawn(move || Set::root(arena).find(&[by_class(class)]).len())
            })
            .collect();

        let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(counts, vec![1, 2, 1]);
    });
}
