//! Build a small tree from DevTools JSON and run a few query pipelines
//!
//! The subscriber prints every traced step at TRACE level.

use dom::DomService;
use query::{by_class, by_tag, Set};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let response = r##"{
        "root": {
            "nodeType": 9,
            "nodeName": "#document",
            "children": [{
                "nodeType": 1,
                "nodeName": "DIV",
                "attributes": ["class", "container"],
                "children": [{
                    "nodeType": 1,
                    "nodeName": "UL",
                    "attributes": ["class", "list"],
                    "children": [
                        { "nodeType": 1, "nodeName": "LI", "attributes": ["data-n", "1"],
                          "children": [{ "nodeType": 3, "nodeName": "#text", "nodeValue": "First value" }] },
                        { "nodeType": 1, "nodeName": "LI", "attributes": ["data-n", "2"],
                          "children": [{ "nodeType": 3, "nodeName": "#text", "nodeValue": "Second value" }] }
                    ]
                }]
            }]
        }
    }"##;

    let mut service = DomService::new();
    service.parse_cdp_dom_str(response)?;
    let root = Set::root(service.arena());

    let items = root.find(&[by_class("list")]).children(&[by_tag("li")]);
    println!("items: {}", items.len());
    println!("text: {:?}", items.text());

    let second = root.first(&[by_class("list")]).first(&[]).next(&[]);
    println!("second data-n: {}", second.attr("data-n"));
    println!("back: {:?}", second.prev(&[]).text());

    Ok(())
}
