use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dom::{DomArena, NodeId};
use query::{by_class, by_tag, Set};

/// `depth` levels of `<div>`, each holding `fan_out` children; every third
/// div carries `class="hit"` and a text leaf
fn build(depth: usize, fan_out: usize) -> DomArena {
    let mut arena = DomArena::with_capacity(1 << 16);
    let doc = arena.create_document();
    let mut level: Vec<NodeId> = vec![doc];
    let mut count = 0usize;

    for _ in 0..depth {
        let mut next = Vec::with_capacity(level.len() * fan_out);
        for &parent in &level {
            for _ in 0..fan_out {
                count += 1;
                let attrs = if count % 3 == 0 {
                    vec![("class".to_string(), "item hit".to_string())]
                } else {
                    Vec::new()
                };
                let div = arena.create_element("div", attrs);
                let leaf = arena.create_text("x");
                arena.append_child(parent, div).unwrap();
                arena.append_child(div, leaf).unwrap();
                next.push(div);
            }
        }
        level = next;
    }

    arena.set_root(doc).unwrap();
    arena
}

fn bench_traversal(c: &mut Criterion) {
    let arena = build(6, 5);
    let root = Set::root(&arena);

    c.bench_function("find_nested", |b| {
        b.iter(|| black_box(root.find(&[by_class("hit")]).len()))
    });

    c.bench_function("find_shallow", |b| {
        b.iter(|| black_box(root.find_shallow(&[by_class("hit")]).len()))
    });

    c.bench_function("first", |b| {
        b.iter(|| black_box(root.first(&[by_tag("span")]).len()))
    });

    let hits = root.find(&[by_class("hit")]);
    c.bench_function("find_overlapping_members", |b| {
        b.iter(|| black_box(hits.find(&[by_tag("div")]).len()))
    });

    c.bench_function("text", |b| b.iter(|| black_box(root.text().len())));
}

criterion_group!(benches, bench_traversal);
criterion_main!(benches);
