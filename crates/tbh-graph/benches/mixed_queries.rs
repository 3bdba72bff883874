use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tbh_core::RngHandle;
use tbh_graph::{random_tree, NeighborSelect};

fn queries_bench(c: &mut Criterion) {
    let vertices: Vec<u32> = (0..2_000).collect();
    let mut rng = RngHandle::from_seed(7);
    let tree = random_tree(&vertices, &mut rng).unwrap();
    let mixed = tree.as_mixed();

    c.bench_function("neighbor_queries", |b| {
        b.iter(|| {
            for vertex in &vertices {
                black_box(mixed.neighbors(*vertex, NeighborSelect::traversal()).unwrap());
            }
        });
    });

    c.bench_function("edge_listing", |b| {
        b.iter(|| {
            black_box(mixed.undirected_edges());
        });
    });
}

criterion_group!(benches, queries_bench);
criterion_main!(benches);
