use std::collections::BTreeSet;

use tbh_graph::order::{bfs, bfs_from, connected_parts, dfs, dfs_from, topological_sort};
use tbh_graph::{DiGraph, Graph, MixedGraph};

fn tee() -> MixedGraph<u32> {
    // 1 - 2 - 4, 1 - 3
    MixedGraph::from_parts([1, 2, 3, 4], [(1, 2), (1, 3), (2, 4)], []).unwrap()
}

#[test]
fn dfs_prefers_ascending_neighbors() {
    assert_eq!(dfs(&tee()), vec![1, 2, 4, 3]);
}

#[test]
fn bfs_visits_by_distance() {
    assert_eq!(bfs(&tee()), vec![1, 2, 3, 4]);
}

#[test]
fn rooted_traversals_start_at_the_root() {
    assert_eq!(dfs_from(&tee(), 2).unwrap(), vec![2, 1, 3, 4]);
    assert_eq!(bfs_from(&tee(), 4).unwrap(), vec![4, 2, 1, 3]);
    assert_eq!(dfs_from(&tee(), 9).unwrap_err().code(), "unknown-vertex");
}

#[test]
fn traversals_cover_every_component() {
    let graph = MixedGraph::from_parts([1, 2, 3, 4], [(1, 2)], []).unwrap();
    assert_eq!(dfs(&graph), vec![1, 2, 3, 4]);
    assert_eq!(bfs(&graph), vec![1, 2, 3, 4]);
}

#[test]
fn traversals_follow_arcs_forward_only() {
    let graph = MixedGraph::from_parts([1, 2, 3], [], [(2, 1), (2, 3)]).unwrap();
    assert_eq!(dfs_from(&graph, 2).unwrap(), vec![2, 1, 3]);
    // starting at 1, the arc 2 -> 1 is not walked backwards
    assert_eq!(dfs_from(&graph, 1).unwrap(), vec![1, 2, 3]);
}

#[test]
fn topological_sort_orders_a_dag() {
    let dag = DiGraph::from_parts([1, 2, 3, 4], [(1, 2), (1, 3), (3, 4), (2, 4)]).unwrap();
    let order = topological_sort(&dag).unwrap();
    assert_eq!(order.len(), 4);
    let position = |v: u32| order.iter().position(|o| *o == v).unwrap();
    for (tail, head) in dag.arcs() {
        assert!(position(tail) < position(head));
    }
}

#[test]
fn topological_sort_rejects_cycles() {
    let dag = DiGraph::from_parts([1, 2, 3], [(1, 2), (2, 3), (3, 1)]).unwrap();
    assert_eq!(topological_sort(&dag).unwrap_err().code(), "cyclic-graph");
}

#[test]
fn connected_parts_partitions_the_graph() {
    let graph = Graph::from_parts([1, 2, 3, 4, 5], [(1, 2), (2, 3), (4, 5)]).unwrap();
    let parts = connected_parts(&graph, None);
    assert_eq!(
        parts,
        BTreeSet::from([BTreeSet::from([1, 2, 3]), BTreeSet::from([4, 5])])
    );
}

#[test]
fn connected_parts_respects_the_subset() {
    let graph = Graph::from_parts([1, 2, 3, 4, 5], [(1, 2), (2, 3), (4, 5)]).unwrap();
    // dropping 2 from the subset cuts the chain 1 - 2 - 3
    let subset = BTreeSet::from([1, 3, 4, 5]);
    let parts = connected_parts(&graph, Some(&subset));
    assert_eq!(
        parts,
        BTreeSet::from([
            BTreeSet::from([1]),
            BTreeSet::from([3]),
            BTreeSet::from([4, 5])
        ])
    );
}
