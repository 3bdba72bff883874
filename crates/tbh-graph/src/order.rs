//! Traversal orders, topological sort and connected components.
//!
//! Traversals walk undirected edges plus outgoing arcs. All orders are
//! deterministic: ties are resolved in ascending vertex order.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use tbh_core::errors::{ErrorInfo, TbhError};

use crate::directed::DiGraph;
use crate::mixed::{MixedGraph, NeighborSelect, Vertex};
use crate::undirected::Graph;

/// Depth first search order over the whole graph.
pub fn dfs<V: Vertex>(graph: &MixedGraph<V>) -> Vec<V> {
    dfs_with_roots(graph, graph.vertices())
}

/// Depth first search order starting from `root`, then covering the rest of
/// the graph in ascending order.
pub fn dfs_from<V: Vertex>(graph: &MixedGraph<V>, root: V) -> Result<Vec<V>, TbhError> {
    ensure_vertex(graph, root)?;
    let rest = graph.vertices().filter(|v| *v != root);
    Ok(dfs_with_roots(graph, std::iter::once(root).chain(rest)))
}

fn dfs_with_roots<V: Vertex>(graph: &MixedGraph<V>, roots: impl Iterator<Item = V>) -> Vec<V> {
    let mut order = Vec::new();
    let mut seen = BTreeSet::new();
    let mut stack = Vec::new();

    for root in roots {
        stack.push(root);
        while let Some(v) = stack.pop() {
            if !seen.insert(v) {
                continue;
            }
            order.push(v);
            let neighbors = graph
                .neighbors(v, NeighborSelect::traversal())
                .expect("traversal only visits known vertices");
            // pushed in descending order, so the least neighbor pops first
            stack.extend(neighbors.into_iter().rev());
        }
    }
    order
}

/// Breadth first search order over the whole graph.
pub fn bfs<V: Vertex>(graph: &MixedGraph<V>) -> Vec<V> {
    bfs_with_roots(graph, graph.vertices())
}

/// Breadth first search order starting from `root`, then covering the rest of
/// the graph in ascending order.
pub fn bfs_from<V: Vertex>(graph: &MixedGraph<V>, root: V) -> Result<Vec<V>, TbhError> {
    ensure_vertex(graph, root)?;
    let rest = graph.vertices().filter(|v| *v != root);
    Ok(bfs_with_roots(graph, std::iter::once(root).chain(rest)))
}

fn bfs_with_roots<V: Vertex>(graph: &MixedGraph<V>, roots: impl Iterator<Item = V>) -> Vec<V> {
    let mut order = Vec::new();
    let mut seen = BTreeSet::new();
    let mut queue = VecDeque::new();

    for root in roots {
        if seen.insert(root) {
            queue.push_back(root);
        }
        while let Some(v) = queue.pop_front() {
            order.push(v);
            let neighbors = graph
                .neighbors(v, NeighborSelect::traversal())
                .expect("traversal only visits known vertices");
            for w in neighbors {
                if seen.insert(w) {
                    queue.push_back(w);
                }
            }
        }
    }
    order
}

/// Topological order of a directed acyclic graph (Kahn's algorithm).
///
/// Fails with `cyclic-graph` when the graph contains a directed cycle.
pub fn topological_sort<V: Vertex>(dag: &DiGraph<V>) -> Result<Vec<V>, TbhError> {
    let mut indegree: BTreeMap<V, usize> = BTreeMap::new();
    for v in dag.vertices() {
        indegree.insert(v, dag.predecessors(v)?.len());
    }

    let mut ready: BTreeSet<V> = indegree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(v, _)| *v)
        .collect();
    let mut order = Vec::new();

    while let Some(v) = ready.iter().next().copied() {
        ready.remove(&v);
        order.push(v);
        for w in dag.successors(v)?.iter().copied() {
            let degree = indegree.get_mut(&w).expect("successor is a vertex");
            *degree -= 1;
            if *degree == 0 {
                ready.insert(w);
            }
        }
    }

    if order.len() != dag.vertex_count() {
        return Err(TbhError::Graph(ErrorInfo::new(
            "cyclic-graph",
            "graph has a directed cycle, no topological order exists",
        )));
    }
    Ok(order)
}

/// Partition of a vertex subset into connected parts.
///
/// Only edges with both endpoints inside the subset are considered. When
/// `subset` is `None` the whole vertex set is used.
pub fn connected_parts<V: Vertex>(
    graph: &Graph<V>,
    subset: Option<&BTreeSet<V>>,
) -> BTreeSet<BTreeSet<V>> {
    let vertices: BTreeSet<V> = match subset {
        Some(subset) => subset.clone(),
        None => graph.vertex_set().clone(),
    };

    let mut representative: BTreeMap<V, V> = vertices.iter().map(|v| (*v, *v)).collect();
    for (x, y) in graph.edges() {
        if !vertices.contains(&x) || !vertices.contains(&y) {
            continue;
        }
        let root_x = find(&mut representative, x);
        let root_y = find(&mut representative, y);
        if root_x != root_y {
            representative.insert(root_y.max(root_x), root_x.min(root_y));
        }
    }

    let mut parts: BTreeMap<V, BTreeSet<V>> = BTreeMap::new();
    for v in vertices {
        let root = find(&mut representative, v);
        parts.entry(root).or_default().insert(v);
    }
    parts.into_values().collect()
}

fn find<V: Vertex>(representative: &mut BTreeMap<V, V>, v: V) -> V {
    let mut root = v;
    while representative[&root] != root {
        root = representative[&root];
    }
    // path compression
    let mut current = v;
    while current != root {
        let next = representative[&current];
        representative.insert(current, root);
        current = next;
    }
    root
}

fn ensure_vertex<V: Vertex>(graph: &MixedGraph<V>, v: V) -> Result<(), TbhError> {
    if graph.contains(v) {
        Ok(())
    } else {
        Err(TbhError::Graph(
            ErrorInfo::new("unknown-vertex", "not a vertex")
                .with_context("vertex", format!("{v:?}")),
        ))
    }
}
