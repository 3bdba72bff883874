//! Support-tree construction.
//!
//! Hyperedges are processed by increasing size over a growing forest. Each
//! hyperedge whose vertices straddle several components is stitched together
//! through representative vertices taken from the hyperedge itself, so the
//! hyperedge stays connected through its own vertices in every later state of
//! the forest. For a totally balanced family the result therefore induces a
//! connected subtree for every hyperedge.

use std::collections::BTreeMap;

use tbh_core::cluster::LeafSet;
use tbh_core::errors::TbhError;
use tbh_core::LeafId;
use tbh_graph::Graph;

use crate::hypergraph::Hypergraph;

pub(crate) fn support_tree(hypergraph: &Hypergraph) -> Result<Graph<LeafId>, TbhError> {
    let mut tree = Graph::with_vertices(hypergraph.vertices().iter().copied())?;
    let mut forest = DisjointSets::new(hypergraph.vertices().iter().copied());

    let mut edges: Vec<&LeafSet> = hypergraph.hyperedges().iter().collect();
    edges.sort_by_key(|edge| (edge.len(), *edge));

    for edge in edges {
        connect_through(edge, &mut tree, &mut forest)?;
    }

    // A family that does not cover the whole vertex set can leave the forest
    // in several parts; chain them so the result is always a spanning tree.
    let mut roots: Vec<LeafId> = Vec::new();
    for vertex in hypergraph.vertices().iter().copied() {
        let root = forest.find(vertex);
        if !roots.contains(&root) {
            roots.push(root);
        }
    }
    for pair in roots.windows(2) {
        tree.update([(pair[0], pair[1])], false)?;
        forest.union(pair[0], pair[1]);
    }

    Ok(tree)
}

fn connect_through(
    edge: &LeafSet,
    tree: &mut Graph<LeafId>,
    forest: &mut DisjointSets,
) -> Result<(), TbhError> {
    // representative = least member of the hyperedge inside each component
    let mut representatives: BTreeMap<LeafId, LeafId> = BTreeMap::new();
    for vertex in edge.iter().copied() {
        let root = forest.find(vertex);
        representatives.entry(root).or_insert(vertex);
    }
    if representatives.len() <= 1 {
        return Ok(());
    }

    let mut components = representatives.values().copied();
    let anchor = components.next().expect("at least two components");
    for other in components {
        tree.update([(anchor, other)], false)?;
        forest.union(anchor, other);
    }
    Ok(())
}

struct DisjointSets {
    parent: BTreeMap<LeafId, LeafId>,
}

impl DisjointSets {
    fn new(vertices: impl IntoIterator<Item = LeafId>) -> Self {
        Self {
            parent: vertices.into_iter().map(|v| (v, v)).collect(),
        }
    }

    fn find(&mut self, v: LeafId) -> LeafId {
        let mut root = v;
        while self.parent[&root] != root {
            root = self.parent[&root];
        }
        let mut current = v;
        while current != root {
            let next = self.parent[&current];
            self.parent.insert(current, root);
            current = next;
        }
        root
    }

    fn union(&mut self, a: LeafId, b: LeafId) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            self.parent.insert(root_b.max(root_a), root_a.min(root_b));
        }
    }
}
