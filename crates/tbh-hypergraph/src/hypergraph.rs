use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use tbh_core::cluster::LeafSet;
use tbh_core::errors::{ErrorInfo, TbhError};
use tbh_core::LeafId;
use tbh_graph::Graph;

use crate::support;

/// A vertex set plus a family of hyperedges (subsets of the vertex set).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hypergraph {
    vertices: BTreeSet<LeafId>,
    hyperedges: BTreeSet<LeafSet>,
}

impl Hypergraph {
    /// Creates an empty hypergraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hypergraph from a vertex collection.
    pub fn with_vertices(vertices: impl IntoIterator<Item = LeafId>) -> Result<Self, TbhError> {
        let mut hypergraph = Self::new();
        for vertex in vertices {
            hypergraph.add_vertex(vertex)?;
        }
        Ok(hypergraph)
    }

    /// Creates a hypergraph from vertices and a hyperedge family.
    pub fn from_edges(
        vertices: impl IntoIterator<Item = LeafId>,
        hyperedges: impl IntoIterator<Item = LeafSet>,
    ) -> Result<Self, TbhError> {
        let mut hypergraph = Self::with_vertices(vertices)?;
        for edge in hyperedges {
            hypergraph.add_hyperedge(edge)?;
        }
        Ok(hypergraph)
    }

    /// Adds vertex `x`.
    pub fn add_vertex(&mut self, x: LeafId) -> Result<(), TbhError> {
        if !self.vertices.insert(x) {
            return Err(hypergraph_error("duplicate-vertex", "already a vertex")
                .with_leaf("vertex", x));
        }
        Ok(())
    }

    /// Removes vertex `x`, stripping it from every hyperedge.
    ///
    /// Hyperedges emptied by the removal are dropped; hyperedges collapsing
    /// onto an already present one dedup.
    pub fn remove_vertex(&mut self, x: LeafId) -> Result<(), TbhError> {
        if !self.vertices.remove(&x) {
            return Err(hypergraph_error("unknown-vertex", "not a vertex").with_leaf("vertex", x));
        }
        let mut stripped = BTreeSet::new();
        for edge in std::mem::take(&mut self.hyperedges) {
            let edge: LeafSet = edge.into_iter().filter(|leaf| *leaf != x).collect();
            if !edge.is_empty() {
                stripped.insert(edge);
            }
        }
        self.hyperedges = stripped;
        Ok(())
    }

    /// Adds a hyperedge.
    ///
    /// The hyperedge must be non-empty, a subset of the vertex set, and not
    /// already present.
    pub fn add_hyperedge(&mut self, edge: LeafSet) -> Result<(), TbhError> {
        if edge.is_empty() {
            return Err(hypergraph_error(
                "empty-hyperedge",
                "hyperedges must contain at least one vertex",
            ));
        }
        if let Some(missing) = edge.iter().find(|leaf| !self.vertices.contains(*leaf)) {
            return Err(hypergraph_error("unknown-vertex", "hyperedge uses a non-vertex")
                .with_leaf("vertex", *missing));
        }
        if !self.hyperedges.insert(edge) {
            return Err(hypergraph_error("duplicate-hyperedge", "hyperedge already exists"));
        }
        Ok(())
    }

    /// Returns whether `x` is a vertex.
    pub fn contains(&self, x: LeafId) -> bool {
        self.vertices.contains(&x)
    }

    /// Returns the vertex set.
    pub fn vertices(&self) -> &BTreeSet<LeafId> {
        &self.vertices
    }

    /// Returns the hyperedge family.
    pub fn hyperedges(&self) -> &BTreeSet<LeafSet> {
        &self.hyperedges
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Restriction to a vertex subset.
    ///
    /// The restricted vertex set is the intersection with `subset`; every
    /// hyperedge is intersected with `subset`, empty intersections are
    /// dropped and equal intersections collapse.
    pub fn restriction(&self, subset: &LeafSet) -> Hypergraph {
        let vertices: BTreeSet<LeafId> = self.vertices.intersection(subset).copied().collect();
        let mut hyperedges = BTreeSet::new();
        for edge in &self.hyperedges {
            let restricted: LeafSet = edge.intersection(subset).copied().collect();
            if !restricted.is_empty() {
                hyperedges.insert(restricted);
            }
        }
        Hypergraph {
            vertices,
            hyperedges,
        }
    }

    /// The inclusion-minimal hyperedge containing both `a` and `b`.
    ///
    /// Among the hyperedges containing `a ∪ b`, the one with the least
    /// (cardinality, lexicographic order) is returned; such a hyperedge has
    /// no candidate proper subset, so it is inclusion-minimal. `None` when no
    /// hyperedge contains both sets.
    pub fn supremum(&self, a: &LeafSet, b: &LeafSet) -> Option<&LeafSet> {
        self.hyperedges
            .iter()
            .filter(|edge| a.is_subset(edge) && b.is_subset(edge))
            .min_by_key(|edge| (edge.len(), *edge))
    }

    /// Builds a support tree: a spanning tree of the vertex set in which, for
    /// a totally balanced hyperedge family, every hyperedge induces a
    /// connected subtree.
    pub fn support_tree(&self) -> Result<Graph<LeafId>, TbhError> {
        support::support_tree(self)
    }
}

fn hypergraph_error(code: &str, message: &str) -> TbhError {
    TbhError::Hypergraph(ErrorInfo::new(code, message))
}

trait LeafContextExt {
    fn with_leaf(self, key: &str, leaf: LeafId) -> TbhError;
}

impl LeafContextExt for TbhError {
    fn with_leaf(self, key: &str, leaf: LeafId) -> TbhError {
        match self {
            TbhError::Hypergraph(info) => {
                TbhError::Hypergraph(info.with_context(key, leaf.as_raw().to_string()))
            }
            other => other,
        }
    }
}
