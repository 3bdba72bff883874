//! Binary mixed trees: working trees whose vertices are interned clusters.
//!
//! The underlying graph (undirected edges plus directed edges read as
//! undirected) is a tree on the current vertex set at every point. Directed
//! edges record merge provenance: they point from a merged vertex's origin
//! toward the cluster that absorbed it, and their tails are removed once the
//! origin is resolved.

use std::collections::BTreeSet;

use tbh_core::errors::{ErrorInfo, TbhError};
use tbh_core::{ClusterId, ClusterRegistry, LeafId};
use tbh_graph::order::connected_parts;
use tbh_graph::{EdgeKind, Graph, MixedGraph};

/// Mixed tree over interned cluster identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryMixedTree {
    graph: MixedGraph<ClusterId>,
}

impl BinaryMixedTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the initial working tree from an undirected leaf tree.
    ///
    /// Every leaf becomes a singleton cluster vertex; every edge of the leaf
    /// tree becomes an undirected edge between the corresponding clusters.
    pub fn from_leaf_tree(
        tree: &Graph<LeafId>,
        registry: &mut ClusterRegistry,
    ) -> Result<Self, TbhError> {
        let mut graph = MixedGraph::new();
        for leaf in tree.vertices() {
            graph.add(registry.singleton(leaf))?;
        }
        for (a, b) in tree.edges() {
            let x = registry.singleton(a);
            let y = registry.singleton(b);
            graph.update(EdgeKind::Undirected, [(x, y)], false)?;
        }
        Ok(Self { graph })
    }

    /// Adds a cluster vertex.
    pub fn add_vertex(&mut self, cluster: ClusterId) -> Result<(), TbhError> {
        self.graph.add(cluster)
    }

    /// Removes a cluster vertex and every incident edge.
    pub fn remove_vertex(&mut self, cluster: ClusterId) -> Result<(), TbhError> {
        self.graph.remove(cluster)
    }

    /// Adds an undirected edge between existing vertices.
    pub fn add_undirected(&mut self, x: ClusterId, y: ClusterId) -> Result<(), TbhError> {
        self.ensure_vertex(x)?;
        self.ensure_vertex(y)?;
        self.graph.update(EdgeKind::Undirected, [(x, y)], false)
    }

    /// Adds a directed provenance edge between existing vertices.
    pub fn add_directed(&mut self, x: ClusterId, y: ClusterId) -> Result<(), TbhError> {
        self.ensure_vertex(x)?;
        self.ensure_vertex(y)?;
        self.graph.update(EdgeKind::Directed, [(x, y)], false)
    }

    /// Installs a batch of undirected edges over existing vertices.
    pub fn install_undirected(
        &mut self,
        edges: impl IntoIterator<Item = (ClusterId, ClusterId)>,
    ) -> Result<(), TbhError> {
        self.graph.update(EdgeKind::Undirected, edges, false)
    }

    /// Merges the endpoints of the undirected edge `{x, y}`.
    ///
    /// The union cluster `xy` is interned and added as a vertex, the edge
    /// `{x, y}` is removed (it must exist), and the provenance arcs `x → xy`
    /// and `y → xy` are added. Returns the merged cluster.
    pub fn union(
        &mut self,
        x: ClusterId,
        y: ClusterId,
        registry: &mut ClusterRegistry,
    ) -> Result<ClusterId, TbhError> {
        if !self.graph.has_edge_kind(x, y, EdgeKind::Undirected) {
            return Err(tree_error("unknown-edge", "no undirected edge joins the pair")
                .with_pair(x, y));
        }
        let merged = registry.union(x, y)?;
        self.graph.difference([(x, y)]);
        self.graph.add(merged)?;
        self.graph
            .update(EdgeKind::Directed, [(x, merged), (y, merged)], false)?;
        Ok(merged)
    }

    /// Moves undirected edges from `x` onto `y`.
    ///
    /// Every vertex of `subset` must be a current undirected neighbor of `x`;
    /// its edge to `x` is removed and replaced by an undirected edge to `y`.
    pub fn reattach(
        &mut self,
        x: ClusterId,
        y: ClusterId,
        subset: &BTreeSet<ClusterId>,
    ) -> Result<(), TbhError> {
        let neighbors = self.graph.undirected_neighbors(x)?;
        if let Some(stranger) = subset.iter().find(|z| !neighbors.contains(*z)) {
            return Err(tree_error("unknown-edge", "reattach subset leaves the neighborhood")
                .with_pair(x, *stranger));
        }
        for z in subset.iter().copied() {
            self.graph.difference([(x, z)]);
            self.graph.update(EdgeKind::Undirected, [(y, z)], false)?;
        }
        Ok(())
    }

    /// The maximal region of the tree free of unresolved merge provenance.
    ///
    /// While directed edges remain, the least one is removed and the whole
    /// component of the underlying tree containing its head (the absorber
    /// side) is deleted. Each round removes at least one directed edge, so
    /// the loop terminates. Returns the surviving vertex set.
    pub fn homogeneous_subset(&self) -> Result<BTreeSet<ClusterId>, TbhError> {
        let mut scratch = self.graph.clone();
        loop {
            let Some((tail, head)) = scratch.directed_edges().into_iter().next() else {
                return Ok(scratch.vertex_set().clone());
            };
            scratch.difference([(tail, head)]);

            let underlying = underlying_of(&scratch);
            let parts = connected_parts(&underlying, None);
            let absorber_side = parts
                .into_iter()
                .find(|part| part.contains(&head))
                .expect("edge head is a vertex of the split graph");
            for vertex in absorber_side {
                scratch.remove(vertex)?;
            }
        }
    }

    /// Restriction of the tree to a vertex subset.
    ///
    /// Fails when the subset is not contained in the vertex set; otherwise
    /// returns the induced sub-graph, keeping both edge kinds.
    pub fn restriction(&self, subset: &BTreeSet<ClusterId>) -> Result<Self, TbhError> {
        if let Some(stranger) = subset.iter().find(|v| !self.graph.contains(**v)) {
            return Err(TbhError::Tree(
                ErrorInfo::new(
                    "restriction-outside-tree",
                    "subset is not contained in the vertex set",
                )
                .with_context("vertex", stranger.as_raw().to_string()),
            ));
        }
        let undirected = self
            .graph
            .undirected_edges()
            .into_iter()
            .filter(|(x, y)| subset.contains(x) && subset.contains(y));
        let directed = self
            .graph
            .directed_edges()
            .into_iter()
            .filter(|(x, y)| subset.contains(x) && subset.contains(y));
        Ok(Self {
            graph: MixedGraph::from_parts(subset.iter().copied(), undirected, directed)?,
        })
    }

    /// Undirected view in which directed edges are read as undirected.
    pub fn underlying_graph(&self) -> Graph<ClusterId> {
        underlying_of(&self.graph)
    }

    /// Returns whether the underlying graph is a tree on the current vertex
    /// set (connected, with edge count = vertex count − 1).
    pub fn underlying_is_tree(&self) -> bool {
        let underlying = self.underlying_graph();
        if underlying.vertex_count() == 0 {
            return false;
        }
        underlying.edge_count() == underlying.vertex_count() - 1
            && connected_parts(&underlying, None).len() == 1
    }

    /// Undirected neighbors of a cluster.
    pub fn undirected_neighbors(&self, x: ClusterId) -> Result<&BTreeSet<ClusterId>, TbhError> {
        self.graph.undirected_neighbors(x)
    }

    /// Heads of provenance arcs leaving a cluster (its unresolved absorbers).
    pub fn successors(&self, x: ClusterId) -> Result<&BTreeSet<ClusterId>, TbhError> {
        self.graph.successors(x)
    }

    /// Tails of provenance arcs ending at a cluster.
    pub fn predecessors(&self, x: ClusterId) -> Result<&BTreeSet<ClusterId>, TbhError> {
        self.graph.predecessors(x)
    }

    /// Returns whether `x` is a vertex.
    pub fn contains(&self, x: ClusterId) -> bool {
        self.graph.contains(x)
    }

    /// Returns the vertex set.
    pub fn vertex_set(&self) -> &BTreeSet<ClusterId> {
        self.graph.vertex_set()
    }

    /// Iterates over the vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = ClusterId> + '_ {
        self.graph.vertices()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// Undirected edges as normalized pairs.
    pub fn undirected_edges(&self) -> BTreeSet<(ClusterId, ClusterId)> {
        self.graph.undirected_edges()
    }

    /// Directed provenance edges as `(origin, absorber)` pairs.
    pub fn directed_edges(&self) -> BTreeSet<(ClusterId, ClusterId)> {
        self.graph.directed_edges()
    }

    /// Read access to the underlying mixed graph.
    pub fn as_mixed(&self) -> &MixedGraph<ClusterId> {
        &self.graph
    }

    fn ensure_vertex(&self, x: ClusterId) -> Result<(), TbhError> {
        if self.graph.contains(x) {
            Ok(())
        } else {
            Err(tree_error("unknown-vertex", "not a vertex")
                .with_context_value("vertex", x.as_raw().to_string()))
        }
    }
}

fn underlying_of(mixed: &MixedGraph<ClusterId>) -> Graph<ClusterId> {
    let mut merged = mixed.clone();
    merged
        .update(EdgeKind::Undirected, mixed.directed_edges(), false)
        .expect("directed edges join known vertices");
    Graph::from_mixed(&merged)
}

fn tree_error(code: &str, message: &str) -> TbhError {
    TbhError::Tree(ErrorInfo::new(code, message))
}

trait TreeContextExt {
    fn with_pair(self, x: ClusterId, y: ClusterId) -> TbhError;
    fn with_context_value(self, key: &str, value: String) -> TbhError;
}

impl TreeContextExt for TbhError {
    fn with_pair(self, x: ClusterId, y: ClusterId) -> TbhError {
        self.with_context_value("pair", format!("({}, {})", x.as_raw(), y.as_raw()))
    }

    fn with_context_value(self, key: &str, value: String) -> TbhError {
        match self {
            TbhError::Tree(info) => TbhError::Tree(info.with_context(key, value)),
            other => other,
        }
    }
}
