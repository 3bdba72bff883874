use std::collections::BTreeSet;

use tbh_core::errors::TbhError;

use crate::mixed::{EdgeKind, MixedGraph, Vertex};

/// Undirected graph: a [`MixedGraph`] restricted to the symmetric relation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph<V: Vertex> {
    inner: MixedGraph<V>,
}

impl<V: Vertex> Graph<V> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            inner: MixedGraph::new(),
        }
    }

    /// Creates a graph from a vertex collection.
    pub fn with_vertices(vertices: impl IntoIterator<Item = V>) -> Result<Self, TbhError> {
        Ok(Self {
            inner: MixedGraph::with_vertices(vertices)?,
        })
    }

    /// Creates a graph from vertices and an edge list; edges touching unknown
    /// vertices are discarded.
    pub fn from_parts(
        vertices: impl IntoIterator<Item = V>,
        edges: impl IntoIterator<Item = (V, V)>,
    ) -> Result<Self, TbhError> {
        Ok(Self {
            inner: MixedGraph::from_parts(vertices, edges, [])?,
        })
    }

    /// Creates a graph from an edge list, adding endpoints as vertices.
    pub fn from_edges(edges: impl IntoIterator<Item = (V, V)>) -> Result<Self, TbhError> {
        let mut graph = Self::new();
        graph.update(edges, true)?;
        Ok(graph)
    }

    /// Keeps the undirected edges of a mixed graph.
    pub fn from_mixed(mixed: &MixedGraph<V>) -> Self {
        let mut inner = MixedGraph::new();
        for vertex in mixed.vertices() {
            inner.add(vertex).expect("distinct vertices");
        }
        inner
            .update(EdgeKind::Undirected, mixed.undirected_edges(), false)
            .expect("edges over known vertices");
        Self { inner }
    }

    /// Adds vertex `x`.
    pub fn add(&mut self, x: V) -> Result<(), TbhError> {
        self.inner.add(x)
    }

    /// Removes vertex `x` and its incident edges.
    pub fn remove(&mut self, x: V) -> Result<(), TbhError> {
        self.inner.remove(x)
    }

    /// Adds undirected edges; see [`MixedGraph::update`].
    pub fn update(
        &mut self,
        edges: impl IntoIterator<Item = (V, V)>,
        create_missing: bool,
    ) -> Result<(), TbhError> {
        self.inner.update(EdgeKind::Undirected, edges, create_missing)
    }

    /// Removes edges; pairs with absent endpoints are ignored.
    pub fn difference(&mut self, edges: impl IntoIterator<Item = (V, V)>) {
        self.inner.difference(edges)
    }

    /// Neighbors of `x`.
    pub fn neighbors(&self, x: V) -> Result<&BTreeSet<V>, TbhError> {
        self.inner.undirected_neighbors(x)
    }

    /// Returns whether `{x, y}` is an edge.
    pub fn has_edge(&self, x: V, y: V) -> bool {
        self.inner.has_edge_kind(x, y, EdgeKind::Undirected)
    }

    /// Edges as normalized `(min, max)` pairs.
    pub fn edges(&self) -> BTreeSet<(V, V)> {
        self.inner.undirected_edges()
    }

    /// Returns whether `x` is a vertex.
    pub fn contains(&self, x: V) -> bool {
        self.inner.contains(x)
    }

    /// Returns the vertex set.
    pub fn vertex_set(&self) -> &BTreeSet<V> {
        self.inner.vertex_set()
    }

    /// Iterates over the vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.inner.vertices()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.inner.vertex_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Read access to the underlying mixed graph.
    pub fn as_mixed(&self) -> &MixedGraph<V> {
        &self.inner
    }
}
