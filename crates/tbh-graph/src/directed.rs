use std::collections::BTreeSet;

use tbh_core::errors::TbhError;

use crate::mixed::{EdgeKind, MixedGraph, Vertex};

/// Directed graph: a [`MixedGraph`] restricted to the asymmetric relation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiGraph<V: Vertex> {
    inner: MixedGraph<V>,
}

impl<V: Vertex> DiGraph<V> {
    /// Creates an empty directed graph.
    pub fn new() -> Self {
        Self {
            inner: MixedGraph::new(),
        }
    }

    /// Creates a directed graph from a vertex collection.
    pub fn with_vertices(vertices: impl IntoIterator<Item = V>) -> Result<Self, TbhError> {
        Ok(Self {
            inner: MixedGraph::with_vertices(vertices)?,
        })
    }

    /// Creates a directed graph from vertices and an arc list; arcs touching
    /// unknown vertices are discarded.
    pub fn from_parts(
        vertices: impl IntoIterator<Item = V>,
        arcs: impl IntoIterator<Item = (V, V)>,
    ) -> Result<Self, TbhError> {
        Ok(Self {
            inner: MixedGraph::from_parts(vertices, [], arcs)?,
        })
    }

    /// Creates a directed graph from an arc list, adding endpoints as vertices.
    pub fn from_arcs(arcs: impl IntoIterator<Item = (V, V)>) -> Result<Self, TbhError> {
        let mut graph = Self::new();
        graph.update(arcs, true)?;
        Ok(graph)
    }

    /// Keeps the directed edges of a mixed graph.
    pub fn from_mixed(mixed: &MixedGraph<V>) -> Self {
        let mut inner = MixedGraph::new();
        for vertex in mixed.vertices() {
            inner.add(vertex).expect("distinct vertices");
        }
        inner
            .update(EdgeKind::Directed, mixed.directed_edges(), false)
            .expect("arcs over known vertices");
        Self { inner }
    }

    /// Adds vertex `x`.
    pub fn add(&mut self, x: V) -> Result<(), TbhError> {
        self.inner.add(x)
    }

    /// Removes vertex `x` and its incident arcs.
    pub fn remove(&mut self, x: V) -> Result<(), TbhError> {
        self.inner.remove(x)
    }

    /// Adds arcs; see [`MixedGraph::update`].
    pub fn update(
        &mut self,
        arcs: impl IntoIterator<Item = (V, V)>,
        create_missing: bool,
    ) -> Result<(), TbhError> {
        self.inner.update(EdgeKind::Directed, arcs, create_missing)
    }

    /// Removes arcs; pairs with absent endpoints are ignored.
    pub fn difference(&mut self, arcs: impl IntoIterator<Item = (V, V)>) {
        self.inner.difference(arcs)
    }

    /// Heads of arcs leaving `x`.
    pub fn successors(&self, x: V) -> Result<&BTreeSet<V>, TbhError> {
        self.inner.successors(x)
    }

    /// Tails of arcs ending at `x`.
    pub fn predecessors(&self, x: V) -> Result<&BTreeSet<V>, TbhError> {
        self.inner.predecessors(x)
    }

    /// Returns whether `(x, y)` is an arc.
    pub fn has_arc(&self, x: V, y: V) -> bool {
        self.inner.has_edge_kind(x, y, EdgeKind::Directed)
    }

    /// Arcs as `(tail, head)` pairs.
    pub fn arcs(&self) -> BTreeSet<(V, V)> {
        self.inner.directed_edges()
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

    /// Read access to the underlying mixed graph.
    pub fn as_mixed(&self) -> &MixedGraph<V> {
        &self.inner
    }
}
