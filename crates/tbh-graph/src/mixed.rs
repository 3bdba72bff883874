use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

use tbh_core::errors::{ErrorInfo, TbhError};

/// Marker trait for vertex identifiers usable in the graph structures.
pub trait Vertex: Copy + Ord + Debug {}

impl<T> Vertex for T where T: Copy + Ord + Debug {}

/// Kind of relation carried by an edge of a [`MixedGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeKind {
    /// Symmetric relation: `(x, y)` and `(y, x)` are the same edge.
    Undirected,
    /// Asymmetric relation: an arc from its tail to its head.
    Directed,
}

/// Selector describing which neighbor roles a query should return.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeighborSelect {
    undirected: bool,
    successors: bool,
    predecessors: bool,
    closed: bool,
}

impl NeighborSelect {
    /// Selects undirected neighbors only.
    pub fn undirected() -> Self {
        Self {
            undirected: true,
            ..Self::default()
        }
    }

    /// Selects heads of outgoing arcs only.
    pub fn successors() -> Self {
        Self {
            successors: true,
            ..Self::default()
        }
    }

    /// Selects tails of incoming arcs only.
    pub fn predecessors() -> Self {
        Self {
            predecessors: true,
            ..Self::default()
        }
    }

    /// Selects undirected neighbors plus successors, the neighborhood walked
    /// by the order utilities.
    pub fn traversal() -> Self {
        Self {
            undirected: true,
            successors: true,
            ..Self::default()
        }
    }

    /// Selects every neighbor role.
    pub fn all() -> Self {
        Self {
            undirected: true,
            successors: true,
            predecessors: true,
            closed: false,
        }
    }

    /// Also includes the queried vertex itself (closed neighborhood).
    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }
}

/// Graph with two disjoint edge relations, undirected and directed.
///
/// Any vertex pair carries at most one relation at a time: inserting an edge
/// of one kind removes an existing edge of the other kind between the same
/// endpoints. All containers are BTree-based, so iteration order (and thus
/// every algorithm built on top) is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixedGraph<V: Vertex> {
    vertices: BTreeSet<V>,
    undirected: BTreeMap<V, BTreeSet<V>>,
    successors: BTreeMap<V, BTreeSet<V>>,
    predecessors: BTreeMap<V, BTreeSet<V>>,
}

impl<V: Vertex> Default for MixedGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> MixedGraph<V> {
    /// Creates an empty mixed graph.
    pub fn new() -> Self {
        Self {
            vertices: BTreeSet::new(),
            undirected: BTreeMap::new(),
            successors: BTreeMap::new(),
            predecessors: BTreeMap::new(),
        }
    }

    /// Creates a graph from a vertex collection.
    pub fn with_vertices(vertices: impl IntoIterator<Item = V>) -> Result<Self, TbhError> {
        let mut graph = Self::new();
        for vertex in vertices {
            graph.add(vertex)?;
        }
        Ok(graph)
    }

    /// Creates a graph from vertices and edge lists.
    ///
    /// Edges touching vertices outside the provided vertex set are discarded.
    pub fn from_parts(
        vertices: impl IntoIterator<Item = V>,
        undirected_edges: impl IntoIterator<Item = (V, V)>,
        directed_edges: impl IntoIterator<Item = (V, V)>,
    ) -> Result<Self, TbhError> {
        let mut graph = Self::with_vertices(vertices)?;
        graph.update(EdgeKind::Undirected, undirected_edges, false)?;
        graph.update(EdgeKind::Directed, directed_edges, false)?;
        Ok(graph)
    }

    /// Adds vertex `x`.
    pub fn add(&mut self, x: V) -> Result<(), TbhError> {
        if self.vertices.contains(&x) {
            return Err(graph_error("duplicate-vertex", "already a vertex")
                .with_vertex("vertex", x));
        }
        self.vertices.insert(x);
        self.undirected.insert(x, BTreeSet::new());
        self.successors.insert(x, BTreeSet::new());
        self.predecessors.insert(x, BTreeSet::new());
        Ok(())
    }

    /// Removes vertex `x`, cascading into all three adjacency tables.
    pub fn remove(&mut self, x: V) -> Result<(), TbhError> {
        if !self.vertices.contains(&x) {
            return Err(graph_error("unknown-vertex", "not a vertex").with_vertex("vertex", x));
        }
        self.vertices.remove(&x);
        if let Some(neighbors) = self.undirected.remove(&x) {
            for y in neighbors {
                if let Some(set) = self.undirected.get_mut(&y) {
                    set.remove(&x);
                }
            }
        }
        if let Some(heads) = self.successors.remove(&x) {
            for y in heads {
                if let Some(set) = self.predecessors.get_mut(&y) {
                    set.remove(&x);
                }
            }
        }
        if let Some(tails) = self.predecessors.remove(&x) {
            for y in tails {
                if let Some(set) = self.successors.get_mut(&y) {
                    set.remove(&x);
                }
            }
        }
        Ok(())
    }

    /// Returns whether `x` is a vertex.
    pub fn contains(&self, x: V) -> bool {
        self.vertices.contains(&x)
    }

    /// Returns the vertex set.
    pub fn vertex_set(&self) -> &BTreeSet<V> {
        &self.vertices
    }

    /// Iterates over the vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.vertices.iter().copied()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds edges of the requested kind.
    ///
    /// Already present edges are kept as they are. An edge present with the
    /// opposite kind between the same endpoints is replaced. When
    /// `create_missing` is false, edges touching unknown vertices are
    /// discarded; otherwise missing endpoints are added first.
    pub fn update(
        &mut self,
        kind: EdgeKind,
        edges: impl IntoIterator<Item = (V, V)>,
        create_missing: bool,
    ) -> Result<(), TbhError> {
        for (x, y) in edges {
            if !create_missing && (!self.contains(x) || !self.contains(y)) {
                continue;
            }
            if x == y {
                return Err(graph_error("self-loop", "edges must join distinct vertices")
                    .with_vertex("vertex", x));
            }
            if !self.contains(x) {
                self.add(x)?;
            }
            if !self.contains(y) {
                self.add(y)?;
            }
            match kind {
                EdgeKind::Undirected => {
                    if self.undirected[&x].contains(&y) {
                        continue;
                    }
                    self.drop_arc(x, y);
                    self.drop_arc(y, x);
                    self.undirected.get_mut(&x).expect("vertex added").insert(y);
                    self.undirected.get_mut(&y).expect("vertex added").insert(x);
                }
                EdgeKind::Directed => {
                    if self.successors[&x].contains(&y) {
                        continue;
                    }
                    self.drop_undirected(x, y);
                    self.successors.get_mut(&x).expect("vertex added").insert(y);
                    self.predecessors.get_mut(&y).expect("vertex added").insert(x);
                }
            }
        }
        Ok(())
    }

    /// Removes edges of either kind; pairs with absent endpoints are ignored.
    ///
    /// For a pair `(x, y)` the undirected edge is removed if present,
    /// otherwise the arc from `x` to `y`.
    pub fn difference(&mut self, edges: impl IntoIterator<Item = (V, V)>) {
        for (x, y) in edges {
            if !self.contains(x) || !self.contains(y) {
                continue;
            }
            if self.undirected[&x].contains(&y) {
                self.drop_undirected(x, y);
            } else {
                self.drop_arc(x, y);
            }
        }
    }

    fn drop_undirected(&mut self, x: V, y: V) {
        if let Some(set) = self.undirected.get_mut(&x) {
            set.remove(&y);
        }
        if let Some(set) = self.undirected.get_mut(&y) {
            set.remove(&x);
        }
    }

    fn drop_arc(&mut self, tail: V, head: V) {
        if let Some(set) = self.successors.get_mut(&tail) {
            set.remove(&head);
        }
        if let Some(set) = self.predecessors.get_mut(&head) {
            set.remove(&tail);
        }
    }

    /// Returns the neighborhood of `x` described by the selector.
    pub fn neighbors(&self, x: V, select: NeighborSelect) -> Result<BTreeSet<V>, TbhError> {
        if !self.contains(x) {
            return Err(graph_error("unknown-vertex", "not a vertex").with_vertex("vertex", x));
        }
        let mut neighborhood = BTreeSet::new();
        if select.closed {
            neighborhood.insert(x);
        }
        if select.undirected {
            neighborhood.extend(self.undirected[&x].iter().copied());
        }
        if select.successors {
            neighborhood.extend(self.successors[&x].iter().copied());
        }
        if select.predecessors {
            neighborhood.extend(self.predecessors[&x].iter().copied());
        }
        Ok(neighborhood)
    }

    /// Undirected neighbors of `x`.
    pub fn undirected_neighbors(&self, x: V) -> Result<&BTreeSet<V>, TbhError> {
        self.undirected
            .get(&x)
            .ok_or_else(|| graph_error("unknown-vertex", "not a vertex").with_vertex("vertex", x))
    }

    /// Heads of arcs leaving `x`.
    pub fn successors(&self, x: V) -> Result<&BTreeSet<V>, TbhError> {
        self.successors
            .get(&x)
            .ok_or_else(|| graph_error("unknown-vertex", "not a vertex").with_vertex("vertex", x))
    }

    /// Tails of arcs ending at `x`.
    pub fn predecessors(&self, x: V) -> Result<&BTreeSet<V>, TbhError> {
        self.predecessors
            .get(&x)
            .ok_or_else(|| graph_error("unknown-vertex", "not a vertex").with_vertex("vertex", x))
    }

    /// Returns whether the pair carries an edge of any kind from `x` to `y`.
    pub fn has_edge(&self, x: V, y: V) -> bool {
        self.has_edge_kind(x, y, EdgeKind::Undirected) || self.has_edge_kind(x, y, EdgeKind::Directed)
    }

    /// Returns whether the pair carries an edge of the given kind from `x` to `y`.
    pub fn has_edge_kind(&self, x: V, y: V, kind: EdgeKind) -> bool {
        match kind {
            EdgeKind::Undirected => self
                .undirected
                .get(&x)
                .map(|set| set.contains(&y))
                .unwrap_or(false),
            EdgeKind::Directed => self
                .successors
                .get(&x)
                .map(|set| set.contains(&y))
                .unwrap_or(false),
        }
    }

    /// Undirected edges as normalized `(min, max)` pairs.
    pub fn undirected_edges(&self) -> BTreeSet<(V, V)> {
        let mut edges = BTreeSet::new();
        for (x, neighbors) in &self.undirected {
            for y in neighbors {
                if x <= y {
                    edges.insert((*x, *y));
                } else {
                    edges.insert((*y, *x));
                }
            }
        }
        edges
    }

    /// Directed edges as `(tail, head)` pairs.
    pub fn directed_edges(&self) -> BTreeSet<(V, V)> {
        let mut edges = BTreeSet::new();
        for (x, heads) in &self.successors {
            for y in heads {
                edges.insert((*x, *y));
            }
        }
        edges
    }

    /// Total number of edges (undirected pairs plus arcs).
    pub fn edge_count(&self) -> usize {
        let undirected: usize = self.undirected.values().map(BTreeSet::len).sum();
        let directed: usize = self.successors.values().map(BTreeSet::len).sum();
        undirected / 2 + directed
    }

    /// Number of undirected, outgoing and incoming edges at `x`.
    pub fn degree(&self, x: V) -> Result<usize, TbhError> {
        Ok(self.undirected_neighbors(x)?.len()
            + self.successors(x)?.len()
            + self.predecessors(x)?.len())
    }

    /// Contracts the pair `{x, y}` into `new_name`.
    ///
    /// Every edge incident to `x` or `y` (in any of the three roles, except
    /// the edges joining the pair itself) is redirected to `new_name`, and the
    /// original vertices are removed. `new_name` may equal `x` or `y`.
    pub fn contraction(&mut self, x: V, y: V, new_name: V) -> Result<(), TbhError> {
        if x == y {
            return Err(graph_error("self-loop", "cannot contract a vertex with itself")
                .with_vertex("vertex", x));
        }
        if !self.contains(x) {
            return Err(graph_error("unknown-vertex", "not a vertex").with_vertex("vertex", x));
        }
        if !self.contains(y) {
            return Err(graph_error("unknown-vertex", "not a vertex").with_vertex("vertex", y));
        }
        let (x, y) = if new_name == x { (y, x) } else { (x, y) };
        if new_name != y && self.contains(new_name) {
            return Err(graph_error("duplicate-vertex", "contraction target already exists")
                .with_vertex("vertex", new_name));
        }
        if new_name != y {
            self.add(new_name)?;
        }

        let mut outgoing = Vec::new();
        let mut incoming = Vec::new();
        let mut undirected = Vec::new();
        for (u, partner) in [(x, y), (y, x)] {
            for v in self.successors[&u].iter().copied() {
                if v != partner && v != new_name {
                    outgoing.push((new_name, v));
                }
            }
            for v in self.predecessors[&u].iter().copied() {
                if v != partner && v != new_name {
                    incoming.push((v, new_name));
                }
            }
            for v in self.undirected[&u].iter().copied() {
                if v != partner && v != new_name {
                    undirected.push((new_name, v));
                }
            }
        }

        self.remove(x)?;
        if new_name != y {
            self.remove(y)?;
        }
        self.update(EdgeKind::Directed, outgoing, false)?;
        self.update(EdgeKind::Directed, incoming, false)?;
        self.update(EdgeKind::Undirected, undirected, false)?;
        Ok(())
    }

    /// A minimal path from `x` to `y` under the provided edge weights.
    ///
    /// Bellman–Ford relaxation over undirected plus outgoing neighbors,
    /// bounded at `n` rounds (`n` = vertex count). Fails with
    /// `absorbing-cycle` when the last round still improved a distance, which
    /// signals a negative absorbing cycle. Returns the empty path when `y` is
    /// unreachable.
    pub fn shortest_path(
        &self,
        x: V,
        y: V,
        weight: impl Fn(V, V) -> f64,
        forbidden: &BTreeSet<V>,
    ) -> Result<Vec<V>, TbhError> {
        if !self.contains(x) {
            return Err(graph_error("unknown-vertex", "not a vertex").with_vertex("vertex", x));
        }
        if !self.contains(y) {
            return Err(graph_error("unknown-vertex", "not a vertex").with_vertex("vertex", y));
        }

        let n = self.vertex_count();
        let mut parent: BTreeMap<V, V> = BTreeMap::new();
        let mut dist: BTreeMap<V, f64> = BTreeMap::new();
        parent.insert(x, x);
        dist.insert(x, 0.0);

        let mut rounds = 0;
        let mut changed = true;
        while rounds < n && changed {
            changed = false;
            rounds += 1;
            for u in self.vertices() {
                let Some(du) = dist.get(&u).copied() else {
                    continue;
                };
                for v in self.neighbors(u, NeighborSelect::traversal())? {
                    if forbidden.contains(&v) {
                        continue;
                    }
                    let candidate = du + weight(u, v);
                    if dist.get(&v).map(|dv| *dv > candidate).unwrap_or(true) {
                        dist.insert(v, candidate);
                        parent.insert(v, u);
                        changed = true;
                    }
                }
            }
        }
        if changed {
            return Err(graph_error(
                "absorbing-cycle",
                "relaxation did not stabilize within the round bound",
            )
            .with_context("rounds", rounds.to_string()));
        }

        if !parent.contains_key(&y) {
            return Ok(Vec::new());
        }
        let mut path = Vec::new();
        let mut current = y;
        while current != x {
            path.push(current);
            current = parent[&current];
        }
        path.push(x);
        path.reverse();
        Ok(path)
    }
}

fn graph_error(code: &str, message: &str) -> TbhError {
    TbhError::Graph(ErrorInfo::new(code, message))
}

trait VertexContextExt {
    fn with_vertex(self, key: &str, vertex: impl Debug) -> TbhError;
    fn with_context(self, key: &str, value: String) -> TbhError;
}

impl VertexContextExt for TbhError {
    fn with_vertex(self, key: &str, vertex: impl Debug) -> TbhError {
        self.with_context(key, format!("{vertex:?}"))
    }

    fn with_context(self, key: &str, value: String) -> TbhError {
        match self {
            TbhError::Graph(info) => TbhError::Graph(info.with_context(key, value)),
            other => other,
        }
    }
}
