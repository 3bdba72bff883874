#![deny(missing_docs)]
//! Deterministic mixed-graph structures and the order utilities built on
//! them: a vertex set carrying two disjoint edge relations (undirected and
//! directed), thin one-relation specializations, traversal orders,
//! topological sort, connected components, Prüfer-based random trees, and
//! JSON/bincode conversions with canonical hashing.

mod directed;
mod generators;
mod hash;
mod mixed;
pub mod order;
mod serialization;
mod undirected;

pub use directed::DiGraph;
pub use generators::{random_tree, tree_from_prufer};
pub use hash::canonical_hash;
pub use mixed::{EdgeKind, MixedGraph, NeighborSelect, Vertex};
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json};
pub use undirected::Graph;
