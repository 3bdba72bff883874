#![deny(missing_docs)]
//! Tree contraction over interned clusters: the binary mixed tree and its
//! contraction primitives, the two contraction strategies (randomized and
//! hypergraph-driven), and the engine advancing a working tree to a single
//! vertex while recording the cluster map at every step.

mod engine;
mod strategy;
mod tree;

pub use engine::{ClusterMap, ContractionEngine, Decomposition, DecompositionStage};
pub use strategy::{ContractionStrategy, HypergraphStrategy, RandomizedStrategy};
pub use tree::BinaryMixedTree;

use tbh_core::{LeafId, TbhError};
use tbh_graph::Graph;
use tbh_hypergraph::Hypergraph;

/// Runs the randomized variant over a leaf tree with the given master seed.
pub fn random_decomposition(
    leaf_tree: &Graph<LeafId>,
    seed: u64,
) -> Result<Decomposition, TbhError> {
    ContractionEngine::new(leaf_tree, RandomizedStrategy::from_seed(seed))?.run_to_completion()
}

/// Runs the constrained variant against a totally balanced hypergraph,
/// starting from the hypergraph's own support tree.
pub fn hypergraph_decomposition(hypergraph: &Hypergraph) -> Result<Decomposition, TbhError> {
    let support = hypergraph.support_tree()?;
    ContractionEngine::new(&support, HypergraphStrategy::new(hypergraph.clone()))?
        .run_to_completion()
}
