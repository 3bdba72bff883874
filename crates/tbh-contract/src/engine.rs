//! The contraction engine: drives single steps and full step sequences.

use std::collections::BTreeMap;

use tbh_core::cluster::LeafSet;
use tbh_core::{ClusterId, ClusterRegistry, LeafId, TbhError};
use tbh_graph::Graph;

use crate::strategy::ContractionStrategy;
use crate::tree::BinaryMixedTree;

/// Cumulative cluster map: every cluster ever materialized by the run,
/// mapped to the leaves it explains.
pub type ClusterMap = BTreeMap<ClusterId, LeafSet>;

/// One snapshot of the decomposition: the working tree and the cluster map
/// as of that step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompositionStage {
    /// Working tree after the step.
    pub tree: BinaryMixedTree,
    /// Cluster map after the step.
    pub map: ClusterMap,
}

/// Completed decomposition: the ordered stage history plus the registry
/// resolving every cluster identifier the stages mention.
#[derive(Debug, Clone)]
pub struct Decomposition {
    /// Stage sequence, starting with the input tree under the identity map
    /// and ending with a single-vertex tree.
    pub stages: Vec<DecompositionStage>,
    /// Intern table for all cluster identifiers used across the stages.
    pub registry: ClusterRegistry,
}

impl Decomposition {
    /// The terminal stage (single vertex holding the full leaf set).
    pub fn final_stage(&self) -> &DecompositionStage {
        self.stages.last().expect("history starts with the input tree")
    }

    /// The family of leaf-sets materialized across the whole run.
    pub fn cluster_family(&self) -> std::collections::BTreeSet<LeafSet> {
        self.final_stage().map.values().cloned().collect()
    }
}

/// State machine advancing a working tree to a single vertex.
///
/// The engine owns the current snapshot; every step works on a private deep
/// copy, so previously returned stages are never mutated.
#[derive(Debug, Clone)]
pub struct ContractionEngine<S: ContractionStrategy> {
    tree: BinaryMixedTree,
    registry: ClusterRegistry,
    map: ClusterMap,
    strategy: S,
}

impl<S: ContractionStrategy> ContractionEngine<S> {
    /// Creates an engine over a leaf tree, under the identity cluster map.
    pub fn new(leaf_tree: &Graph<LeafId>, strategy: S) -> Result<Self, TbhError> {
        let mut registry = ClusterRegistry::new();
        let tree = BinaryMixedTree::from_leaf_tree(leaf_tree, &mut registry)?;
        let mut map = ClusterMap::new();
        for vertex in tree.vertices() {
            map.insert(vertex, registry.leaves(vertex)?.clone());
        }
        Ok(Self {
            tree,
            registry,
            map,
            strategy,
        })
    }

    /// Creates an engine over an already built mixed tree.
    ///
    /// The registry must resolve every vertex of the tree; the initial map
    /// assigns each vertex its interned leaf-set.
    pub fn from_tree(
        tree: BinaryMixedTree,
        registry: ClusterRegistry,
        strategy: S,
    ) -> Result<Self, TbhError> {
        let mut map = ClusterMap::new();
        for vertex in tree.vertices() {
            map.insert(vertex, registry.leaves(vertex)?.clone());
        }
        Ok(Self {
            tree,
            registry,
            map,
            strategy,
        })
    }

    /// Current working tree.
    pub fn tree(&self) -> &BinaryMixedTree {
        &self.tree
    }

    /// Current cumulative cluster map.
    pub fn cluster_map(&self) -> &ClusterMap {
        &self.map
    }

    /// Registry resolving the cluster identifiers of every snapshot.
    pub fn registry(&self) -> &ClusterRegistry {
        &self.registry
    }

    /// Returns whether the terminal state has been reached.
    pub fn is_done(&self) -> bool {
        self.tree.vertex_count() <= 1
    }

    /// Performs one contraction step and returns the new snapshot.
    ///
    /// A strategy failure (no admissible edge, missing supremum) is fatal to
    /// the step and propagates unchanged.
    pub fn step(&mut self) -> Result<DecompositionStage, TbhError> {
        let (x, y) = self.strategy.choose_edge(&self.tree, &self.registry)?;

        let mut next = self.tree.clone();
        let merged = next.union(x, y, &mut self.registry)?;
        self.map
            .insert(merged, self.registry.leaves(merged)?.clone());

        for z in [x.min(y), x.max(y)] {
            let candidates = next.undirected_neighbors(z)?.clone();
            let migrating =
                self.strategy
                    .migrating_neighbors(&next, &self.registry, z, merged, &candidates)?;
            debug_assert!(migrating.is_subset(&candidates));
            next.reattach(z, merged, &migrating)?;

            if migrating == candidates {
                // z anchors nothing anymore: reconnect its unresolved
                // outgoing neighborhood into a tree and resolve z itself.
                let edges = self.strategy.reconnect_edges(&next, &self.registry, z)?;
                next.install_undirected(edges)?;
                next.remove_vertex(z)?;
            }
        }

        self.tree = next;
        Ok(DecompositionStage {
            tree: self.tree.clone(),
            map: self.map.clone(),
        })
    }

    /// Runs steps until one vertex remains, returning the full history.
    ///
    /// The history starts with the input tree under the identity map; every
    /// later entry is the snapshot returned by one step. The terminal
    /// snapshot holds a single vertex whose cluster is the full leaf set.
    pub fn run_to_completion(mut self) -> Result<Decomposition, TbhError> {
        let mut stages = vec![DecompositionStage {
            tree: self.tree.clone(),
            map: self.map.clone(),
        }];
        while !self.is_done() {
            stages.push(self.step()?);
        }
        Ok(Decomposition {
            stages,
            registry: self.registry,
        })
    }
}
