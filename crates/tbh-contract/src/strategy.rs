//! Contraction strategies: the three decision points of a contraction step.
//!
//! Two strategies exist. [`RandomizedStrategy`] drives the unconstrained
//! variant from an injected RNG; [`HypergraphStrategy`] drives the
//! constrained variant from a totally balanced target hypergraph and is fully
//! deterministic.

use std::collections::{BTreeMap, BTreeSet};

use rand::seq::SliceRandom;
use rand::Rng;

use tbh_core::cluster::LeafSet;
use tbh_core::errors::{ErrorInfo, TbhError};
use tbh_core::{ClusterId, ClusterRegistry, LeafId, RngHandle};
use tbh_graph::random_tree;
use tbh_hypergraph::Hypergraph;

use crate::tree::BinaryMixedTree;

/// Decision functions consulted by the contraction engine.
///
/// Implementations never mutate the tree; they only pick among the options
/// the current snapshot offers.
pub trait ContractionStrategy {
    /// Picks the undirected edge to contract next.
    ///
    /// Fails with a consistency violation when no admissible edge exists.
    fn choose_edge(
        &mut self,
        tree: &BinaryMixedTree,
        registry: &ClusterRegistry,
    ) -> Result<(ClusterId, ClusterId), TbhError>;

    /// Picks which undirected neighbors of `z` migrate onto the merged
    /// cluster; the result is a subset of `candidates`.
    fn migrating_neighbors(
        &mut self,
        tree: &BinaryMixedTree,
        registry: &ClusterRegistry,
        z: ClusterId,
        merged: ClusterId,
        candidates: &BTreeSet<ClusterId>,
    ) -> Result<BTreeSet<ClusterId>, TbhError>;

    /// Edges reconnecting the outgoing neighbors of a fully migrated vertex
    /// `z` into a tree, installed before `z` is deleted.
    fn reconnect_edges(
        &mut self,
        tree: &BinaryMixedTree,
        registry: &ClusterRegistry,
        z: ClusterId,
    ) -> Result<Vec<(ClusterId, ClusterId)>, TbhError>;
}

/// Unconstrained randomized strategy.
#[derive(Debug, Clone)]
pub struct RandomizedStrategy {
    rng: RngHandle,
}

impl RandomizedStrategy {
    /// Creates a strategy drawing from the provided RNG handle.
    pub fn new(rng: RngHandle) -> Self {
        Self { rng }
    }

    /// Creates a strategy from a master seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(RngHandle::from_seed(seed))
    }
}

impl ContractionStrategy for RandomizedStrategy {
    fn choose_edge(
        &mut self,
        tree: &BinaryMixedTree,
        _registry: &ClusterRegistry,
    ) -> Result<(ClusterId, ClusterId), TbhError> {
        let mut admissible = Vec::new();
        for (x, y) in tree.undirected_edges() {
            if tree.predecessors(x)?.is_empty() && tree.predecessors(y)?.is_empty() {
                admissible.push((x, y));
            }
        }
        admissible
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(non_consistent_tree)
    }

    fn migrating_neighbors(
        &mut self,
        _tree: &BinaryMixedTree,
        _registry: &ClusterRegistry,
        _z: ClusterId,
        _merged: ClusterId,
        candidates: &BTreeSet<ClusterId>,
    ) -> Result<BTreeSet<ClusterId>, TbhError> {
        Ok(candidates
            .iter()
            .copied()
            .filter(|_| self.rng.gen_bool(0.5))
            .collect())
    }

    fn reconnect_edges(
        &mut self,
        tree: &BinaryMixedTree,
        _registry: &ClusterRegistry,
        z: ClusterId,
    ) -> Result<Vec<(ClusterId, ClusterId)>, TbhError> {
        let targets: Vec<ClusterId> = tree.successors(z)?.iter().copied().collect();
        let reconnection = random_tree(&targets, &mut self.rng)?;
        Ok(reconnection.edges().into_iter().collect())
    }
}

/// Constrained strategy driven by a totally balanced target hypergraph.
#[derive(Debug, Clone)]
pub struct HypergraphStrategy {
    hypergraph: Hypergraph,
}

impl HypergraphStrategy {
    /// Creates a strategy targeting the provided hypergraph.
    pub fn new(hypergraph: Hypergraph) -> Self {
        Self { hypergraph }
    }

    /// Returns the target hypergraph.
    pub fn hypergraph(&self) -> &Hypergraph {
        &self.hypergraph
    }

    fn supremum_of(
        &self,
        registry: &ClusterRegistry,
        a: ClusterId,
        b: ClusterId,
    ) -> Result<LeafSet, TbhError> {
        let leaves_a = registry.leaves(a)?;
        let leaves_b = registry.leaves(b)?;
        self.hypergraph
            .supremum(leaves_a, leaves_b)
            .cloned()
            .ok_or_else(|| {
                TbhError::Contract(
                    ErrorInfo::new(
                        "no-supremum",
                        "no hyperedge contains both clusters",
                    )
                    .with_context("pair", format!("({}, {})", a.as_raw(), b.as_raw())),
                )
            })
    }
}

impl ContractionStrategy for HypergraphStrategy {
    fn choose_edge(
        &mut self,
        tree: &BinaryMixedTree,
        registry: &ClusterRegistry,
    ) -> Result<(ClusterId, ClusterId), TbhError> {
        let region = tree.homogeneous_subset()?;

        let mut best: Option<(usize, LeafSet, (ClusterId, ClusterId))> = None;
        for (x, y) in tree.undirected_edges() {
            if !region.contains(&x) || !region.contains(&y) {
                continue;
            }
            let supremum = self.supremum_of(registry, x, y)?;
            let key = (supremum.len(), supremum, (x, y));
            match &best {
                Some(current) if *current <= key => {}
                _ => best = Some(key),
            }
        }
        best.map(|(_, _, edge)| edge).ok_or_else(non_consistent_tree)
    }

    fn migrating_neighbors(
        &mut self,
        _tree: &BinaryMixedTree,
        registry: &ClusterRegistry,
        z: ClusterId,
        merged: ClusterId,
        candidates: &BTreeSet<ClusterId>,
    ) -> Result<BTreeSet<ClusterId>, TbhError> {
        let merged_leaves = registry.leaves(merged)?.clone();
        let mut migrating = BTreeSet::new();
        for t in candidates.iter().copied() {
            let supremum = self.supremum_of(registry, z, t)?;
            if merged_leaves.is_subset(&supremum) {
                migrating.insert(t);
            }
        }
        Ok(migrating)
    }

    fn reconnect_edges(
        &mut self,
        tree: &BinaryMixedTree,
        registry: &ClusterRegistry,
        z: ClusterId,
    ) -> Result<Vec<(ClusterId, ClusterId)>, TbhError> {
        let outgoing = tree.successors(z)?;
        let leaves_z = registry.leaves(z)?;

        // leaves explained by the outgoing neighborhood but not by z itself
        let mut region = LeafSet::new();
        for t in outgoing.iter().copied() {
            region.extend(registry.leaves(t)?.difference(leaves_z).copied());
        }

        let support = self.hypergraph.restriction(&region).support_tree()?;

        let mut owner: BTreeMap<LeafId, ClusterId> = BTreeMap::new();
        for leaf in region.iter().copied() {
            let holder = outgoing
                .iter()
                .copied()
                .find(|t| {
                    registry
                        .leaves(*t)
                        .map(|leaves| leaves.contains(&leaf))
                        .unwrap_or(false)
                })
                .ok_or_else(|| {
                    TbhError::Contract(
                        ErrorInfo::new("unowned-leaf", "leaf not explained by any outgoing neighbor")
                            .with_context("leaf", leaf.as_raw().to_string()),
                    )
                })?;
            owner.insert(leaf, holder);
        }

        let mut edges: BTreeSet<(ClusterId, ClusterId)> = BTreeSet::new();
        for (a, b) in support.edges() {
            let u = owner[&a];
            let v = owner[&b];
            if u != v {
                edges.insert((u.min(v), u.max(v)));
            }
        }
        Ok(edges.into_iter().collect())
    }
}

fn non_consistent_tree() -> TbhError {
    TbhError::Contract(ErrorInfo::new(
        "non-consistent-tree",
        "no admissible contraction edge exists",
    ))
}
