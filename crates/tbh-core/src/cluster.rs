//! Interned cluster identifiers and the id → leaf-set side table.
//!
//! Clusters (sets of original leaves) are the vertices of the working trees.
//! Hashing and comparing whole leaf-sets on every adjacency operation gets
//! expensive as clusters grow, so clusters are interned: each distinct
//! leaf-set receives a small integer [`ClusterId`], and the registry keeps the
//! id → leaf-set table. Equality and union become table operations. The
//! registry is append-only, so identifiers recorded in historical snapshots
//! stay resolvable for the lifetime of a run.

use std::collections::{BTreeMap, BTreeSet};

use crate::errors::{ErrorInfo, TbhError};
use crate::{ClusterId, LeafId};

/// Set of original leaf identifiers represented by a cluster.
pub type LeafSet = BTreeSet<LeafId>;

/// Append-only intern table mapping cluster identifiers to leaf-sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterRegistry {
    clusters: Vec<LeafSet>,
    index: BTreeMap<LeafSet, ClusterId>,
}

impl ClusterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a leaf-set, returning its identifier.
    ///
    /// Interning the same leaf-set twice returns the same identifier.
    pub fn intern(&mut self, leaves: LeafSet) -> ClusterId {
        if let Some(id) = self.index.get(&leaves) {
            return *id;
        }
        let id = ClusterId::from_raw(self.clusters.len() as u64);
        self.index.insert(leaves.clone(), id);
        self.clusters.push(leaves);
        id
    }

    /// Interns the singleton cluster of a single leaf.
    pub fn singleton(&mut self, leaf: LeafId) -> ClusterId {
        let mut leaves = LeafSet::new();
        leaves.insert(leaf);
        self.intern(leaves)
    }

    /// Interns the union of two existing clusters.
    pub fn union(&mut self, a: ClusterId, b: ClusterId) -> Result<ClusterId, TbhError> {
        let mut leaves = self.leaves(a)?.clone();
        leaves.extend(self.leaves(b)?.iter().copied());
        Ok(self.intern(leaves))
    }

    /// Returns the leaf-set represented by a cluster identifier.
    pub fn leaves(&self, id: ClusterId) -> Result<&LeafSet, TbhError> {
        self.clusters.get(id.as_raw() as usize).ok_or_else(|| {
            TbhError::Contract(
                ErrorInfo::new("unknown-cluster", "cluster id has not been interned")
                    .with_context("cluster", id.as_raw().to_string()),
            )
        })
    }

    /// Looks up the identifier of an already interned leaf-set.
    pub fn lookup(&self, leaves: &LeafSet) -> Option<ClusterId> {
        self.index.get(leaves).copied()
    }

    /// Returns whether the identifier has been interned.
    pub fn contains(&self, id: ClusterId) -> bool {
        (id.as_raw() as usize) < self.clusters.len()
    }

    /// Number of interned clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Iterates over all interned `(id, leaf-set)` pairs in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ClusterId, &LeafSet)> {
        self.clusters
            .iter()
            .enumerate()
            .map(|(idx, leaves)| (ClusterId::from_raw(idx as u64), leaves))
    }
}
