#![deny(missing_docs)]
//! Core identifiers, the cluster intern table, structured errors and the
//! deterministic RNG policy shared by every tbh crate.

use serde::{Deserialize, Serialize};

pub mod cluster;
pub mod errors;
pub mod rng;

pub use cluster::{ClusterRegistry, LeafSet};
pub use errors::{ErrorInfo, TbhError};
pub use rng::{derive_substream_seed, RngHandle};

/// Identifier of an original leaf of the base set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LeafId(u64);

impl LeafId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Identifier of an interned cluster (a set of leaves) within a
/// [`ClusterRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClusterId(u64);

impl ClusterId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}
