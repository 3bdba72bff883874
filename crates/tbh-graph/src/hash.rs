use serde::Serialize;
use sha2::{Digest, Sha256};

use tbh_core::errors::{ErrorInfo, TbhError};

use crate::mixed::{MixedGraph, Vertex};
use crate::serialization::SerializableMixedGraph;

/// Computes the canonical structural hash for the provided graph.
///
/// The hash covers the sorted vertex list and both sorted edge lists, so two
/// structurally equal graphs always hash identically regardless of the
/// operation order that built them.
pub fn canonical_hash<V>(graph: &MixedGraph<V>) -> Result<String, TbhError>
where
    V: Vertex + Serialize,
{
    let serializable = SerializableMixedGraph::from_graph(graph);
    let bytes = bincode::serialize(&serializable)
        .map_err(|err| TbhError::Serde(ErrorInfo::new("serialize-hash", err.to_string())))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}
