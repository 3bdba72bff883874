use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use tbh_core::errors::{ErrorInfo, TbhError};

use crate::mixed::{MixedGraph, Vertex};

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes<V>(graph: &MixedGraph<V>) -> Result<Vec<u8>, TbhError>
where
    V: Vertex + Serialize,
{
    let serializable = SerializableMixedGraph::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| TbhError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes<V>(bytes: &[u8]) -> Result<MixedGraph<V>, TbhError>
where
    V: Vertex + DeserializeOwned,
{
    let serializable: SerializableMixedGraph<V> = bincode::deserialize(bytes)
        .map_err(|err| TbhError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_graph()
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json<V>(graph: &MixedGraph<V>) -> Result<String, TbhError>
where
    V: Vertex + Serialize,
{
    let serializable = SerializableMixedGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| TbhError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a graph from a JSON string.
pub fn graph_from_json<V>(json: &str) -> Result<MixedGraph<V>, TbhError>
where
    V: Vertex + DeserializeOwned,
{
    let serializable: SerializableMixedGraph<V> = serde_json::from_str(json)
        .map_err(|err| TbhError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SerializableMixedGraph<V> {
    vertices: Vec<V>,
    undirected: Vec<(V, V)>,
    directed: Vec<(V, V)>,
}

impl<V: Vertex> SerializableMixedGraph<V> {
    pub(crate) fn from_graph(graph: &MixedGraph<V>) -> Self {
        Self {
            vertices: graph.vertices().collect(),
            undirected: graph.undirected_edges().into_iter().collect(),
            directed: graph.directed_edges().into_iter().collect(),
        }
    }

    fn into_graph(self) -> Result<MixedGraph<V>, TbhError> {
        MixedGraph::from_parts(self.vertices, self.undirected, self.directed)
    }
}
