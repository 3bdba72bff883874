//! Random and Prüfer-encoded tree construction with deterministic randomness.

use rand::Rng;

use tbh_core::errors::{ErrorInfo, TbhError};
use tbh_core::rng::RngHandle;

use crate::mixed::Vertex;
use crate::undirected::Graph;

/// Decodes a Prüfer sequence into the tree it encodes.
///
/// `prufer` must hold `max(0, n - 2)` indices into `vertices` (`n` =
/// `vertices.len()`); trees on fewer than three vertices have an empty
/// sequence.
pub fn tree_from_prufer<V: Vertex>(prufer: &[usize], vertices: &[V]) -> Result<Graph<V>, TbhError> {
    let n = vertices.len();
    if prufer.len() != n.saturating_sub(2) {
        return Err(TbhError::Graph(
            ErrorInfo::new("prufer-length", "sequence length must be max(0, n - 2)")
                .with_context("vertices", n.to_string())
                .with_context("sequence", prufer.len().to_string()),
        ));
    }
    if let Some(bad) = prufer.iter().find(|idx| **idx >= n) {
        return Err(TbhError::Graph(
            ErrorInfo::new("prufer-index", "sequence index outside the vertex list")
                .with_context("index", bad.to_string())
                .with_context("vertices", n.to_string()),
        ));
    }

    let mut tree = Graph::with_vertices(vertices.iter().copied())?;

    let mut degree = vec![1usize; n];
    for idx in prufer {
        degree[*idx] += 1;
    }

    for idx in prufer {
        let leaf = degree
            .iter()
            .position(|d| *d == 1)
            .expect("a sequence entry always leaves a pending leaf");
        tree.update([(vertices[*idx], vertices[leaf])], false)?;
        degree[*idx] -= 1;
        degree[leaf] -= 1;
    }

    let last: Vec<usize> = (0..n).filter(|idx| degree[*idx] == 1).collect();
    if let [a, b] = last.as_slice() {
        tree.update([(vertices[*a], vertices[*b])], false)?;
    }

    Ok(tree)
}

/// A uniformly random tree over the given vertices.
pub fn random_tree<V: Vertex>(vertices: &[V], rng: &mut RngHandle) -> Result<Graph<V>, TbhError> {
    let n = vertices.len();
    if n <= 2 {
        return tree_from_prufer(&[], vertices);
    }
    let prufer: Vec<usize> = (0..n - 2).map(|_| rng.gen_range(0..n)).collect();
    tree_from_prufer(&prufer, vertices)
}
