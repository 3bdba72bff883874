use std::collections::BTreeSet;

use tbh_core::RngHandle;
use tbh_graph::order::connected_parts;
use tbh_graph::{random_tree, tree_from_prufer};

#[test]
fn decoding_a_known_sequence() {
    // the constant sequence [1, 1] encodes the star centered on vertex 2
    let tree = tree_from_prufer(&[1, 1], &[1u32, 2, 3, 4]).unwrap();
    assert_eq!(tree.edges(), BTreeSet::from([(1, 2), (2, 3), (2, 4)]));
}

#[test]
fn tiny_vertex_lists_decode_without_a_sequence() {
    let empty = tree_from_prufer(&[], &[] as &[u32]).unwrap();
    assert_eq!(empty.vertex_count(), 0);

    let single = tree_from_prufer(&[], &[7u32]).unwrap();
    assert_eq!(single.vertex_count(), 1);
    assert!(single.edges().is_empty());

    let pair = tree_from_prufer(&[], &[7u32, 9]).unwrap();
    assert_eq!(pair.edges(), BTreeSet::from([(7, 9)]));
}

#[test]
fn sequence_length_is_validated() {
    let err = tree_from_prufer(&[0], &[1u32, 2]).unwrap_err();
    assert_eq!(err.code(), "prufer-length");
}

#[test]
fn sequence_indices_are_validated() {
    let err = tree_from_prufer(&[5], &[1u32, 2, 3]).unwrap_err();
    assert_eq!(err.code(), "prufer-index");
}

#[test]
fn random_trees_are_spanning_trees() {
    let vertices: Vec<u32> = (0..20).collect();
    for seed in 0..10 {
        let mut rng = RngHandle::from_seed(seed);
        let tree = random_tree(&vertices, &mut rng).unwrap();
        assert_eq!(tree.vertex_count(), vertices.len());
        assert_eq!(tree.edge_count(), vertices.len() - 1);
        assert_eq!(connected_parts(&tree, None).len(), 1);
    }
}

#[test]
fn random_trees_are_reproducible_per_seed() {
    let vertices: Vec<u32> = (0..12).collect();
    let mut first = RngHandle::from_seed(42);
    let mut second = RngHandle::from_seed(42);
    assert_eq!(
        random_tree(&vertices, &mut first).unwrap(),
        random_tree(&vertices, &mut second).unwrap()
    );
}
