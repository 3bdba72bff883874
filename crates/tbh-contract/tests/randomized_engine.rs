use std::collections::BTreeSet;

use proptest::prelude::*;

use tbh_contract::{
    random_decomposition, BinaryMixedTree, ContractionEngine, ContractionStrategy,
    RandomizedStrategy,
};
use tbh_core::cluster::LeafSet;
use tbh_core::{ClusterId, ClusterRegistry, LeafId, RngHandle};
use tbh_graph::{canonical_hash, random_tree, Graph};

fn leaf_ids(count: u64) -> Vec<LeafId> {
    (0..count).map(LeafId::from_raw).collect()
}

fn leaves(raw: &[u64]) -> LeafSet {
    raw.iter().copied().map(LeafId::from_raw).collect()
}

fn singleton_tree(
    leaves: &[u64],
    undirected: &[(u64, u64)],
    directed: &[(u64, u64)],
) -> (BinaryMixedTree, ClusterRegistry, Vec<ClusterId>) {
    let mut registry = ClusterRegistry::new();
    let mut tree = BinaryMixedTree::new();
    let ids: Vec<ClusterId> = leaves
        .iter()
        .map(|leaf| registry.singleton(LeafId::from_raw(*leaf)))
        .collect();
    for id in &ids {
        tree.add_vertex(*id).unwrap();
    }
    let id_of = |leaf: u64| ids[leaves.iter().position(|l| *l == leaf).unwrap()];
    for (a, b) in undirected {
        tree.add_undirected(id_of(*a), id_of(*b)).unwrap();
    }
    for (a, b) in directed {
        tree.add_directed(id_of(*a), id_of(*b)).unwrap();
    }
    (tree, registry, ids)
}

/// The three-leaf scenario: undirected (0, 1), provenance 1 → 2. One step
/// must merge 0 and 1 and leave the pair {2}, {0, 1} joined by one
/// undirected edge, whatever the random choices are.
#[test]
fn three_leaf_step_is_forced() {
    for seed in 0..8 {
        let (tree, registry, _ids) = singleton_tree(&[0, 1, 2], &[(0, 1)], &[(1, 2)]);
        let mut engine =
            ContractionEngine::from_tree(tree, registry, RandomizedStrategy::from_seed(seed))
                .unwrap();
        let stage = engine.step().unwrap();

        let clusters: BTreeSet<LeafSet> = stage
            .tree
            .vertices()
            .map(|v| engine.registry().leaves(v).unwrap().clone())
            .collect();
        assert_eq!(clusters, BTreeSet::from([leaves(&[2]), leaves(&[0, 1])]));
        assert_eq!(stage.tree.undirected_edges().len(), 1);
        assert!(stage.tree.directed_edges().is_empty());

        let mapped: BTreeSet<LeafSet> = stage.map.values().cloned().collect();
        assert_eq!(
            mapped,
            BTreeSet::from([
                leaves(&[0]),
                leaves(&[1]),
                leaves(&[2]),
                leaves(&[0, 1]),
            ])
        );
    }
}

#[test]
fn two_leaf_tree_contracts_in_one_step() {
    let leaf_tree = Graph::from_parts(
        leaf_ids(2),
        [(LeafId::from_raw(0), LeafId::from_raw(1))],
    )
    .unwrap();
    let decomposition = random_decomposition(&leaf_tree, 11).unwrap();

    assert_eq!(decomposition.stages.len(), 2);
    let last = decomposition.final_stage();
    assert_eq!(last.tree.vertex_count(), 1);
    assert_eq!(last.map.len(), 3);

    let root = last.tree.vertices().next().unwrap();
    assert_eq!(
        decomposition.registry.leaves(root).unwrap(),
        &leaves(&[0, 1])
    );
}

#[test]
fn edge_choice_skips_pairs_with_unresolved_provenance() {
    // only (0, 1) is admissible: 2 is pointed into by 3
    for seed in 0..8 {
        let (tree, registry, ids) =
            singleton_tree(&[0, 1, 2, 3], &[(1, 2), (0, 1)], &[(3, 2)]);
        let mut strategy = RandomizedStrategy::from_seed(seed);
        let edge = strategy.choose_edge(&tree, &registry).unwrap();
        assert_eq!(edge, (ids[0], ids[1]));
    }
}

#[test]
fn consistency_violation_when_no_edge_is_admissible() {
    let (tree, registry, _ids) = singleton_tree(
        &[0, 1, 2, 3, 4],
        &[(0, 1), (1, 2)],
        &[(4, 0), (3, 2)],
    );
    let mut strategy = RandomizedStrategy::from_seed(0);
    let err = strategy.choose_edge(&tree, &registry).unwrap_err();
    assert_eq!(err.code(), "non-consistent-tree");
}

#[test]
fn edgeless_trees_are_not_consistent() {
    let (tree, registry, _ids) = singleton_tree(&[0], &[], &[]);
    let mut strategy = RandomizedStrategy::from_seed(0);
    let err = strategy.choose_edge(&tree, &registry).unwrap_err();
    assert_eq!(err.code(), "non-consistent-tree");
}

#[test]
fn same_seed_reproduces_the_run() {
    let universe = leaf_ids(9);
    let mut rng = RngHandle::from_seed(3);
    let leaf_tree = random_tree(&universe, &mut rng).unwrap();

    let first = random_decomposition(&leaf_tree, 17).unwrap();
    let second = random_decomposition(&leaf_tree, 17).unwrap();
    assert_eq!(first.stages.len(), second.stages.len());
    for (a, b) in first.stages.iter().zip(second.stages.iter()) {
        assert_eq!(a.tree, b.tree);
        assert_eq!(a.map, b.map);
    }
    assert_eq!(
        canonical_hash(first.final_stage().tree.as_mixed()).unwrap(),
        canonical_hash(second.final_stage().tree.as_mixed()).unwrap()
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Every stage of a randomized run stays a tree, maps stay consistent
    /// with the registry, and the run ends on the full leaf set.
    #[test]
    fn randomized_runs_preserve_the_invariants(
        seed in any::<u64>(),
        tree_seed in any::<u64>(),
        n in 2u64..10,
    ) {
        let universe = leaf_ids(n);
        let mut rng = RngHandle::from_seed(tree_seed);
        let leaf_tree = random_tree(&universe, &mut rng).unwrap();
        let decomposition = random_decomposition(&leaf_tree, seed).unwrap();

        let full: LeafSet = universe.iter().copied().collect();
        prop_assert_eq!(decomposition.stages[0].tree.vertex_count(), n as usize);

        for stage in &decomposition.stages {
            prop_assert!(stage.tree.underlying_is_tree());
            for vertex in stage.tree.vertices() {
                prop_assert_eq!(
                    stage.map.get(&vertex),
                    Some(decomposition.registry.leaves(vertex).unwrap())
                );
            }
        }

        let last = decomposition.final_stage();
        prop_assert_eq!(last.tree.vertex_count(), 1);
        let root = last.tree.vertices().next().unwrap();
        prop_assert_eq!(decomposition.registry.leaves(root).unwrap(), &full);
    }
}
