use std::collections::BTreeSet;

use tbh_core::cluster::LeafSet;
use tbh_core::{ClusterId, ClusterRegistry, LeafId};

fn leaves(raw: &[u64]) -> LeafSet {
    raw.iter().copied().map(LeafId::from_raw).collect()
}

#[test]
fn interning_is_idempotent() {
    let mut registry = ClusterRegistry::new();
    let a = registry.intern(leaves(&[1, 2]));
    let b = registry.intern(leaves(&[1, 2]));
    assert_eq!(a, b);
    assert_eq!(registry.len(), 1);
}

#[test]
fn singleton_interns_one_leaf() {
    let mut registry = ClusterRegistry::new();
    let id = registry.singleton(LeafId::from_raw(7));
    assert_eq!(registry.leaves(id).unwrap(), &leaves(&[7]));
}

#[test]
fn union_is_set_union() {
    let mut registry = ClusterRegistry::new();
    let a = registry.intern(leaves(&[1, 2]));
    let b = registry.intern(leaves(&[2, 3]));
    let ab = registry.union(a, b).unwrap();
    assert_eq!(registry.leaves(ab).unwrap(), &leaves(&[1, 2, 3]));

    // the union of an already interned set resolves to the existing id
    let again = registry.intern(leaves(&[1, 2, 3]));
    assert_eq!(ab, again);
}

#[test]
fn unknown_cluster_is_an_error() {
    let registry = ClusterRegistry::new();
    let err = registry.leaves(ClusterId::from_raw(99)).unwrap_err();
    assert_eq!(err.code(), "unknown-cluster");
}

#[test]
fn lookup_finds_interned_sets_only() {
    let mut registry = ClusterRegistry::new();
    let id = registry.intern(leaves(&[4]));
    assert_eq!(registry.lookup(&leaves(&[4])), Some(id));
    assert_eq!(registry.lookup(&leaves(&[5])), None);
}

#[test]
fn iteration_follows_creation_order() {
    let mut registry = ClusterRegistry::new();
    let first = registry.intern(leaves(&[3]));
    let second = registry.intern(leaves(&[1]));
    let order: Vec<ClusterId> = registry.iter().map(|(id, _)| id).collect();
    assert_eq!(order, vec![first, second]);

    let sets: BTreeSet<&LeafSet> = registry.iter().map(|(_, set)| set).collect();
    assert_eq!(sets.len(), 2);
}
