use rand::RngCore;

use tbh_core::errors::{ErrorInfo, TbhError};
use tbh_core::{derive_substream_seed, RngHandle};

#[test]
fn same_seed_yields_the_same_stream() {
    let mut first = RngHandle::from_seed(99);
    let mut second = RngHandle::from_seed(99);
    for _ in 0..32 {
        assert_eq!(first.next_u64(), second.next_u64());
    }
}

#[test]
fn different_seeds_diverge() {
    let mut first = RngHandle::from_seed(1);
    let mut second = RngHandle::from_seed(2);
    let draws_a: Vec<u64> = (0..8).map(|_| first.next_u64()).collect();
    let draws_b: Vec<u64> = (0..8).map(|_| second.next_u64()).collect();
    assert_ne!(draws_a, draws_b);
}

#[test]
fn substream_seeds_are_stable_and_distinct() {
    let mut seen = std::collections::BTreeSet::new();
    for substream in 0..64 {
        let seed = derive_substream_seed(0xDEAD_BEEF, substream);
        assert_eq!(seed, derive_substream_seed(0xDEAD_BEEF, substream));
        assert!(seen.insert(seed), "substream {substream} collided");
    }
}

#[test]
fn error_payloads_round_trip_through_json() {
    let error = TbhError::Tree(
        ErrorInfo::new("restriction-outside-tree", "subset is not contained in the vertex set")
            .with_context("vertex", "42")
            .with_hint("restrict to current vertices only"),
    );
    let json = serde_json::to_string(&error).unwrap();
    let restored: TbhError = serde_json::from_str(&json).unwrap();
    assert_eq!(error, restored);
    assert_eq!(restored.code(), "restriction-outside-tree");
}

#[test]
fn error_display_carries_code_and_context() {
    let error = TbhError::Graph(
        ErrorInfo::new("unknown-vertex", "not a vertex").with_context("vertex", "7"),
    );
    let rendered = error.to_string();
    assert!(rendered.contains("unknown-vertex"));
    assert!(rendered.contains("vertex=7"));
}
