//! Tests for the reachability estimator.

use super::*;
use crate::graph::CsrDigraph;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn tiny_dg() -> CsrDigraph {
    CsrDigraph::from_edges(
        13,
        &[
            (0, 1),
            (0, 5),
            (2, 0),
            (2, 3),
            (3, 2),
            (3, 5),
            (4, 2),
            (4, 3),
            (5, 4),
            (6, 0),
            (6, 4),
            (6, 9),
            (7, 6),
            (7, 8),
            (8, 7),
            (8, 9),
            (9, 10),
            (9, 11),
            (10, 12),
            (11, 4),
            (11, 12),
            (12, 9),
        ],
    )
}

fn seeded(seed: u64) -> ReachabilityEstimator {
    ReachabilityEstimator::new(EstimatorConfig::default().with_seed(seed))
}

fn assert_close(estimate: f64, truth: f64) {
    let tolerance = (0.1 * truth).max(1.5);
    assert!(
        (estimate - truth).abs() <= tolerance,
        "estimate {estimate} too far from {truth}"
    );
}

#[test]
fn test_forward_estimates_tiny_dg() {
    let mut anf = seeded(42);
    anf.initialize(&tiny_dg()).unwrap();
    assert_eq!(anf.component_count(), Some(5));

    let truth = [6, 1, 6, 6, 6, 6, 11, 13, 13, 10, 10, 10, 10];
    for (node, &expected) in truth.iter().enumerate() {
        assert_close(anf.estimate(node).unwrap(), f64::from(expected));
    }
}

#[test]
fn test_members_of_a_component_share_an_estimate() {
    let mut anf = seeded(3);
    anf.initialize(&tiny_dg()).unwrap();

    let e0 = anf.estimate(0).unwrap();
    for node in [2, 3, 4, 5] {
        assert_eq!(anf.estimate(node).unwrap(), e0);
    }
    assert_eq!(anf.counter(9).unwrap(), anf.counter(12).unwrap());
}

#[test]
fn test_backward_estimates_tiny_dg() {
    let mut anf = ReachabilityEstimator::new(
        EstimatorConfig::default()
            .with_seed(42)
            .with_direction(Direction::Backward),
    );
    anf.initialize(&tiny_dg()).unwrap();

    assert_close(anf.estimate(1).unwrap(), 13.0);
    assert_close(anf.estimate(0).unwrap(), 12.0);
    assert_close(anf.estimate(6).unwrap(), 3.0);
    assert_close(anf.estimate(7).unwrap(), 2.0);
    assert_close(anf.estimate(9).unwrap(), 7.0);
}

#[test]
fn test_sink_estimates_at_least_one() {
    let mut anf = seeded(9);
    anf.initialize(&tiny_dg()).unwrap();
    let est = anf.estimate(1).unwrap();
    assert!(est >= 1.0, "sink estimated as {est}");
}

#[test]
fn test_union_bounds() {
    let mut anf = seeded(17);
    anf.initialize(&tiny_dg()).unwrap();

    for (a, b) in [(0, 6), (1, 9), (7, 0), (6, 9), (1, 1)] {
        let ea = anf.estimate(a).unwrap();
        let eb = anf.estimate(b).unwrap();
        let union = anf.estimate_union([a, b]).unwrap();
        assert!(union >= ea.max(eb), "union({a},{b}) = {union} below max");
        assert!(union <= ea + eb + 1e-9, "union({a},{b}) = {union} above sum");
    }

    // 0 and 1 are both reachable from 7, so the union equals 7's estimate.
    assert_eq!(
        anf.estimate_union([7, 0, 1]).unwrap(),
        anf.estimate(7).unwrap()
    );
}

#[test]
fn test_union_of_nothing_is_zero() {
    let mut anf = seeded(1);
    anf.initialize(&tiny_dg()).unwrap();
    assert_eq!(anf.estimate_union(std::iter::empty()).unwrap(), 0.0);
}

#[test]
fn test_estimate_all_matches_single_queries() {
    let mut anf = seeded(5);
    anf.initialize(&tiny_dg()).unwrap();

    let all = anf.estimate_all().unwrap();
    assert_eq!(all.len(), 13);
    for (&node, &estimate) in &all {
        assert_eq!(estimate, anf.estimate(node).unwrap());
    }
}

#[test]
fn test_seed_is_deterministic() {
    let graph = tiny_dg();
    let mut a = seeded(1234);
    let mut b = seeded(1234);
    a.initialize(&graph).unwrap();
    b.initialize(&graph).unwrap();
    for node in 0..13 {
        assert_eq!(a.counter(node).unwrap(), b.counter(node).unwrap());
    }
}

#[test]
fn test_initialize_with_external_rng() {
    let graph = tiny_dg();
    let mut anf = ReachabilityEstimator::default();
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    anf.initialize_with_rng(&graph, &mut rng).unwrap();
    assert_close(anf.estimate(7).unwrap(), 13.0);
}

#[test]
fn test_queries_before_initialize_fail() {
    let anf = ReachabilityEstimator::default();
    assert!(!anf.is_initialized());
    assert_eq!(anf.component_count(), None);
    assert!(matches!(anf.estimate(0), Err(Error::NotInitialized)));
    assert!(matches!(anf.estimate_union([0]), Err(Error::NotInitialized)));
    assert!(matches!(anf.estimate_all(), Err(Error::NotInitialized)));
}

#[test]
fn test_unknown_node_fails() {
    let mut anf = seeded(2);
    anf.initialize(&tiny_dg()).unwrap();
    assert!(matches!(anf.estimate(13), Err(Error::UnknownNode(13))));
    assert!(matches!(
        anf.estimate_union([0, 99]),
        Err(Error::UnknownNode(99))
    ));
}

#[test]
fn test_initialize_twice_fails_until_cleared() {
    let graph = tiny_dg();
    let mut anf = seeded(8);
    anf.initialize(&graph).unwrap();
    assert!(matches!(
        anf.initialize(&graph),
        Err(Error::AlreadyInitialized)
    ));

    anf.clear();
    assert!(!anf.is_initialized());
    assert!(matches!(anf.estimate(0), Err(Error::NotInitialized)));

    anf.initialize(&graph).unwrap();
    assert!(anf.is_initialized());
}

#[test]
fn test_invalid_precision_reported_at_initialize() {
    let mut anf = ReachabilityEstimator::new(EstimatorConfig::default().with_precision(20));
    assert!(matches!(
        anf.initialize(&tiny_dg()),
        Err(Error::InvalidPrecision(20))
    ));
    assert!(!anf.is_initialized());
}

#[test]
fn test_low_precision_still_bounded() {
    let mut anf =
        ReachabilityEstimator::new(EstimatorConfig::default().with_precision(4).with_seed(6));
    anf.initialize(&tiny_dg()).unwrap();
    for node in 0..13 {
        let est = anf.estimate(node).unwrap();
        assert!(est.is_finite() && est > 0.0);
    }
}

#[test]
fn test_empty_graph() {
    let mut anf = seeded(1);
    anf.initialize(&CsrDigraph::from_adjacency(&[])).unwrap();
    assert_eq!(anf.component_count(), Some(0));
    assert!(anf.estimate_all().unwrap().is_empty());
    assert!(matches!(anf.estimate(0), Err(Error::UnknownNode(0))));
}
