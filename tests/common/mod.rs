//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};

use hyperanf::{CsrDigraph, DirectedGraph, NodeId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The 13-node graph from Sedgewick's SCC examples.
pub fn tiny_dg() -> CsrDigraph {
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

/// A random DAG on `n` nodes: every edge goes from a lower to a higher id.
pub fn random_dag(n: usize, out_degree: usize, seed: u64) -> CsrDigraph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut edges = Vec::with_capacity(n * out_degree);
    for u in 0..n.saturating_sub(1) {
        for _ in 0..out_degree {
            edges.push((u, rng.gen_range(u + 1..n)));
        }
    }
    CsrDigraph::from_edges(n, &edges)
}

/// Exact reachable set (start included) by BFS over out-edges.
pub fn reachable<G: DirectedGraph>(graph: &G, start: NodeId) -> Vec<NodeId> {
    let mut seen = std::collections::HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(start);
    queue.push_back(start);
    while let Some(u) = queue.pop_front() {
        for &v in graph.out_neighbors(u) {
            if seen.insert(v) {
                queue.push_back(v);
            }
        }
    }
    let mut out: Vec<_> = seen.into_iter().collect();
    out.sort_unstable();
    out
}

/// Asserts an estimate is within 10% of `truth` (at least 2.5 absolute).
pub fn assert_close(estimate: f64, truth: usize) {
    let truth = truth as f64;
    let tolerance = (0.1 * truth).max(2.5);
    assert!(
        (estimate - truth).abs() <= tolerance,
        "estimate {estimate} too far from {truth}"
    );
}

/// A graph keyed by arbitrary (non-dense) ids.
#[derive(Debug, Default)]
pub struct SparseGraph {
    out: BTreeMap<NodeId, Vec<NodeId>>,
    inc: BTreeMap<NodeId, Vec<NodeId>>,
}

impl SparseGraph {
    pub fn from_edges(nodes: &[NodeId], edges: &[(NodeId, NodeId)]) -> Self {
        let mut graph = Self::default();
        for &v in nodes {
            graph.out.entry(v).or_default();
            graph.inc.entry(v).or_default();
        }
        for &(u, v) in edges {
            graph.out.entry(u).or_default().push(v);
            graph.inc.entry(v).or_default().push(u);
            graph.out.entry(v).or_default();
            graph.inc.entry(u).or_default();
        }
        graph
    }
}

impl DirectedGraph for SparseGraph {
    fn node_count(&self) -> usize {
        self.out.len()
    }

    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.out.keys().copied()
    }

    fn out_neighbors(&self, node: NodeId) -> &[NodeId] {
        self.out.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    fn in_neighbors(&self, node: NodeId) -> &[NodeId] {
        self.inc.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    fn contains_node(&self, node: NodeId) -> bool {
        self.out.contains_key(&node)
    }
}
