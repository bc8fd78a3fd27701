//! A compact CSR (compressed sparse row) digraph with its CSC transpose.
//!
//! CSR stores out-edges in row-major order; the transpose stores in-edges in
//! column-major order. Keeping both makes `out_neighbors` and `in_neighbors`
//! plain slice borrows, which is what the condenser and the register merge
//! pass need.
//!
//! Memory layout:
//! - `offsets`: `Vec<usize>` of length `n + 1` (row offsets)
//! - `targets`: contiguous out-neighbor ids, row by row
//! - `in_offsets`: `Vec<usize>` of length `n + 1` (column offsets)
//! - `sources`: contiguous in-neighbor ids, column by column

use crate::graph::{DirectedGraph, NodeId};

/// A dense-id directed graph in CSR form with a cached transpose.
///
/// Nodes are `0..node_count()`. Parallel edges and self loops are kept as
/// given.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `from_adjacency` | \(O(n + m)\) | Builds CSR and CSC |
/// | `from_edges` | \(O(n + m)\) | Counting sort by source |
/// | `out_neighbors` | \(O(1)\) | Borrowed slice |
/// | `in_neighbors` | \(O(1)\) | Borrowed slice of the transpose |
/// | `has_edge` | \(O(\text{out-degree})\) | Linear scan of the row |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrDigraph {
    offsets: Vec<usize>,
    targets: Vec<NodeId>,
    in_offsets: Vec<usize>,
    sources: Vec<NodeId>,
}

impl CsrDigraph {
    /// Builds a graph from adjacency lists (`adjacency[u]` lists the targets of `u`).
    ///
    /// # Panics
    ///
    /// Panics if any edge references a node index out of bounds.
    pub fn from_adjacency(adjacency: &[Vec<NodeId>]) -> Self {
        let n = adjacency.len();

        let mut offsets = Vec::with_capacity(n + 1);
        offsets.push(0);
        let mut total_edges = 0usize;
        for nbrs in adjacency {
            total_edges += nbrs.len();
            offsets.push(total_edges);
        }

        let mut targets = Vec::with_capacity(total_edges);
        for (u, nbrs) in adjacency.iter().enumerate() {
            for &v in nbrs {
                assert!(v < n, "edge {u}->{v} is out of bounds for n={n}");
                targets.push(v);
            }
        }

        let (in_offsets, sources) = transpose(n, &offsets, &targets);
        Self {
            offsets,
            targets,
            in_offsets,
            sources,
        }
    }

    /// Builds a graph with `n` nodes from a list of `(source, target)` pairs.
    ///
    /// Row order follows the order edges appear in `edges`.
    ///
    /// # Panics
    ///
    /// Panics if any endpoint is `>= n`.
    pub fn from_edges(n: usize, edges: &[(NodeId, NodeId)]) -> Self {
        let mut degrees = vec![0usize; n];
        for &(u, v) in edges {
            assert!(u < n && v < n, "edge {u}->{v} is out of bounds for n={n}");
            degrees[u] += 1;
        }

        let mut offsets = Vec::with_capacity(n + 1);
        offsets.push(0);
        for &deg in &degrees {
            let last = offsets[offsets.len() - 1];
            offsets.push(last + deg);
        }

        let mut targets = vec![0; edges.len()];
        let mut write_pos = offsets[..n].to_vec();
        for &(u, v) in edges {
            targets[write_pos[u]] = v;
            write_pos[u] += 1;
        }

        let (in_offsets, sources) = transpose(n, &offsets, &targets);
        Self {
            offsets,
            targets,
            in_offsets,
            sources,
        }
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }

    /// Checks if an edge exists from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if `from` is out of bounds.
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.out_neighbors(from).contains(&to)
    }

    /// Iterates all edges as `(source, target)` in row order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        (0..self.node_count())
            .flat_map(move |u| self.out_neighbors(u).iter().map(move |&v| (u, v)))
    }
}

/// Builds the CSC arrays of a CSR graph (stable: sources appear in increasing order).
fn transpose(n: usize, offsets: &[usize], targets: &[NodeId]) -> (Vec<usize>, Vec<NodeId>) {
    let mut in_degrees = vec![0usize; n];
    for &v in targets {
        in_degrees[v] += 1;
    }

    let mut in_offsets = Vec::with_capacity(n + 1);
    in_offsets.push(0);
    for &deg in &in_degrees {
        let last = in_offsets[in_offsets.len() - 1];
        in_offsets.push(last + deg);
    }

    let mut sources = vec![0; targets.len()];
    let mut write_pos = in_offsets[..n].to_vec();
    for u in 0..n {
        for &v in &targets[offsets[u]..offsets[u + 1]] {
            sources[write_pos[v]] = u;
            write_pos[v] += 1;
        }
    }

    (in_offsets, sources)
}

impl DirectedGraph for CsrDigraph {
    fn node_count(&self) -> usize {
        // `offsets` is length `n + 1` by construction.
        self.offsets.len() - 1
    }

    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        0..self.node_count()
    }

    fn out_neighbors(&self, node: NodeId) -> &[NodeId] {
        assert!(node < self.node_count(), "node {node} out of bounds");
        &self.targets[self.offsets[node]..self.offsets[node + 1]]
    }

    fn in_neighbors(&self, node: NodeId) -> &[NodeId] {
        assert!(node < self.node_count(), "node {node} out of bounds");
        &self.sources[self.in_offsets[node]..self.in_offsets[node + 1]]
    }

    fn contains_node(&self, node: NodeId) -> bool {
        node < self.node_count()
    }
}
