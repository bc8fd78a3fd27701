//! Directed graph adapters consumed by the estimator.
//!
//! The estimator never owns a graph; it borrows anything implementing
//! [`DirectedGraph`]. Two storage-agnostic pieces live here:
//! - `csr_graph`: a compact CSR/CSC graph, also used for condensation DAGs
//! - `scc`: Tarjan condensation into a topologically ordered DAG

pub mod csr_graph;
pub mod scc;

pub use csr_graph::CsrDigraph;
pub use scc::{Condensation, SccCondenser};

/// Node identifier. Ids need not be dense.
pub type NodeId = usize;

/// A directed graph exposing borrowed neighbor slices in both directions.
///
/// Implementations must return the same node set from `nodes` for the
/// lifetime of a borrow, and every id yielded by a neighbor slice must be a
/// node of the graph.
pub trait DirectedGraph {
    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Iterates all node ids in a stable order.
    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_;

    /// Targets of edges leaving `node`.
    fn out_neighbors(&self, node: NodeId) -> &[NodeId];

    /// Sources of edges entering `node`.
    fn in_neighbors(&self, node: NodeId) -> &[NodeId];

    /// Returns `true` if `node` belongs to the graph.
    fn contains_node(&self, node: NodeId) -> bool;

    /// Out-degree of `node`.
    fn out_degree(&self, node: NodeId) -> usize {
        self.out_neighbors(node).len()
    }

    /// In-degree of `node`.
    fn in_degree(&self, node: NodeId) -> usize {
        self.in_neighbors(node).len()
    }
}

impl<G: DirectedGraph + ?Sized> DirectedGraph for &G {
    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (**self).nodes()
    }

    fn out_neighbors(&self, node: NodeId) -> &[NodeId] {
        (**self).out_neighbors(node)
    }

    fn in_neighbors(&self, node: NodeId) -> &[NodeId] {
        (**self).in_neighbors(node)
    }

    fn contains_node(&self, node: NodeId) -> bool {
        (**self).contains_node(node)
    }
}

/// A view of `G` with every edge reversed.
///
/// Out-reachability on the view is in-reachability (ancestors) on `G`.
#[derive(Debug, Clone, Copy)]
pub struct Reversed<'g, G: ?Sized>(pub &'g G);

impl<'g, G: DirectedGraph + ?Sized> DirectedGraph for Reversed<'g, G> {
    fn node_count(&self) -> usize {
        self.0.node_count()
    }

    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.nodes()
    }

    fn out_neighbors(&self, node: NodeId) -> &[NodeId] {
        self.0.in_neighbors(node)
    }

    fn in_neighbors(&self, node: NodeId) -> &[NodeId] {
        self.0.out_neighbors(node)
    }

    fn contains_node(&self, node: NodeId) -> bool {
        self.0.contains_node(node)
    }
}
