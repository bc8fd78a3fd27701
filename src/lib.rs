//! # `hyperanf` - Approximate Reachability for Directed Graphs
//!
//! Estimates, for every node of a directed graph, how many nodes are
//! reachable from it, in roughly \(O(n + m)\) time and one HyperLogLog
//! counter per strongly connected component rather than \(O(n^2)\) exact
//! traversals.
//!
//! ## Architecture
//!
//! 1. **Condensation** ([`SccCondenser`], [`Condensation`]):
//!    - Iterative Tarjan DFS, no recursion
//!    - Components come out in topological order as a side effect
//!    - The condensation DAG is deduplicated to one edge per component pair
//!
//! 2. **HyperLogLog registers** ([`HllCounter`], [`HllRegisters`]):
//!    - One byte per register, packed eight per `u64`
//!    - Branchless byte-wise max for merges
//!    - LogLog-Beta estimate with linear counting for small sets
//!
//! 3. **Propagation** ([`ReachabilityEstimator`]):
//!    - Seeds each component with one random value per member node
//!    - Merges counters along the DAG sinks-first
//!    - Answers single-node and set-union queries
//!
//! Any storage can be estimated by implementing [`DirectedGraph`];
//! [`CsrDigraph`] is provided for dense ids.
//!
//! ## Example
//!
//! ```rust
//! use hyperanf::{CsrDigraph, EstimatorConfig, ReachabilityEstimator};
//!
//! let graph = CsrDigraph::from_adjacency(&[vec![1, 2], vec![3], vec![3], vec![]]);
//!
//! let mut anf = ReachabilityEstimator::new(EstimatorConfig::default().with_seed(7));
//! anf.initialize(&graph)?;
//!
//! let all = anf.estimate(0)?;
//! assert!((all - 4.0).abs() < 0.5);
//!
//! let union = anf.estimate_union([1, 2])?;
//! assert!(union < anf.estimate(1)? + anf.estimate(2)?);
//! # Ok::<(), hyperanf::Error>(())
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod anf;
pub mod error;
pub mod graph;
pub mod hll;

pub use anf::{Direction, EstimatorConfig, ReachabilityEstimator};
pub use error::{Error, Result};
pub use graph::{Condensation, CsrDigraph, DirectedGraph, NodeId, Reversed, SccCondenser};
pub use hll::{HllCounter, HllRegisters, Precision};

// Compile-time layout checks for the register packing.
const _: () = {
    assert!(hll::Precision::DEFAULT.registers() % 8 == 0);
    assert!((1usize << hll::MIN_PRECISION) % 8 == 0);
    assert!(hll::MAX_PRECISION < 64 - 8);
};
