//! HyperANF-style reachability estimation.
//!
//! One HLL counter per strongly connected component instead of one per node:
//! 1. condense the graph and order components topologically
//! 2. seed each component's counter with one random value per member node
//! 3. walk components sinks-first, merging each counter into the counters of
//!    its DAG predecessors
//!
//! Reachability is transitive and the condensation is acyclic, so a
//! predecessor only ever merges counters that are already final. Afterwards
//! counter `c` approximates the set of nodes reachable from any node of `c`
//! (the node itself included).
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `initialize` | \(O(n + m + m_{dag} \cdot 2^p / 8)\) | Condensation plus word-wise merges |
//! | `estimate` | \(O(2^p)\) | One pass over a counter |
//! | `estimate_union` | \(O(k \cdot 2^p)\) | `k` distinct components merged into scratch |

pub mod config;

use std::collections::{HashMap, HashSet};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument, trace};

pub use config::{Direction, EstimatorConfig};

use crate::error::{Error, Result};
use crate::graph::{Condensation, DirectedGraph, NodeId, Reversed};
use crate::hll::{HllCounter, HllRegisters, Precision};

/// Counters and component maps of an initialized estimator.
#[derive(Debug)]
struct State {
    condensation: Condensation,
    registers: HllRegisters,
}

impl State {
    fn build<R: RngCore + ?Sized>(
        condensation: Condensation,
        precision: Precision,
        rng: &mut R,
    ) -> Result<Self> {
        let components = condensation.len();
        let mut registers = HllRegisters::with_counters(precision, components)?;
        debug!(
            counters = components,
            bytes = components * precision.registers(),
            "allocated registers"
        );

        // A component of k nodes receives k independent insertions.
        for c in 0..components {
            for _ in condensation.members(c) {
                registers.insert(c, rng.next_u64());
            }
        }

        // Sinks first: counter j is final before it reaches any predecessor.
        let dag = condensation.dag();
        for cj in (0..components).rev() {
            for &ci in dag.in_neighbors(cj) {
                trace!(from = cj, into = ci, "merge counter");
                registers.merge(ci, cj);
            }
        }

        Ok(Self {
            condensation,
            registers,
        })
    }

    fn component(&self, node: NodeId) -> Result<usize> {
        self.condensation
            .component_of(node)
            .ok_or(Error::UnknownNode(node))
    }

    #[cfg(not(feature = "parallel"))]
    fn component_estimates(&self) -> Vec<f64> {
        (0..self.registers.counter_count())
            .map(|c| self.registers.estimate(c))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn component_estimates(&self) -> Vec<f64> {
        use rayon::prelude::*;

        (0..self.registers.counter_count())
            .into_par_iter()
            .map(|c| self.registers.estimate(c))
            .collect()
    }
}

/// Approximate neighbourhood-size estimator for directed graphs.
///
/// Starts uninitialized. [`initialize`](Self::initialize) computes every
/// counter in one batch; queries never mutate state; [`clear`](Self::clear)
/// releases everything and returns to the uninitialized state.
///
/// ```
/// use hyperanf::{CsrDigraph, EstimatorConfig, ReachabilityEstimator};
///
/// // 0 -> 1 -> 2, and 2 -> 1 closes a cycle.
/// let graph = CsrDigraph::from_edges(3, &[(0, 1), (1, 2), (2, 1)]);
/// let mut anf = ReachabilityEstimator::new(EstimatorConfig::default().with_seed(1));
/// anf.initialize(&graph)?;
///
/// let from_zero = anf.estimate(0)?;
/// assert!((from_zero - 3.0).abs() < 0.5);
/// # Ok::<(), hyperanf::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct ReachabilityEstimator {
    config: EstimatorConfig,
    state: Option<State>,
}

impl ReachabilityEstimator {
    /// Creates an uninitialized estimator.
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// The configuration this estimator was built with.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Returns `true` between `initialize` and `clear`.
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Number of strongly connected components (one counter each), if initialized.
    pub fn component_count(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.condensation.len())
    }

    /// The condensation computed by the last `initialize`, if any.
    pub fn condensation(&self) -> Option<&Condensation> {
        self.state.as_ref().map(|s| &s.condensation)
    }

    /// Builds all counters for `graph`, drawing randomness as configured.
    ///
    /// With `seed` set the generator is a seeded `ChaCha8Rng`, so repeated
    /// runs produce identical estimates.
    ///
    /// # Errors
    /// - [`Error::AlreadyInitialized`] if counters already exist
    /// - [`Error::InvalidPrecision`] if the configured precision is out of range
    /// - [`Error::Allocation`] if the register block cannot be allocated
    pub fn initialize<G: DirectedGraph + ?Sized>(&mut self, graph: &G) -> Result<()> {
        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        self.initialize_with_rng(graph, &mut rng)
    }

    /// Builds all counters for `graph` using `rng` as the random-bit source.
    ///
    /// # Errors
    /// Same as [`initialize`](Self::initialize).
    #[instrument(skip_all, fields(nodes = graph.node_count(), precision = self.config.precision))]
    pub fn initialize_with_rng<G, R>(&mut self, graph: &G, rng: &mut R) -> Result<()>
    where
        G: DirectedGraph + ?Sized,
        R: RngCore + ?Sized,
    {
        if self.state.is_some() {
            return Err(Error::AlreadyInitialized);
        }
        let precision = self.config.precision()?;

        let condensation = match self.config.direction {
            Direction::Forward => Condensation::from_graph(graph),
            Direction::Backward => Condensation::from_graph(&Reversed(graph)),
        };
        let state = State::build(condensation, precision, rng)?;
        debug!(
            components = state.condensation.len(),
            direction = ?self.config.direction,
            "estimator initialized"
        );
        self.state = Some(state);
        Ok(())
    }

    fn state(&self) -> Result<&State> {
        self.state.as_ref().ok_or(Error::NotInitialized)
    }

    /// Estimated number of nodes reachable from `node`, itself included.
    ///
    /// # Errors
    /// - [`Error::NotInitialized`] before `initialize`
    /// - [`Error::UnknownNode`] if `node` was not in the graph
    pub fn estimate(&self, node: NodeId) -> Result<f64> {
        let state = self.state()?;
        let c = state.component(node)?;
        Ok(state.registers.estimate(c))
    }

    /// Estimated size of the union of the reachable sets of `nodes`.
    ///
    /// Counters are merged into a scratch counter, so overlapping reachable
    /// sets are not double counted. An empty input estimates `0.0`.
    ///
    /// # Errors
    /// Same as [`estimate`](Self::estimate), for the first offending node.
    pub fn estimate_union<I>(&self, nodes: I) -> Result<f64>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let state = self.state()?;
        let mut scratch = HllCounter::new(state.registers.precision());
        let mut merged = HashSet::new();
        for node in nodes {
            let c = state.component(node)?;
            if merged.insert(c) {
                state.registers.merge_into(&mut scratch, c);
            }
        }
        Ok(scratch.estimate())
    }

    /// A copy of the counter standing for `node`'s reachable set.
    ///
    /// # Errors
    /// Same as [`estimate`](Self::estimate).
    pub fn counter(&self, node: NodeId) -> Result<HllCounter> {
        let state = self.state()?;
        let c = state.component(node)?;
        Ok(state.registers.to_counter(c))
    }

    /// Estimates for every node, each component's counter evaluated once.
    ///
    /// With the `parallel` feature components are evaluated on the rayon pool.
    ///
    /// # Errors
    /// Returns [`Error::NotInitialized`] before `initialize`.
    pub fn estimate_all(&self) -> Result<HashMap<NodeId, f64>> {
        let state = self.state()?;
        let per_component = state.component_estimates();
        let condensation = &state.condensation;

        let mut out = HashMap::with_capacity(per_component.len());
        for (c, &estimate) in per_component.iter().enumerate() {
            for &node in condensation.members(c) {
                out.insert(node, estimate);
            }
        }
        Ok(out)
    }

    /// Releases all counters and component maps.
    pub fn clear(&mut self) {
        if self.state.take().is_some() {
            debug!("estimator cleared");
        }
    }
}

#[cfg(test)]
mod tests;
