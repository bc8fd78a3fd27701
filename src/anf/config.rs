//! Estimator configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hll::{Precision, DEFAULT_PRECISION};

/// Which reachability set each node's counter stands for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Nodes reachable from the node along out-edges (descendants).
    #[default]
    Forward,
    /// Nodes that reach the node (ancestors).
    Backward,
}

/// Parameters for [`ReachabilityEstimator`](crate::ReachabilityEstimator).
///
/// Missing fields deserialize to their defaults:
///
/// ```
/// let config: hyperanf::EstimatorConfig = serde_json::from_str(r#"{ "seed": 7 }"#).unwrap();
/// assert_eq!(config.precision, 12);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// HLL precision `p`; each counter holds `2^p` registers.
    pub precision: u8,
    /// Seed for the deterministic generator; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Reachability direction.
    pub direction: Direction,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            seed: None,
            direction: Direction::Forward,
        }
    }
}

impl EstimatorConfig {
    /// Sets the precision.
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    /// Sets a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Validated precision.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPrecision`](crate::Error::InvalidPrecision) when out of range.
    pub fn precision(&self) -> Result<Precision> {
        Precision::new(self.precision)
    }
}
