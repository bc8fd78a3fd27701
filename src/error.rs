//! Crate-wide error type.

use std::collections::TryReserveError;

use crate::graph::NodeId;

/// Errors reported by the estimator and its building blocks.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configured precision is outside the supported range.
    #[error("precision {0} is out of range (expected {min}..={max})", min = crate::hll::MIN_PRECISION, max = crate::hll::MAX_PRECISION)]
    InvalidPrecision(u8),
    /// A query was issued before `initialize` (or after `clear`).
    #[error("estimator is not initialized")]
    NotInitialized,
    /// `initialize` was called on an estimator that already holds counters.
    #[error("estimator is already initialized; call clear() first")]
    AlreadyInitialized,
    /// The node was not part of the graph the estimator was initialized with.
    #[error("node {0} was not observed during initialization")]
    UnknownNode(NodeId),
    /// The register block could not be allocated.
    #[error("failed to allocate HLL registers")]
    Allocation(#[from] TryReserveError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
