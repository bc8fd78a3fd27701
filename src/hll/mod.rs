//! HyperLogLog counters over byte-packed registers.
//!
//! A counter is `m = 2^p` one-byte registers. Registers are stored in `u64`
//! words so merges run eight registers per operation with a branchless
//! byte-wise max; the byte view of the same storage comes from `zerocopy`.
//!
//! - `bytewise`: leading-zero count, rho, byte-wise max and dominance on words
//! - `estimate`: LogLog-Beta cardinality with linear counting for small sets
//! - `counter`: a single owned counter
//! - `registers`: a contiguous block of counters addressed by index

pub mod bytewise;
pub mod counter;
pub mod estimate;
pub mod registers;

pub use bytewise::{clz8, dominates, max_bytes, split_hash};
pub use counter::HllCounter;
pub use estimate::{alpha, beta, cardinality};
pub use registers::HllRegisters;

use crate::error::{Error, Result};

/// Smallest supported precision (`m = 8`, one word per counter).
pub const MIN_PRECISION: u8 = 3;
/// Largest supported precision (`m = 65536`).
pub const MAX_PRECISION: u8 = 16;
/// Precision used when none is configured.
pub const DEFAULT_PRECISION: u8 = 12;

/// Validated HLL precision `p`; a counter has `2^p` registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Precision(u8);

impl Precision {
    /// The default precision, `p = 12` (4096 registers).
    pub const DEFAULT: Self = Self(DEFAULT_PRECISION);

    /// Validates `p`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPrecision`] unless `MIN_PRECISION <= p <= MAX_PRECISION`.
    pub fn new(p: u8) -> Result<Self> {
        if (MIN_PRECISION..=MAX_PRECISION).contains(&p) {
            Ok(Self(p))
        } else {
            Err(Error::InvalidPrecision(p))
        }
    }

    /// The raw precision `p`.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Registers per counter, `m = 2^p`.
    #[inline]
    pub const fn registers(self) -> usize {
        1 << self.0
    }

    /// `u64` words per counter, `m / 8`.
    #[inline]
    pub const fn words(self) -> usize {
        self.registers() / 8
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Precision {
    type Error = Error;

    fn try_from(p: u8) -> Result<Self> {
        Self::new(p)
    }
}
