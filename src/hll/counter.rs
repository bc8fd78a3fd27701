//! A single owned HLL counter.

use zerocopy::AsBytes;

use super::bytewise::{dominates_words, merge_words, split_hash};
use super::{cardinality, Precision};

/// One HyperLogLog counter of `2^p` byte registers.
///
/// Merging is a byte-wise max, so it is commutative, associative and
/// idempotent; a merged counter represents the union of both inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HllCounter {
    precision: Precision,
    words: Vec<u64>,
}

impl HllCounter {
    /// Creates an empty counter.
    pub fn new(precision: Precision) -> Self {
        Self {
            precision,
            words: vec![0; precision.words()],
        }
    }

    /// The counter's precision.
    #[inline]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Records one uniformly random 64-bit value.
    #[inline]
    pub fn insert(&mut self, x: u64) {
        insert_into(&mut self.words, self.precision, x);
    }

    /// Merges `other` into `self` (register-wise max).
    ///
    /// # Panics
    ///
    /// Panics if the precisions differ.
    pub fn merge(&mut self, other: &HllCounter) {
        assert_eq!(self.precision, other.precision, "precision mismatch");
        merge_words(&mut self.words, &other.words);
    }

    /// Merges a raw word block of the same precision into `self`.
    pub(crate) fn merge_words(&mut self, words: &[u64]) {
        merge_words(&mut self.words, words);
    }

    /// Returns `true` if every register of `self` is `>=` the matching register of `other`.
    ///
    /// # Panics
    ///
    /// Panics if the precisions differ.
    pub fn dominates(&self, other: &HllCounter) -> bool {
        assert_eq!(self.precision, other.precision, "precision mismatch");
        dominates_words(&self.words, &other.words)
    }

    /// The registers, one byte each.
    #[inline]
    pub fn registers(&self) -> &[u8] {
        self.words.as_slice().as_bytes()
    }

    /// The registers packed eight per word.
    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Estimated number of distinct insertions.
    pub fn estimate(&self) -> f64 {
        cardinality(self.registers())
    }

    /// Returns `true` if nothing has been inserted or merged.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Resets every register to zero.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }
}

/// Stores `max(register, rho)` at the register `x` selects.
#[inline]
pub(crate) fn insert_into(words: &mut [u64], precision: Precision, x: u64) {
    let (index, rho) = split_hash(x, precision);
    let reg = &mut words.as_bytes_mut()[index];
    *reg = (*reg).max(rho);
}
