//! A contiguous block of HLL counters.
//!
//! Counter `i` occupies words `i * m/8 .. (i + 1) * m/8`, i.e. bytes starting
//! at `i * m`. One allocation backs every counter of an estimator.

use core::ops::Range;

use zerocopy::AsBytes;

use super::bytewise::merge_words;
use super::counter::{insert_into, HllCounter};
use super::{cardinality, Precision};
use crate::error::Result;

/// `k` HLL counters of one precision in a single zero-initialized block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HllRegisters {
    precision: Precision,
    counters: usize,
    words: Vec<u64>,
}

impl HllRegisters {
    /// Allocates `counters` empty counters.
    ///
    /// # Errors
    /// Returns [`Error::Allocation`](crate::Error::Allocation) if the block
    /// cannot be reserved.
    pub fn with_counters(precision: Precision, counters: usize) -> Result<Self> {
        let len = counters.saturating_mul(precision.words());
        let mut words = Vec::new();
        words.try_reserve_exact(len)?;
        words.resize(len, 0);
        Ok(Self {
            precision,
            counters,
            words,
        })
    }

    /// Precision shared by every counter.
    #[inline]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Number of counters in the block.
    #[inline]
    pub fn counter_count(&self) -> usize {
        self.counters
    }

    /// Byte offset of `counter` within the block.
    #[inline]
    pub fn byte_offset(&self, counter: usize) -> usize {
        counter * self.precision.registers()
    }

    #[inline]
    fn span(&self, counter: usize) -> Range<usize> {
        assert!(
            counter < self.counters,
            "counter {counter} out of bounds for {} counters",
            self.counters
        );
        let w = self.precision.words();
        counter * w..(counter + 1) * w
    }

    /// Words of `counter`.
    ///
    /// # Panics
    ///
    /// Panics if `counter` is out of bounds.
    #[inline]
    pub fn words(&self, counter: usize) -> &[u64] {
        &self.words[self.span(counter)]
    }

    /// Registers of `counter`, one byte each.
    ///
    /// # Panics
    ///
    /// Panics if `counter` is out of bounds.
    #[inline]
    pub fn registers(&self, counter: usize) -> &[u8] {
        self.words(counter).as_bytes()
    }

    /// Records one random value in `counter`.
    ///
    /// # Panics
    ///
    /// Panics if `counter` is out of bounds.
    #[inline]
    pub fn insert(&mut self, counter: usize, x: u64) {
        let span = self.span(counter);
        insert_into(&mut self.words[span], self.precision, x);
    }

    /// Merges counter `src` into counter `dst`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn merge(&mut self, dst: usize, src: usize) {
        let dst_span = self.span(dst);
        let src_span = self.span(src);
        if dst == src {
            return;
        }
        if dst < src {
            let (lo, hi) = self.words.split_at_mut(src_span.start);
            merge_words(&mut lo[dst_span], &hi[..src_span.len()]);
        } else {
            let (lo, hi) = self.words.split_at_mut(dst_span.start);
            merge_words(&mut hi[..dst_span.len()], &lo[src_span]);
        }
    }

    /// Merges counter `src` into a standalone counter of the same precision.
    ///
    /// # Panics
    ///
    /// Panics if `src` is out of bounds or the precisions differ.
    pub fn merge_into(&self, target: &mut HllCounter, src: usize) {
        assert_eq!(target.precision(), self.precision, "precision mismatch");
        target.merge_words(self.words(src));
    }

    /// Copies `counter` out as a standalone [`HllCounter`].
    pub fn to_counter(&self, counter: usize) -> HllCounter {
        let mut out = HllCounter::new(self.precision);
        self.merge_into(&mut out, counter);
        out
    }

    /// Estimated cardinality of `counter`.
    ///
    /// # Panics
    ///
    /// Panics if `counter` is out of bounds.
    pub fn estimate(&self, counter: usize) -> f64 {
        cardinality(self.registers(counter))
    }
}
