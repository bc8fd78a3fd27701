//! Word-level register primitives.
//!
//! All functions treat a `u64` as eight independent unsigned bytes. None of
//! them branch on register contents.

use super::Precision;

/// Leading zeros of a nibble, indexed by the nibble value.
pub const CLZ_TABLE_4BIT: [u8; 16] = [4, 3, 2, 2, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0];
/// The low bit of every byte.
pub const L8: u64 = 0x0101_0101_0101_0101;
/// The high bit of every byte.
pub const H8: u64 = 0x8080_8080_8080_8080;

/// Counts leading zeros within the top 8 bits of `x` (result in `0..=8`).
#[inline]
pub fn clz8(x: u64) -> u8 {
    if x & 0xFF00_0000_0000_0000 == 0 {
        return 8;
    }
    let (n, x) = if x & 0xF000_0000_0000_0000 == 0 {
        (4, x << 4)
    } else {
        (0, x)
    };
    n + CLZ_TABLE_4BIT[(x >> 60) as usize]
}

/// Splits a random value into `(register index, rho)`.
///
/// The top `p` bits select the register; rho is one plus the leading-zero
/// run of the remaining bits, counted to 8-bit granularity (so `1..=9`).
#[inline]
pub fn split_hash(x: u64, precision: Precision) -> (usize, u8) {
    let p = u32::from(precision.get());
    let index = (x >> (64 - p)) as usize;
    let rho = clz8(x << p) + 1;
    (index, rho)
}

/// Selection mask with `0xFF` in every byte where `x >= y` and `0x00` elsewhere.
#[inline]
fn ge_mask(x: u64, y: u64) -> u64 {
    let z = ((((x | H8).wrapping_sub(y & !H8)) | (x ^ y)) ^ (x | !y)) & H8;
    ((((z >> 7) | H8).wrapping_sub(L8)) | H8) ^ z
}

/// Byte-wise unsigned maximum of two words.
#[inline]
pub fn max_bytes(x: u64, y: u64) -> u64 {
    let m = ge_mask(x, y);
    (x & m) | (y & !m)
}

/// Returns `true` if every byte of `x` is `>=` the matching byte of `y`.
#[inline]
pub fn dominates(x: u64, y: u64) -> bool {
    ge_mask(x, y) == u64::MAX
}

/// `dst[i] = max_bytes(dst[i], src[i])` over two equal-length word blocks.
///
/// # Panics
///
/// Panics if the blocks differ in length.
#[inline]
pub fn merge_words(dst: &mut [u64], src: &[u64]) {
    assert_eq!(dst.len(), src.len(), "register blocks differ in length");
    for (x, &y) in dst.iter_mut().zip(src) {
        *x = max_bytes(*x, y);
    }
}

/// Returns `true` if every register of `a` is `>=` the matching register of `b`.
///
/// # Panics
///
/// Panics if the blocks differ in length.
pub fn dominates_words(a: &[u64], b: &[u64]) -> bool {
    assert_eq!(a.len(), b.len(), "register blocks differ in length");
    a.iter().zip(b).all(|(&x, &y)| dominates(x, y))
}
