//! Cardinality estimation from a register block.
//!
//! LogLog-Beta: the harmonic register sum is corrected by a 7th-degree
//! polynomial in `ln(ez + 1)`, where `ez` is the number of empty registers.
//! Small estimates fall back to linear counting.

/// Raw HLL estimates below this value are replaced by linear counting.
pub const LINEAR_COUNTING_THRESHOLD: f64 = 10_000.0;

/// Bias-correction constant for `m` registers.
pub fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / m as f64),
    }
}

/// Polynomial bias correction for `ez` empty registers.
pub fn beta(ez: f64) -> f64 {
    let zl = (ez + 1.0).ln();
    -0.373_318_766_437_530_59 * ez
        + -1.417_040_774_481_229_89 * zl
        + 0.407_291_847_966_125_33 * zl.powi(2)
        + 1.561_520_339_065_841_64 * zl.powi(3)
        + -0.992_422_335_342_861_28 * zl.powi(4)
        + 0.260_646_813_994_830_92 * zl.powi(5)
        + -0.030_538_113_696_828_07 * zl.powi(6)
        + 0.001_557_702_101_791_05 * zl.powi(7)
}

/// Estimates the number of distinct insertions represented by `registers`.
///
/// Uses linear counting `m * ln(m / ez)` while the HLL estimate is below
/// [`LINEAR_COUNTING_THRESHOLD`] and some register is still empty. With no
/// empty register the HLL estimate is returned whatever its size.
pub fn cardinality(registers: &[u8]) -> f64 {
    if registers.is_empty() {
        return 0.0;
    }

    let mut sum = 0.0f64;
    let mut zeros = 0usize;
    for &r in registers {
        sum += (-f64::from(r)).exp2();
        if r == 0 {
            zeros += 1;
        }
    }

    let m = registers.len() as f64;
    let ez = zeros as f64;
    let est_hll = alpha(registers.len()) * m * (m - ez) / (sum + beta(ez)) + 0.5;

    if est_hll < LINEAR_COUNTING_THRESHOLD && zeros != 0 {
        m * (m / ez).ln()
    } else {
        est_hll
    }
}
