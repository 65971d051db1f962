//! Random sampling and numeric helpers shared by the market simulation.

use rand::Rng;

/// Uniform integer in `[min, max]`, both ends included.
///
/// Returns `min` when the range is empty or inverted.
pub fn rand_num<R: Rng>(rng: &mut R, min: u64, max: u64) -> u64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Uniform index in `[0, len)`. `len` must be non-zero.
pub fn random_index<R: Rng>(rng: &mut R, len: u64) -> u64 {
    rng.gen_range(0..len)
}

/// Linearly maps `number` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// A degenerate input range maps everything to `out_min`.
pub fn scale(number: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    (number - in_min) * (out_max - out_min) / span + out_min
}

/// Greatest common divisor of two integers. `gcd(0, 0) == 0`.
pub fn gcd(a: u32, b: u32) -> u32 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Greatest common divisor of every value in the slice, 0 if all are zero.
pub fn gcd_all(values: &[u32]) -> u32 {
    values.iter().fold(0, |acc, &v| gcd(acc, v))
}
