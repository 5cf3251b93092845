//! Numeric value generators.

use rand::Rng;

/// Generate a random integer in the given range (inclusive).
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> i64 {
    rng.gen_range(min..=max)
}

/// Precompute `size` candidate values drawn from `[min, max]`.
pub fn generate_sampled_pool<R: Rng>(rng: &mut R, min: i64, max: i64, size: usize) -> Vec<i64> {
    (0..size).map(|_| generate_int_range(rng, min, max)).collect()
}

/// Pick one candidate uniformly. `pool` must be non-empty.
pub fn sample_pool<R: Rng>(rng: &mut R, pool: &[i64]) -> i64 {
    pool[rng.gen_range(0..pool.len())]
}
