//! Individual value generators for the fields of a metric record.
//!
//! This module provides the sampling logic behind each record field; the
//! [`RecordGenerator`](crate::RecordGenerator) composes them.

pub mod association;
pub mod numeric;
pub mod timestamp;
pub mod uuid;

use metrics_core::ValueRule;
use rand::Rng;

/// A value rule resolved for sampling.
///
/// `sampled_pool` rules are expanded into their candidates once, when the
/// generator is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Fresh uniform draw from `[min, max]`
    Range { min: i64, max: i64 },
    /// Uniform pick from a non-empty candidate list
    Pool(Vec<i64>),
}

impl ValueSource {
    /// Resolve a configured rule, precomputing pools where needed.
    pub fn resolve<R: Rng>(rule: &ValueRule, rng: &mut R) -> Self {
        match rule {
            ValueRule::IntRange { min, max } => ValueSource::Range {
                min: *min,
                max: *max,
            },
            ValueRule::Pool { values } => ValueSource::Pool(values.clone()),
            ValueRule::SampledPool { min, max, size } => {
                ValueSource::Pool(numeric::generate_sampled_pool(rng, *min, *max, *size))
            }
        }
    }

    /// Whether `value` is something this source can produce.
    pub fn contains(&self, value: i64) -> bool {
        match self {
            ValueSource::Range { min, max } => (*min..=*max).contains(&value),
            ValueSource::Pool(values) => values.contains(&value),
        }
    }
}

/// Generate a value from a resolved source.
pub fn generate_value<R: Rng>(source: &ValueSource, rng: &mut R) -> i64 {
    match source {
        ValueSource::Range { min, max } => numeric::generate_int_range(rng, *min, *max),
        ValueSource::Pool(values) => numeric::sample_pool(rng, values),
    }
}
