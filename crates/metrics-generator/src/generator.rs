//! Main record generator for producing synthetic metric records.

use crate::generators::association::{generate_metadata, generate_single, pick};
use crate::generators::timestamp::{generate_timestamp, TimeSource};
use crate::generators::{generate_value, ValueSource};
use crate::pools::ReferencePools;
use chrono::NaiveDateTime;
use metrics_core::{
    AssociationMode, ConfigError, DatasetConfig, MetricRecord, MetricScope, ResourceAssociation,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Error type for generator construction.
///
/// Generating a record never fails once the generator exists.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Invalid dataset configuration
    #[error("Invalid dataset config: {0}")]
    Config(#[from] ConfigError),

    /// User pool has no identifiers
    #[error("User pool is empty")]
    EmptyUserPool,

    /// No pool supplied for a configured resource type
    #[error("No identifier pool for resource type: {0}")]
    MissingResourcePool(String),

    /// Pool supplied for a resource type has no identifiers
    #[error("Identifier pool for resource type '{0}' is empty")]
    EmptyResourcePool(String),
}

/// A metric type with its resolved value source.
#[derive(Debug, Clone)]
struct ResolvedMetric {
    name: String,
    source: ValueSource,
}

/// Generator of synthetic metric records.
///
/// All pools, the metric catalog and the value sources are fixed when the
/// generator is built; afterwards only the RNG state and the generated-record
/// counter change.
pub struct RecordGenerator {
    /// Dataset definition
    config: DatasetConfig,
    /// User and resource identifier pools, ordered like `config.resources`
    pools: ReferencePools,
    /// Metric types in configured order
    metrics: Vec<ResolvedMetric>,
    /// Per resource pool index, the indices into `metrics` it permits
    catalog: Vec<Vec<usize>>,
    /// Reference clock for timestamps
    time_source: TimeSource,
    /// Seeded from `config.seed`, or from OS entropy
    rng: StdRng,
    /// Number of records produced so far
    generated: u64,
}

impl RecordGenerator {
    /// Build a generator with freshly generated UUID pools.
    pub fn new(config: DatasetConfig) -> Result<Self, GeneratorError> {
        config.validate()?;
        let mut rng = seeded_rng(config.seed);
        let pools = ReferencePools::generate(&config, &mut rng);
        Ok(Self::build(config, pools, rng))
    }

    /// Build a generator over explicit pools.
    ///
    /// `pools` must contain a non-empty pool for every resource type in
    /// `config`; types the config does not mention are ignored.
    pub fn with_pools(
        config: DatasetConfig,
        pools: ReferencePools,
    ) -> Result<Self, GeneratorError> {
        config.validate()?;
        let pools = pools.aligned_with(&config)?;
        let rng = seeded_rng(config.seed);
        Ok(Self::build(config, pools, rng))
    }

    fn build(config: DatasetConfig, pools: ReferencePools, mut rng: StdRng) -> Self {
        let metrics: Vec<ResolvedMetric> = config
            .metrics
            .iter()
            .map(|metric| ResolvedMetric {
                name: metric.name.clone(),
                source: ValueSource::resolve(&metric.value, &mut rng),
            })
            .collect();

        // Validation guarantees every catalog name resolves
        let catalog = config
            .resources
            .iter()
            .map(|resource| {
                resource
                    .metrics
                    .iter()
                    .filter_map(|name| metrics.iter().position(|m| &m.name == name))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        debug!(
            "Record generator ready: {:?} mode, {} metric types, {} resource types",
            config.association,
            metrics.len(),
            catalog.len()
        );

        Self {
            config,
            pools,
            metrics,
            catalog,
            time_source: TimeSource::default(),
            rng,
            generated: 0,
        }
    }

    /// Stamp records relative to `time_source` instead of the system clock.
    pub fn with_time_source(mut self, time_source: TimeSource) -> Self {
        self.time_source = time_source;
        self
    }

    /// Stamp records relative to a fixed instant.
    pub fn with_fixed_now(self, now: NaiveDateTime) -> Self {
        self.with_time_source(TimeSource::Fixed(now))
    }

    /// Generate the next record.
    pub fn next_record(&mut self) -> MetricRecord {
        let rng = &mut self.rng;

        let user_id = pick(rng, self.pools.users()).clone();
        let timestamp = generate_timestamp(rng, self.time_source.now(), &self.config.timestamp);

        let (resources, metric_idx) = match self.config.association {
            AssociationMode::SingleResource => {
                let (pool_idx, resource) = generate_single(rng, &self.pools);
                let metric_idx = *pick(rng, &self.catalog[pool_idx]);
                (ResourceAssociation::Single(resource), metric_idx)
            }
            AssociationMode::MultiMetadata => {
                let tagged = generate_metadata(rng, &self.pools);
                let metric_idx = match self.config.metric_scope {
                    MetricScope::Unscoped => rng.gen_range(0..self.metrics.len()),
                    MetricScope::Scoped => {
                        let mut candidates: Vec<usize> = Vec::new();
                        for (pool_idx, _) in &tagged {
                            for &idx in &self.catalog[*pool_idx] {
                                if !candidates.contains(&idx) {
                                    candidates.push(idx);
                                }
                            }
                        }
                        *pick(rng, &candidates)
                    }
                };
                let metadata = tagged.into_iter().map(|(_, r)| r).collect();
                (ResourceAssociation::Metadata { metadata }, metric_idx)
            }
        };

        let metric = &self.metrics[metric_idx];
        let value = generate_value(&metric.source, rng);

        self.generated += 1;

        MetricRecord {
            metric_type: metric.name.clone(),
            user_id,
            timestamp,
            resources,
            value,
        }
    }

    /// Lazily generate `count` records.
    pub fn records(&mut self, count: u64) -> RecordIterator<'_> {
        RecordIterator {
            generator: self,
            remaining: count,
        }
    }

    /// Number of records generated so far.
    pub fn generated(&self) -> u64 {
        self.generated
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    pub fn pools(&self) -> &ReferencePools {
        &self.pools
    }

    /// Value source resolved for a metric type.
    pub fn value_source(&self, metric_type: &str) -> Option<&ValueSource> {
        self.metrics
            .iter()
            .find(|m| m.name == metric_type)
            .map(|m| &m.source)
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Iterator that lazily generates records.
pub struct RecordIterator<'a> {
    generator: &'a mut RecordGenerator,
    remaining: u64,
}

impl Iterator for RecordIterator<'_> {
    type Item = MetricRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(self.generator.next_record())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RecordIterator<'_> {}
