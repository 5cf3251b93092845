//! Dataset configuration for the metrics generator.
//!
//! A [`DatasetConfig`] fully describes one synthetic dataset: how many users
//! exist, which resource types records can be tagged with (and how many
//! identifiers each type has), which metric types are allowed per resource
//! type, and how each metric's value is produced.
//!
//! ## Layout
//!
//! ```yaml
//! seed: 42
//! users: 50
//! association: multi_metadata
//! metric_scope: scoped
//! timestamp:
//!   max_days: 365
//!   max_extra_millis: 100000000
//! resources:
//!   - name: segment
//!     count: 20
//!     metrics: [time, jump_height, jump_length]
//! metrics:
//!   - name: time
//!     value:
//!       type: int_range
//!       min: 1000
//!       max: 9999999
//! ```
//!
//! Configurations are validated eagerly: [`DatasetConfig::from_yaml`] and
//! [`DatasetConfig::from_file`] both reject anything the generator could not
//! sample from, so record generation itself never fails.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Upper bound for `timestamp.max_days` (about a century).
pub const MAX_TIMESTAMP_DAYS: u32 = 36_500;

/// Upper bound for `timestamp.max_extra_millis` (the same span in milliseconds).
pub const MAX_TIMESTAMP_EXTRA_MILLIS: u64 = MAX_TIMESTAMP_DAYS as u64 * 86_400_000;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// User pool would be empty
    #[error("User pool size must be greater than zero")]
    EmptyUserPool,

    /// No resource types configured
    #[error("At least one resource type must be configured")]
    NoResourceTypes,

    /// Resource pool would be empty
    #[error("Resource pool '{0}' must contain at least one identifier")]
    EmptyResourcePool(String),

    /// Resource type declared twice
    #[error("Duplicate resource type: {0}")]
    DuplicateResourceType(String),

    /// Metric type declared twice
    #[error("Duplicate metric type: {0}")]
    DuplicateMetricType(String),

    /// Catalog entry has no metric types
    #[error("Resource type '{0}' has no permissible metric types")]
    EmptyCatalogEntry(String),

    /// Catalog entry references a metric with no value rule
    #[error("Resource type '{resource}' references undefined metric '{metric}'")]
    UnknownMetric { resource: String, metric: String },

    /// Value range with min > max
    #[error("Metric '{metric}' has an invalid range [{min}, {max}]")]
    InvalidRange { metric: String, min: i64, max: i64 },

    /// Value pool with nothing to sample
    #[error("Metric '{0}' has an empty value pool")]
    EmptyValuePool(String),

    /// Timestamp window exceeds the supported span
    #[error("timestamp.max_days must be at most {MAX_TIMESTAMP_DAYS}, got {0}")]
    TimestampWindowTooLarge(u32),

    /// Extra-millisecond component exceeds the supported span
    #[error("timestamp.max_extra_millis must be at most {MAX_TIMESTAMP_EXTRA_MILLIS}, got {0}")]
    TimestampExtraMillisTooLarge(u64),
}

// ============================================================================
// Modes
// ============================================================================

/// How records are associated with resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationMode {
    /// A `metadata` list of 1..K distinct resource types per record.
    #[default]
    MultiMetadata,
    /// A single `resource_type` / `resource_id` pair per record.
    SingleResource,
}

/// Metric selection policy for [`AssociationMode::MultiMetadata`].
///
/// Single-resource records are always scoped to their resource type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricScope {
    /// Pick from the catalog entries of the record's associated resource types.
    #[default]
    Scoped,
    /// Pick from every configured metric type, ignoring the associations.
    Unscoped,
}

// ============================================================================
// Definitions
// ============================================================================

/// Rule producing the value of a metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueRule {
    /// Uniform integer in `[min, max]`, drawn fresh for every record
    IntRange {
        /// Minimum value (inclusive)
        min: i64,
        /// Maximum value (inclusive)
        max: i64,
    },

    /// Uniform sample from a fixed list of candidates
    Pool {
        /// Candidate values
        values: Vec<i64>,
    },

    /// Uniform sample from `size` candidates drawn from `[min, max]` once,
    /// when the generator is built
    SampledPool {
        /// Minimum value (inclusive)
        min: i64,
        /// Maximum value (inclusive)
        max: i64,
        /// Number of candidates to precompute
        size: usize,
    },
}

impl ValueRule {
    /// Closed bounds every produced value falls within.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        match self {
            ValueRule::IntRange { min, max } | ValueRule::SampledPool { min, max, .. } => {
                Some((*min, *max))
            }
            ValueRule::Pool { values } => {
                let min = values.iter().min()?;
                let max = values.iter().max()?;
                Some((*min, *max))
            }
        }
    }

    fn validate(&self, metric: &str) -> Result<(), ConfigError> {
        match self {
            ValueRule::IntRange { min, max } => check_range(metric, *min, *max),
            ValueRule::Pool { values } => {
                if values.is_empty() {
                    return Err(ConfigError::EmptyValuePool(metric.to_string()));
                }
                Ok(())
            }
            ValueRule::SampledPool { min, max, size } => {
                check_range(metric, *min, *max)?;
                if *size == 0 {
                    return Err(ConfigError::EmptyValuePool(metric.to_string()));
                }
                Ok(())
            }
        }
    }
}

fn check_range(metric: &str, min: i64, max: i64) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::InvalidRange {
            metric: metric.to_string(),
            min,
            max,
        });
    }
    Ok(())
}

/// A metric type and its value rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDefinition {
    /// Metric type name (e.g. `time`)
    pub name: String,

    /// How values for this metric are produced
    pub value: ValueRule,
}

impl MetricDefinition {
    pub fn new(name: impl Into<String>, value: ValueRule) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A resource type, its identifier pool size and its catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// Resource type name (e.g. `segment`)
    pub name: String,

    /// Number of identifiers in this resource type's pool
    pub count: usize,

    /// Metric types permitted for this resource type
    pub metrics: Vec<String>,
}

impl ResourceDefinition {
    pub fn new(name: impl Into<String>, count: usize, metrics: &[&str]) -> Self {
        Self {
            name: name.into(),
            count,
            metrics: metrics.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Random offset subtracted from "now" to produce record timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampWindow {
    /// Whole-day component, drawn from `[0, max_days]`
    #[serde(default = "default_max_days")]
    pub max_days: u32,

    /// Millisecond component, drawn from `[0, max_extra_millis]`
    #[serde(default = "default_max_extra_millis")]
    pub max_extra_millis: u64,
}

fn default_max_days() -> u32 {
    365
}

fn default_max_extra_millis() -> u64 {
    100_000_000
}

fn default_users() -> usize {
    50
}

impl Default for TimestampWindow {
    fn default() -> Self {
        Self {
            max_days: default_max_days(),
            max_extra_millis: default_max_extra_millis(),
        }
    }
}

impl TimestampWindow {
    /// Largest offset the window can produce.
    pub fn max_offset(&self) -> TimeDelta {
        TimeDelta::days(i64::from(self.max_days.min(MAX_TIMESTAMP_DAYS)))
            + Self::extra_millis(self.max_extra_millis)
    }

    /// Millisecond offset, clamped to [`MAX_TIMESTAMP_EXTRA_MILLIS`].
    pub fn extra_millis(millis: u64) -> TimeDelta {
        // Clamped value fits in i64
        TimeDelta::milliseconds(millis.min(MAX_TIMESTAMP_EXTRA_MILLIS) as i64)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_days > MAX_TIMESTAMP_DAYS {
            return Err(ConfigError::TimestampWindowTooLarge(self.max_days));
        }
        if self.max_extra_millis > MAX_TIMESTAMP_EXTRA_MILLIS {
            return Err(ConfigError::TimestampExtraMillisTooLarge(self.max_extra_millis));
        }
        Ok(())
    }
}

// ============================================================================
// Dataset
// ============================================================================

/// Full dataset definition consumed by the record generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Seed for reproducible output (random when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Number of user identifiers
    #[serde(default = "default_users")]
    pub users: usize,

    /// Record shape
    #[serde(default)]
    pub association: AssociationMode,

    /// Metric selection policy for multi-metadata records
    #[serde(default)]
    pub metric_scope: MetricScope,

    /// Timestamp offset window
    #[serde(default)]
    pub timestamp: TimestampWindow,

    /// Resource types, in selection order
    pub resources: Vec<ResourceDefinition>,

    /// Metric types, in selection order
    pub metrics: Vec<MetricDefinition>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            seed: None,
            users: default_users(),
            association: AssociationMode::default(),
            metric_scope: MetricScope::default(),
            timestamp: TimestampWindow::default(),
            resources: vec![
                ResourceDefinition::new("segment", 20, &["time", "jump_height", "jump_length"]),
                ResourceDefinition::new("recording", 200, &["time"]),
                ResourceDefinition::new("activity", 100, &["time"]),
            ],
            metrics: vec![
                // Seconds
                MetricDefinition::new(
                    "time",
                    ValueRule::IntRange {
                        min: 1000,
                        max: 9_999_999,
                    },
                ),
                // Centimetres
                MetricDefinition::new("jump_height", ValueRule::IntRange { min: 50, max: 500 }),
                MetricDefinition::new("jump_length", ValueRule::IntRange { min: 50, max: 1000 }),
            ],
        }
    }
}

impl DatasetConfig {
    /// Load and validate a config from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: DatasetConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_association(mut self, association: AssociationMode) -> Self {
        self.association = association;
        self
    }

    pub fn with_metric_scope(mut self, metric_scope: MetricScope) -> Self {
        self.metric_scope = metric_scope;
        self
    }

    /// Check that every pool and catalog entry can be sampled from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.users == 0 {
            return Err(ConfigError::EmptyUserPool);
        }
        if self.resources.is_empty() {
            return Err(ConfigError::NoResourceTypes);
        }
        self.timestamp.validate()?;

        let mut metric_names = HashSet::new();
        for metric in &self.metrics {
            if !metric_names.insert(metric.name.as_str()) {
                return Err(ConfigError::DuplicateMetricType(metric.name.clone()));
            }
            metric.value.validate(&metric.name)?;
        }

        let mut resource_names = HashSet::new();
        for resource in &self.resources {
            if !resource_names.insert(resource.name.as_str()) {
                return Err(ConfigError::DuplicateResourceType(resource.name.clone()));
            }
            if resource.count == 0 {
                return Err(ConfigError::EmptyResourcePool(resource.name.clone()));
            }
            if resource.metrics.is_empty() {
                return Err(ConfigError::EmptyCatalogEntry(resource.name.clone()));
            }
            if let Some(unknown) = resource
                .metrics
                .iter()
                .find(|m| !metric_names.contains(m.as_str()))
            {
                return Err(ConfigError::UnknownMetric {
                    resource: resource.name.clone(),
                    metric: unknown.clone(),
                });
            }
        }

        Ok(())
    }

    /// Get a resource definition by name.
    pub fn get_resource(&self, name: &str) -> Option<&ResourceDefinition> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Get a metric definition by name.
    pub fn get_metric(&self, name: &str) -> Option<&MetricDefinition> {
        self.metrics.iter().find(|m| m.name == name)
    }

    /// All resource type names, in configured order.
    pub fn resource_names(&self) -> Vec<&str> {
        self.resources.iter().map(|r| r.name.as_str()).collect()
    }

    /// All metric type names, in configured order.
    pub fn metric_names(&self) -> Vec<&str> {
        self.metrics.iter().map(|m| m.name.as_str()).collect()
    }
}
