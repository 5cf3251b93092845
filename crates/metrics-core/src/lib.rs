//! Core types for the metrics data generator.
//!
//! This crate provides the foundational types shared by the generator and
//! the bulk exporter:
//!
//! - [`DatasetConfig`] - Dataset definition (pools, catalog, value rules) loaded from YAML
//! - [`ValueRule`] - How a metric's value is produced
//! - [`MetricRecord`] - One generated document
//! - [`BulkAction`] - The action line preceding each document in a bulk stream
//!
//! # Architecture
//!
//! ```text
//! metrics-core (this crate)
//!    │
//!    ├─── metrics-generator  (builds pools from DatasetConfig, emits MetricRecord)
//!    │
//!    └─── bulk-export        (writes BulkAction + MetricRecord line pairs)
//! ```
//!
//! # Example
//!
//! ```rust
//! use metrics_core::{AssociationMode, DatasetConfig};
//!
//! let config = DatasetConfig::default().with_association(AssociationMode::SingleResource);
//! config.validate().unwrap();
//! assert_eq!(config.resource_names(), vec!["segment", "recording", "activity"]);
//! ```

pub mod config;
pub mod record;

// Re-exports for convenience
pub use config::{
    AssociationMode, ConfigError, DatasetConfig, MetricDefinition, MetricScope,
    ResourceDefinition, TimestampWindow, ValueRule, MAX_TIMESTAMP_DAYS,
    MAX_TIMESTAMP_EXTRA_MILLIS,
};
pub use record::{
    ActionTarget, BulkAction, BulkActionKind, MetricRecord, ResourceAssociation, ResourceRef,
    TIMESTAMP_FORMAT,
};
