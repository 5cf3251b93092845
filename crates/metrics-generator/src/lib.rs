//! Synthetic metric record generator.
//!
//! This crate provides the [`RecordGenerator`], which produces user-activity
//! metric records tagged with resource metadata. Identifier pools, the
//! metric catalog and the value sources are built once from a
//! [`DatasetConfig`](metrics_core::DatasetConfig); a seeded config yields a
//! reproducible record stream.
//!
//! # Architecture
//!
//! ```text
//! DatasetConfig (YAML or defaults)
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │   RecordGenerator    │
//! │                      │
//! │  - ReferencePools    │
//! │  - metric catalog    │
//! │  - value sources     │
//! │  - rng (StdRng)      │
//! │  - time source       │
//! └──────────┬───────────┘
//!            │
//!            ▼
//!    MetricRecord { metric_type, user_id, timestamp, resources, value }
//! ```
//!
//! # Example
//!
//! ```rust
//! use metrics_core::{AssociationMode, DatasetConfig};
//! use metrics_generator::RecordGenerator;
//!
//! let config = DatasetConfig::default()
//!     .with_seed(42)
//!     .with_association(AssociationMode::SingleResource);
//!
//! let mut generator = RecordGenerator::new(config).unwrap();
//! let record = generator.next_record();
//! assert!(generator.pools().contains_user(&record.user_id));
//! ```
//!
//! # Value rules
//!
//! - `int_range` - Fresh uniform integer per record
//! - `pool` - Uniform pick from listed values
//! - `sampled_pool` - Uniform pick from candidates drawn once at startup

pub mod generator;
pub mod generators;
pub mod pools;

// Re-exports for convenience
pub use generator::{GeneratorError, RecordGenerator, RecordIterator};
pub use generators::timestamp::TimeSource;
pub use generators::ValueSource;
pub use pools::{ReferencePools, ResourcePool};
