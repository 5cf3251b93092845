//! metrics-datagen library
//!
//! Generates a synthetic user-activity metrics dataset and writes it as a
//! bulk-ingest stream for a document-search index.
//!
//! # Crates
//!
//! - `metrics_core` - Dataset config, record and bulk-action types
//! - `metrics_generator` - Record generator over immutable reference pools
//! - `bulk_export` - Bulk-ingest stream writer and its CLI arguments
//!
//! # CLI Usage
//!
//! ```bash
//! # 100k multi-metadata documents, reproducible
//! metrics-datagen generate --output test-data.json --count 100000 --seed 42
//!
//! # Single-resource documents targeting the `metrics` index
//! metrics-datagen generate -o - -n 10 --mode single-resource --index-name metrics
//!
//! # Check a dataset config
//! metrics-datagen validate --config dataset.yaml
//! ```

pub mod commands;
