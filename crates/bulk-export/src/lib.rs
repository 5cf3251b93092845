//! Bulk-ingest stream writer for synthetic metric records.
//!
//! This crate drives the [`RecordGenerator`](metrics_generator::RecordGenerator)
//! and writes each record as a pair of lines: an action line carrying the
//! document id, then the document itself.
//!
//! ```text
//! {"index":{"_id":0}}
//! {"metric_type":"time","user_id":"...","timestamp":"...","metadata":[...],"value":4242}
//! {"index":{"_id":1}}
//! ...
//! ```
//!
//! # Example
//!
//! ```ignore
//! use bulk_export::BulkExporter;
//! use metrics_core::DatasetConfig;
//!
//! let mut exporter = BulkExporter::new(DatasetConfig::default().with_seed(42))?;
//! let metrics = exporter.export_to_path("test-data.json", 10_000)?;
//! println!("Wrote {} documents in {:?}", metrics.documents_written, metrics.total_duration);
//! ```

pub mod args;
pub mod error;
pub mod exporter;

pub use args::{ActionArg, BulkExportArgs, DatasetArgs, ModeArg, ScopeArg};
pub use error::ExportError;
pub use exporter::{BulkExporter, ExportMetrics};
