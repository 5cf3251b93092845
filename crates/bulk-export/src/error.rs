//! Error types for the bulk exporter.

use metrics_generator::GeneratorError;
use thiserror::Error;

/// Errors that can occur during a bulk export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Record generator could not be built (invalid dataset config or pools).
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
