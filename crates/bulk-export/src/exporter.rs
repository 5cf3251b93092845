//! Bulk-ingest stream exporter.

use crate::error::ExportError;
use metrics_core::{BulkAction, BulkActionKind, DatasetConfig};
use metrics_generator::RecordGenerator;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default buffer size for bulk writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Metrics from an export operation.
#[derive(Debug, Clone, Default)]
pub struct ExportMetrics {
    /// Number of documents written.
    pub documents_written: u64,
    /// Number of lines written (two per document).
    pub lines_written: u64,
    /// Bytes written to the sink.
    pub bytes_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating records.
    pub generation_duration: Duration,
    /// Time spent serializing and writing.
    pub write_duration: Duration,
}

impl ExportMetrics {
    /// Calculate documents per second.
    pub fn documents_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.documents_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.bytes_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Writer adapter that counts bytes passed through.
struct CountingWriter<W> {
    inner: W,
    bytes: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bytes += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Serialize `value` as one newline-terminated JSON line.
///
/// Failures of the underlying writer surface as [`ExportError::Io`].
fn write_json_line<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<(), ExportError> {
    serde_json::to_writer(&mut *writer, value).map_err(|e| {
        if e.is_io() {
            ExportError::Io(e.into())
        } else {
            ExportError::Json(e)
        }
    })?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Exporter that writes generated records as a bulk-ingest stream.
pub struct BulkExporter {
    generator: RecordGenerator,
    action: BulkActionKind,
    index_name: Option<String>,
}

impl BulkExporter {
    /// Create an exporter over a freshly built generator.
    ///
    /// # Arguments
    ///
    /// * `config` - Dataset definition; validated before anything is generated
    ///
    /// # Example
    ///
    /// ```ignore
    /// let exporter = BulkExporter::new(DatasetConfig::default().with_seed(42))?;
    /// ```
    pub fn new(config: DatasetConfig) -> Result<Self, ExportError> {
        Ok(Self::from_generator(RecordGenerator::new(config)?))
    }

    /// Create an exporter over an existing generator.
    pub fn from_generator(generator: RecordGenerator) -> Self {
        Self {
            generator,
            action: BulkActionKind::default(),
            index_name: None,
        }
    }

    /// Set the action keyword used in action lines.
    pub fn with_action(mut self, action: BulkActionKind) -> Self {
        self.action = action;
        self
    }

    /// Set the target index written into action lines.
    pub fn with_index_name(mut self, index_name: Option<String>) -> Self {
        self.index_name = index_name;
        self
    }

    /// Get a reference to the record generator.
    pub fn generator(&self) -> &RecordGenerator {
        &self.generator
    }

    /// Write `count` action/document line pairs to `writer`.
    ///
    /// Document ids run from 0 to `count - 1` in output order. The writer is
    /// flushed before returning; any error aborts the export.
    pub fn export_to_writer<W: Write>(
        &mut self,
        writer: W,
        count: u64,
    ) -> Result<ExportMetrics, ExportError> {
        let start_time = Instant::now();
        let mut metrics = ExportMetrics::default();
        let mut writer = CountingWriter {
            inner: writer,
            bytes: 0,
        };

        let mut generation_time = Duration::ZERO;
        let mut write_time = Duration::ZERO;

        for id in 0..count {
            let write_start = Instant::now();
            let action = BulkAction::new(self.action, id, self.index_name.clone());
            write_json_line(&mut writer, &action)?;
            write_time += write_start.elapsed();

            let gen_start = Instant::now();
            let record = self.generator.next_record();
            generation_time += gen_start.elapsed();

            let write_start = Instant::now();
            write_json_line(&mut writer, &record)?;
            write_time += write_start.elapsed();

            metrics.documents_written += 1;
            metrics.lines_written += 2;

            if metrics.documents_written % 10000 == 0 {
                debug!("Written {} documents", metrics.documents_written);
            }
        }

        writer.flush()?;

        metrics.bytes_written = writer.bytes;
        metrics.total_duration = start_time.elapsed();
        metrics.generation_duration = generation_time;
        metrics.write_duration = write_time;

        Ok(metrics)
    }

    /// Write `count` documents to a file, or to stdout when `output_path` is `-`.
    ///
    /// The file is created (or truncated), buffered, flushed and closed
    /// before this returns.
    pub fn export_to_path<P: AsRef<Path>>(
        &mut self,
        output_path: P,
        count: u64,
    ) -> Result<ExportMetrics, ExportError> {
        let output_path = output_path.as_ref();
        info!(
            "Generating bulk file '{}' with {} documents ({:?} mode)",
            output_path.display(),
            count,
            self.generator.config().association
        );

        let metrics = if output_path == Path::new("-") {
            let stdout = io::stdout();
            let writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, stdout.lock());
            self.export_to_writer(writer, count)?
        } else {
            let file = File::create(output_path)?;
            let writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
            self.export_to_writer(writer, count)?
        };

        info!(
            "Bulk generation complete: {} documents, {} bytes in {:?} ({:.2} docs/sec)",
            metrics.documents_written,
            metrics.bytes_written,
            metrics.total_duration,
            metrics.documents_per_second()
        );

        Ok(metrics)
    }
}
