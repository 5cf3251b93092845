//! Generate command handler.

use anyhow::Context;
use bulk_export::{BulkExportArgs, BulkExporter, ExportMetrics};
use metrics_generator::RecordGenerator;

/// Run the generate command.
///
/// Returns `None` in dry-run mode, where the config is validated and the
/// generator built but nothing is written.
pub fn run_generate(args: &BulkExportArgs) -> anyhow::Result<Option<ExportMetrics>> {
    let config = args
        .dataset
        .load_config()
        .with_context(|| match &args.dataset.config {
            Some(path) => format!("Failed to load dataset config from {path:?}"),
            None => "Invalid built-in dataset config".to_string(),
        })?;

    tracing::info!(
        "Generating {} documents ({:?}, seed={:?})",
        args.count,
        config.association,
        config.seed
    );

    let generator = RecordGenerator::new(config).context("Failed to build record generator")?;

    if args.dry_run {
        tracing::info!(
            "[DRY-RUN] Would write {} documents ({} lines) to {:?}",
            args.count,
            args.count.saturating_mul(2),
            args.output
        );
        tracing::info!(
            "[DRY-RUN] Resource types: {:?}",
            generator.config().resource_names()
        );
        tracing::info!("[DRY-RUN] Dataset config validated successfully");
        return Ok(None);
    }

    let mut exporter = BulkExporter::from_generator(generator)
        .with_action(args.action.into())
        .with_index_name(args.index_name.clone());

    let metrics = exporter
        .export_to_path(&args.output, args.count)
        .with_context(|| format!("Failed to write bulk file {:?}", args.output))?;

    tracing::info!(
        "Generated {:?}: {} documents in {:?}",
        args.output,
        metrics.documents_written,
        metrics.total_duration
    );

    Ok(Some(metrics))
}
