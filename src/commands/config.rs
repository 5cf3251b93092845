//! Validate and show-config command handlers.

use anyhow::Context;
use bulk_export::DatasetArgs;
use metrics_core::{DatasetConfig, ValueRule};

/// Load and validate a dataset config, returning it with overrides applied.
pub fn run_validate(args: &DatasetArgs) -> anyhow::Result<DatasetConfig> {
    let config = args.load_config().with_context(|| match &args.config {
        Some(path) => format!("Dataset config {path:?} is invalid"),
        None => "Built-in dataset config is invalid".to_string(),
    })?;
    tracing::info!("Dataset config validated successfully");
    Ok(config)
}

/// Built-in dataset config rendered as YAML.
pub fn run_show_config() -> anyhow::Result<String> {
    DatasetConfig::default()
        .to_yaml()
        .context("Failed to serialize built-in dataset config")
}

/// Human-readable summary of a dataset config.
pub fn summarize(config: &DatasetConfig) -> String {
    let mut lines = vec![
        format!("association: {:?}", config.association),
        format!("metric scope: {:?}", config.metric_scope),
        match config.seed {
            Some(seed) => format!("seed: {seed}"),
            None => "seed: random".to_string(),
        },
        format!("users: {}", config.users),
    ];

    for resource in &config.resources {
        lines.push(format!(
            "resource {}: {} ids, metrics [{}]",
            resource.name,
            resource.count,
            resource.metrics.join(", ")
        ));
    }

    for metric in &config.metrics {
        let rule = match &metric.value {
            ValueRule::IntRange { min, max } => format!("int_range [{min}, {max}]"),
            ValueRule::Pool { values } => format!("pool of {}", values.len()),
            ValueRule::SampledPool { min, max, size } => {
                format!("sampled_pool of {size} from [{min}, {max}]")
            }
        };
        lines.push(format!("metric {}: {rule}", metric.name));
    }

    lines.push(format!(
        "timestamp window: {} days + {} ms",
        config.timestamp.max_days, config.timestamp.max_extra_millis
    ));
    lines.join("\n")
}
