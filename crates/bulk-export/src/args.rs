//! CLI argument definitions for the bulk exporter.

use clap::{Args, ValueEnum};
use metrics_core::{AssociationMode, BulkActionKind, ConfigError, DatasetConfig, MetricScope};
use std::path::PathBuf;

/// Record shape selectable on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// `metadata` list of 1..K distinct resource types
    MultiMetadata,
    /// One `resource_type` / `resource_id` pair
    SingleResource,
}

impl From<ModeArg> for AssociationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::MultiMetadata => AssociationMode::MultiMetadata,
            ModeArg::SingleResource => AssociationMode::SingleResource,
        }
    }
}

/// Metric selection policy for multi-metadata records.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeArg {
    Scoped,
    Unscoped,
}

impl From<ScopeArg> for MetricScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Scoped => MetricScope::Scoped,
            ScopeArg::Unscoped => MetricScope::Unscoped,
        }
    }
}

/// Bulk action keyword.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActionArg {
    #[default]
    Index,
    Create,
}

impl From<ActionArg> for BulkActionKind {
    fn from(action: ActionArg) -> Self {
        match action {
            ActionArg::Index => BulkActionKind::Index,
            ActionArg::Create => BulkActionKind::Create,
        }
    }
}

/// Dataset arguments shared by every command that builds a generator.
#[derive(Args, Clone, Debug, Default)]
pub struct DatasetArgs {
    /// Path to dataset config YAML file (built-in dataset when omitted)
    #[arg(long, short = 'c', env = "METRICS_DATAGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Random seed for deterministic generation (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Record shape (overrides the config file)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Metric selection policy for multi-metadata records (overrides the config file)
    #[arg(long, value_enum)]
    pub metric_scope: Option<ScopeArg>,
}

impl DatasetArgs {
    /// Load the dataset config and apply command-line overrides.
    pub fn load_config(&self) -> Result<DatasetConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => DatasetConfig::from_file(path)?,
            None => DatasetConfig::default(),
        };

        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(mode) = self.mode {
            config = config.with_association(mode.into());
        }
        if let Some(scope) = self.metric_scope {
            config = config.with_metric_scope(scope.into());
        }

        config.validate()?;
        Ok(config)
    }
}

/// Bulk-export arguments.
#[derive(Args, Clone, Debug)]
pub struct BulkExportArgs {
    /// Output file for the bulk stream (`-` for stdout)
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Number of documents to generate
    #[arg(long, short = 'n', default_value = "10000")]
    pub count: u64,

    /// Target index written into each action line
    #[arg(long)]
    pub index_name: Option<String>,

    /// Bulk action keyword
    #[arg(long, value_enum, default_value_t = ActionArg::Index)]
    pub action: ActionArg,

    /// Dry-run mode: validate the dataset config without writing output
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub dataset: DatasetArgs,
}
