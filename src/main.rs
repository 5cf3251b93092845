//! Command-line interface for metrics-datagen
//!
//! # Usage Examples
//!
//! ```bash
//! # Write 10k documents using the built-in dataset
//! metrics-datagen generate --output test-data.json
//!
//! # Reproducible single-resource stream to stdout
//! metrics-datagen generate -o - -n 3 --seed 42 --mode single-resource
//!
//! # Custom dataset
//! metrics-datagen generate -o test-data.json --config dataset.yaml --count 100000
//!
//! # Validate a dataset config / print the built-in one
//! metrics-datagen validate --config dataset.yaml
//! metrics-datagen show-config > dataset.yaml
//! ```
//!
//! Logging is configured through `RUST_LOG` (e.g. `RUST_LOG=info`).

use bulk_export::{BulkExportArgs, DatasetArgs};
use clap::{Parser, Subcommand};
use metrics_datagen::commands::{run_generate, run_show_config, run_validate, summarize};

#[derive(Parser)]
#[command(name = "metrics-datagen")]
#[command(about = "Synthetic metrics dataset generator for bulk-loading a search index")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a bulk-ingest file of synthetic metric records
    Generate {
        #[command(flatten)]
        args: BulkExportArgs,
    },

    /// Validate a dataset config and print a summary
    Validate {
        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// Print the built-in dataset config as YAML
    ShowConfig,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { args } => {
            run_generate(&args)?;
        }
        Commands::Validate { dataset } => {
            let config = run_validate(&dataset)?;
            println!("{}", summarize(&config));
        }
        Commands::ShowConfig => {
            print!("{}", run_show_config()?);
        }
    }

    Ok(())
}
