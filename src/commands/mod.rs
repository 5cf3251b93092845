//! Command handlers.
//!
//! This module contains handlers for the generate, validate and show-config commands.

pub mod config;
pub mod generate;

pub use config::{run_show_config, run_validate, summarize};
pub use generate::run_generate;
