//! Command-line interface and orchestration for cogload
//!
//! This module implements the CLI commands and wires the input normalizer,
//! the metrics aggregator and the report generators together. It handles
//! argument parsing, configuration management, and the high-level workflows.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **analyze**: Read JSON inputs from files or stdin, validate and summarize
//!   each one, and generate reports
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file for syntax and consistent values
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. The analyze command:
//!
//! 1. Parses arguments, sets up logging and loads configuration
//! 2. Reads every input document asynchronously
//! 3. Pushes each input through a `MetricsBinding` built from the configuration
//! 4. Lists failed inputs and generates reports for the valid ones
//!
//! The `common` module provides shared functionality like logging setup,
//! color mode handling, and the report generation logic that coordinates
//! multiple output formats.

mod analyze;
mod common;
mod config;
mod host;
mod init;
mod run;
mod validate;

#[cfg(debug_assertions)]
pub use config::Config;

pub use analyze::{AnalyzeArgs, analyze_inputs};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
