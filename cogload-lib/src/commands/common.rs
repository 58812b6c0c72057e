//! Common processing logic shared by the commands.

use super::Host;
use super::config::{CONFIG_FILE_NAME, Config};
use crate::Result;
use crate::binding::Pipeline;
use crate::input::{Normalizer, ScalePolicy};
use crate::metrics::Aggregator;
use crate::reports::{ConsoleOutputMode, ReportableSeries, generate_console, generate_csv, generate_json};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use compact_str::CompactString;
use directories::BaseDirs;
use ohno::IntoAppError;
use std::io::Write;

pub(crate) const LOG_TARGET: &str = "  commands";

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Individual sections that can be shown in console output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConsoleSection {
    /// Show average, median, trend and confidence
    Summary,

    /// Show every validated value
    Values,
}

/// Arguments shared by commands that produce reports
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to configuration file (default is `cogload.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,

    /// Output series information to a CSV file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Output series information to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Output series information to the console, showing the specified sections.
    /// Defaults to showing all sections. If omitted entirely, console output is shown only when no other reports are generated.
    #[arg(long, value_name = "SECTIONS", value_delimiter = ',', default_missing_value = "summary,values", num_args = 0..=1, help_heading = "Report Output")]
    pub console: Option<Vec<ConsoleSection>>,

    /// Exit with status code 1 if any input fails validation
    #[arg(long)]
    pub error_if_invalid: bool,

    /// Exit with status code 1 if any series has low confidence
    #[arg(long)]
    pub error_if_low_confidence: bool,
}

/// An input that could not be turned into a series, with the reason why
#[derive(Debug, Clone)]
pub struct FailedInput {
    pub source: CompactString,
    pub message: String,
}

pub struct Common<'a, H: Host> {
    pub config: Config,
    pub host: &'a mut H,
    color: ColorMode,
    error_if_invalid: bool,
    error_if_low_confidence: bool,
    console: Option<ConsoleOutputMode>,
    csv: Option<Utf8PathBuf>,
    json: Option<Utf8PathBuf>,
}

impl<'a, H: Host> Common<'a, H> {
    /// Create a new Common processor with logger and config
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded
    pub fn new(host: &'a mut H, args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let (config, config_path) = load_config(args.config.as_deref())?;
        match &config_path {
            Some(path) => log::info!(target: LOG_TARGET, "Using configuration file '{path}'"),
            None => log::info!(target: LOG_TARGET, "Using default configuration"),
        }

        let console = args.console.as_ref().map(|sections| ConsoleOutputMode {
            summary: sections.contains(&ConsoleSection::Summary),
            values: sections.contains(&ConsoleSection::Values),
        });

        Ok(Self {
            config,
            host,
            color: args.color,
            error_if_invalid: args.error_if_invalid,
            error_if_low_confidence: args.error_if_low_confidence,
            console,
            csv: args.csv.clone(),
            json: args.json.clone(),
        })
    }

    /// Scale bounds for subjective ratings, from the configuration
    pub const fn scale(&self) -> ScalePolicy {
        ScalePolicy::new(self.config.scale_min, self.config.scale_max)
    }

    /// The validation and aggregation stages configured for this run
    pub const fn pipeline(&self) -> Pipeline {
        Pipeline::new(Normalizer::new(self.scale()), Aggregator::new(self.config.trend_tolerance))
    }

    pub fn is_low_confidence(&self, confidence: f64) -> bool {
        confidence < self.config.low_confidence_threshold
    }

    pub async fn report(&mut self, series: &[ReportableSeries], failed: &[FailedInput]) -> Result<()> {
        if !failed.is_empty() {
            let _ = writeln!(self.host.error(), "\nUnable to analyze {} input(s)", failed.len());
            for failure in failed {
                let _ = writeln!(self.host.error(), "  {}: {}", failure.source, failure.message);
            }
        }

        let generating_reports = self.csv.is_some() || self.json.is_some();

        // Show console output if:
        // - --console flag is explicitly set, OR
        // - No reports are being generated AND no --error-if flag is set
        let error_if = self.error_if_invalid || self.error_if_low_confidence;
        let default_mode = ConsoleOutputMode::full();
        let console_mode = match &self.console {
            Some(mode) => Some(mode),
            None if !generating_reports && !error_if => Some(&default_mode),
            None => None,
        };

        if let Some(mode) = console_mode
            && !series.is_empty()
        {
            let mut console_output = String::new();
            let use_colors = match self.color {
                ColorMode::Always => true,
                ColorMode::Never => false,
                ColorMode::Auto => {
                    use std::io::{IsTerminal, stdout};
                    stdout().is_terminal()
                }
            };
            generate_console(series, use_colors, mode, &mut console_output)?;
            let _ = write!(self.host.output(), "{console_output}");
        }

        if let Some(filename) = &self.csv {
            let mut csv_output = String::new();
            generate_csv(series, &mut csv_output)?;
            write_report(filename, csv_output).await?;
        }

        if let Some(filename) = &self.json {
            let mut json_output = String::new();
            generate_json(series, &mut json_output)?;
            write_report(filename, json_output).await?;
        }

        if self.error_if_invalid && !failed.is_empty() {
            return Err(ohno::AppError::new("one or more inputs failed validation"));
        }

        if self.error_if_low_confidence && series.iter().any(|item| item.low_confidence) {
            return Err(ohno::AppError::new("one or more series were flagged as low confidence"));
        }

        Ok(())
    }
}

async fn write_report(filename: &Utf8Path, contents: String) -> Result<()> {
    tokio::fs::write(filename, contents)
        .await
        .into_app_err_with(|| format!("writing report to '{filename}'"))?;
    log::info!(target: LOG_TARGET, "Wrote report '{filename}'");
    Ok(())
}

/// Load the configuration from an explicit path or the standard locations
///
/// Without an explicit path, `cogload.toml` in the working directory is tried
/// first, then `cogload/cogload.toml` under the user's configuration directory.
pub fn load_config(config_path: Option<&Utf8Path>) -> Result<(Config, Option<Utf8PathBuf>)> {
    Config::load(config_path, &config_candidates())
}

fn config_candidates() -> Vec<Utf8PathBuf> {
    let mut candidates = vec![Utf8PathBuf::from(CONFIG_FILE_NAME)];

    if let Some(dirs) = BaseDirs::new()
        && let Ok(dir) = Utf8PathBuf::from_path_buf(dirs.config_dir().join("cogload"))
    {
        candidates.push(dir.join(CONFIG_FILE_NAME));
    }

    candidates
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a logger may already be installed when commands run more than once in a process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
