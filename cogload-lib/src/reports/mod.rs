//! Multi-format report generation for aggregated series
//!
//! This module is the rendering layer fed by the validation and aggregation
//! pipeline. It turns validated series and their summaries into output for
//! people and for other programs.
//!
//! # Implementation Model
//!
//! Three report generators are provided, each accessed through a `generate` function:
//! - **Console**: Terminal output with ANSI colors, confidence bars and scale points
//! - **CSV**: One row per series with proper escaping
//! - **JSON**: Machine-readable structured data including every value
//!
//! All generators operate on the same input: a slice of `ReportableSeries`
//! holding the validated data, its metrics, and whether its confidence was
//! flagged as low.
//!
//! Formatting shared by the generators (numbers, dates, trend arrows, bars)
//! lives in the `common` module.

mod common;
mod console;
mod csv;
mod json;
mod reportable_series;

pub use console::{ConsoleOutputMode, generate as generate_console};
pub use csv::generate as generate_csv;
pub use json::generate as generate_json;
pub use reportable_series::ReportableSeries;
