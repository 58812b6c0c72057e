#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for cogload
//!
//! This library validates loosely-typed cognitive-load measurements, summarizes
//! them, and renders the summaries for people and machines.
//!
//! # Module Organization
//!
//! - [`input`]: Validation and coercion of raw JSON into canonical sets
//! - [`metrics`]: Summary statistics over canonical sets
//! - [`binding`]: Recompute-on-change store that publishes pipeline results
//! - [`reports`]: Report generation in multiple formats
//! - [`commands`]: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

mod metrics_error;

pub mod binding;
pub mod input;
pub mod metrics;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub use crate::commands::{Host, run};
pub use crate::metrics_error::{ErrorKind, MetricsError};
