//! Shas CLI library.
//!
//! This library provides the core functionality for the `shas` command-line
//! interface: configuration loading, the export-file document source, the
//! JSON corpus sinks, command execution and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod sink;
pub mod source;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use pipeline::{run_pipeline, PipelineRun};
