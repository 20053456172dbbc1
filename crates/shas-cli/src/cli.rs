//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shas - Extract and consolidate Talmud commentary text.
#[derive(Debug, Parser)]
#[command(name = "shas")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SHAS_CONFIG")]
    pub config: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract, consolidate and write the corpus
    Extract(ExtractArgs),

    /// Print the summary of a run without writing anything
    Summary(SummaryArgs),

    /// Validate and list the configured consolidation rules
    Rules,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Document store export (JSON array or JSON Lines)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory
    #[arg(short, long)]
    pub output: PathBuf,

    /// Write the JSON summary to this file
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Write a single corpus.json instead of one file per (author, work)
    #[arg(long)]
    pub combined: bool,

    /// Write the raw corpus without applying consolidation rules
    #[arg(long)]
    pub skip_consolidation: bool,
}

/// Arguments for the summary command.
#[derive(Debug, Parser)]
pub struct SummaryArgs {
    /// Document store export (JSON array or JSON Lines)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Number of authors to list
    #[arg(short, long, default_value = "20")]
    pub top: usize,

    /// Summarize the raw corpus without applying consolidation rules
    #[arg(long)]
    pub skip_consolidation: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl Cli {
    /// Log filter directive for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
