//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use shas_consolidator::ConsolidationConfig;
use shas_extractor::ExtractorConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLI configuration.
///
/// ```toml
/// [settings]
/// color = true
/// format = "table"
///
/// [extractor]
/// language_tag = "he"
/// parallel = true
///
/// [consolidation]
/// dry_run = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Consolidation rules
    #[serde(default)]
    pub consolidation: ConsolidationConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".shas").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `~/.shas/config.toml` is
    /// used when present and defaults otherwise.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(Path::new(path))?,
            None => match Self::path() {
                Ok(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.extractor.validate().map_err(CliError::Config)?;
        self.consolidation.validate().map_err(CliError::Config)?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
