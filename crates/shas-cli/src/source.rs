//! Document source backed by a store export file.

use crate::error::{CliError, Result};
use shas_domain::traits::{DocumentCriteria, DocumentSource};
use shas_domain::SourceDocument;
use shas_extractor::{parse_export, DocumentQuery};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Reads a JSON or JSON Lines export and applies the store filter in process.
#[derive(Debug, Clone)]
pub struct JsonExportSource {
    path: PathBuf,
    content_field: String,
}

impl JsonExportSource {
    /// Create a source for an export file.
    pub fn new(path: impl Into<PathBuf>, content_field: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content_field: content_field.into(),
        }
    }
}

impl DocumentSource for JsonExportSource {
    type Error = CliError;

    fn fetch(&self, criteria: &DocumentCriteria) -> Result<Vec<SourceDocument>> {
        if !self.path.is_file() {
            return Err(CliError::InvalidInput(format!(
                "Export file not found: {}",
                self.path.display()
            )));
        }

        let contents = fs::read_to_string(&self.path)?;
        let documents = parse_export(&contents, &self.content_field)?;
        let total = documents.len();

        let query = DocumentQuery::new(criteria)?;
        let matching = query.apply(documents);
        info!(
            "Loaded {} of {} documents from {} matching {}",
            matching.len(),
            total,
            self.path.display(),
            query.pattern()
        );
        Ok(matching)
    }
}
