//! Shas Extractor
//!
//! Turns store documents into a raw corpus of Talmud commentary text.
//!
//! # Overview
//!
//! Each document title (`"<author> on <work>"`) is resolved against a
//! controlled vocabulary of tractates, its content is normalized into
//! ordered sections, and every text block is filtered down to the target
//! script. The surviving sections are merged into a [`Corpus`](shas_domain::Corpus) keyed by
//! [`CanonicalKey`](shas_domain::CanonicalKey).
//!
//! # Architecture
//!
//! ```text
//! SourceDocument → TitleResolver → StructureNormalizer → ScriptDetector → Corpus
//!                                                                       ↘ ExtractionStats
//! ```
//!
//! Per-document failures (unresolvable titles, empty documents) are counted
//! and sampled, never fatal.
//!
//! # Example Usage
//!
//! ```
//! use shas_extractor::{Extractor, ExtractorConfig};
//! use shas_domain::SourceDocument;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = Extractor::new(ExtractorConfig::with_works(["Sanhedrin"]))?;
//! let docs = vec![SourceDocument::with_sections(
//!     "Rashi on Sanhedrin",
//!     "he",
//!     vec![vec!["שלום"], vec!["טוב"]],
//! )];
//!
//! let result = extractor.extract_all(&docs);
//! assert_eq!(result.stats.total_sections, 2);
//! assert!(result.corpus.get_rendered("Rashi_Sanhedrin.section_1").is_some());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod script;
mod title;
mod normalizer;
mod document;
mod query;
mod types;
mod extractor;

#[cfg(test)]
mod tests;

pub use error::{ExtractorError, TitleParseError, TitleParseReason};
pub use config::{ExtractorConfig, TALMUD_TRACTATES};
pub use script::{is_target_script, ScriptDetector, ScriptRange};
pub use title::{resolve, ResolvedTitle, TitleResolver};
pub use normalizer::{NormalizedContent, StructureNormalizer};
pub use document::{parse_document, parse_export};
pub use query::DocumentQuery;
pub use types::{
    CountedSection, DocumentExtraction, DocumentOutcome, ExtractionFailure, ExtractionResult,
    ExtractionStats, FailureKind, ScholarSummary,
};
pub use extractor::{ExtractionContext, Extractor};
