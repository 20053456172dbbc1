//! Outcome and statistics types for extraction

use crate::error::{ExtractorError, TitleParseError};
use serde::{Deserialize, Serialize};
use shas_domain::{normalize_component, Corpus, SectionEntry, WorkRecord};
use std::collections::{BTreeMap, BTreeSet};

/// Run statistics
///
/// Reset per run, read-only once the run finishes. Section, block and word
/// totals always describe the emitted corpus: a last-write-wins overwrite
/// subtracts the replaced section before adding the new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Documents handed to the orchestrator
    pub documents_seen: usize,

    /// Documents that contributed at least one section
    pub documents_successful: usize,

    /// Documents whose title did not resolve
    pub title_failures: usize,

    /// Documents that resolved but yielded no sections
    pub empty_extractions: usize,

    /// Top-level content elements skipped for having the wrong shape
    pub structural_anomalies: usize,

    /// Items dropped by the script filter
    pub blocks_filtered: usize,

    /// Sections replaced by a later document (last write wins)
    pub overwrites: usize,

    /// Sections in the output
    pub total_sections: usize,

    /// Blocks in the output
    pub total_blocks: usize,

    /// Target-script words in the output
    pub total_words: usize,

    /// Authors with at least one successful document, normalized as in keys
    pub authors: BTreeSet<String>,

    /// Works with at least one successful document, normalized as in keys
    pub works: BTreeSet<String>,
}

impl ExtractionStats {
    /// Create zeroed statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents that did not contribute output
    pub fn failures(&self) -> usize {
        self.title_failures + self.empty_extractions
    }

    /// Successful documents as a percentage of documents seen (0.0 for an empty run)
    pub fn success_rate(&self) -> f64 {
        if self.documents_seen == 0 {
            return 0.0;
        }
        self.documents_successful as f64 / self.documents_seen as f64 * 100.0
    }

    /// Number of distinct authors
    pub fn distinct_authors(&self) -> usize {
        self.authors.len()
    }

    /// Number of distinct works
    pub fn distinct_works(&self) -> usize {
        self.works.len()
    }
}

/// Why a document produced no output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Title did not resolve
    TitleParse,
    /// No qualifying sections
    EmptyExtraction,
}

/// A document that produced no output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionFailure {
    /// Document title
    pub title: String,

    /// Failure category
    pub kind: FailureKind,

    /// Human-readable reason
    pub reason: String,
}

impl ExtractionFailure {
    /// Failure record for a per-document error; `None` for run-level errors
    pub fn from_error(err: &ExtractorError) -> Option<Self> {
        match err {
            ExtractorError::TitleParse(e) => Some(ExtractionFailure {
                title: e.title.clone(),
                kind: FailureKind::TitleParse,
                reason: e.reason.as_str().to_string(),
            }),
            ExtractorError::EmptyExtraction(title) => Some(ExtractionFailure {
                title: title.clone(),
                kind: FailureKind::EmptyExtraction,
                reason: "no qualifying sections".to_string(),
            }),
            _ => None,
        }
    }
}

/// A section with its precomputed word count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountedSection {
    /// The section
    pub entry: SectionEntry,

    /// Target-script words across its blocks
    pub words: usize,
}

/// Per-document extraction, computed independently of every other document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// Title resolved and at least one section survived
    Extracted {
        /// Document title
        title: String,
        /// Resolved author
        author: String,
        /// Resolved work
        work: String,
        /// Surviving sections, in source order
        sections: Vec<CountedSection>,
        /// Wrong-shape elements skipped
        anomalies: usize,
        /// Items dropped by the script filter
        blocks_filtered: usize,
    },

    /// Title did not resolve
    TitleFailed(TitleParseError),

    /// Title resolved but no section survived
    Empty {
        /// Document title
        title: String,
        /// Wrong-shape elements skipped
        anomalies: usize,
        /// Items dropped by the script filter
        blocks_filtered: usize,
    },
}

/// Result of an extraction run
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    /// Raw corpus, keyed by CanonicalKey
    pub corpus: Corpus,

    /// One record per (author, work) pair, ordered by normalized pair
    pub records: Vec<WorkRecord>,

    /// Run statistics
    pub stats: ExtractionStats,

    /// Sample of failed documents, capped by configuration
    pub failures: Vec<ExtractionFailure>,

    /// Every document that contributed sections, in input order
    pub documents: Vec<DocumentExtraction>,
}

impl ExtractionResult {
    /// Per-author volume of the raw corpus, before any consolidation rule
    ///
    /// Authors are keyed as they appear in canonical keys.
    pub fn scholar_summary(&self) -> BTreeMap<String, ScholarSummary> {
        let mut scholars: BTreeMap<String, ScholarSummary> = BTreeMap::new();
        for record in &self.records {
            let entry = scholars.entry(normalize_component(&record.author)).or_default();
            entry.tractates += 1;
            entry.text_blocks += record.block_count();
        }
        scholars
    }
}

/// One document that contributed sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentExtraction {
    /// Document title
    pub title: String,

    /// Author as recorded for its (author, work) pair
    pub author: String,

    /// Work in canonical vocabulary casing
    pub work: String,

    /// Sections the document contributed
    pub sections: usize,

    /// Text blocks across those sections
    pub text_blocks: usize,
}

/// Raw-corpus volume of one author
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScholarSummary {
    /// Tractates with at least one section
    pub tractates: usize,

    /// Text blocks across those tractates
    pub text_blocks: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TitleParseReason;

    #[test]
    fn test_empty_stats() {
        let stats = ExtractionStats::new();
        assert_eq!(stats.failures(), 0);
        assert_eq!(stats.success_rate(), 0.0);
        assert_eq!(stats.distinct_authors(), 0);
    }

    #[test]
    fn test_success_rate() {
        let stats = ExtractionStats {
            documents_seen: 4,
            documents_successful: 3,
            title_failures: 1,
            ..Default::default()
        };
        assert_eq!(stats.success_rate(), 75.0);
        assert_eq!(stats.failures(), 1);
    }

    #[test]
    fn test_failure_from_error() {
        let err = ExtractorError::TitleParse(TitleParseError::new("Rashi", TitleParseReason::MissingSeparator));
        let failure = ExtractionFailure::from_error(&err).unwrap();
        assert_eq!(failure.kind, FailureKind::TitleParse);
        assert_eq!(failure.reason, "missing separator");

        let err = ExtractorError::Config("bad".to_string());
        assert!(ExtractionFailure::from_error(&err).is_none());
    }

    #[test]
    fn test_failure_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FailureKind::EmptyExtraction).unwrap();
        assert_eq!(json, "\"empty_extraction\"");
    }
}
