//! Extraction orchestrator

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::normalizer::StructureNormalizer;
use crate::script::ScriptDetector;
use crate::title::TitleResolver;
use crate::types::{
    CountedSection, DocumentExtraction, DocumentOutcome, ExtractionFailure, ExtractionResult,
    ExtractionStats,
};
use rayon::prelude::*;
use shas_domain::{normalize_component, CanonicalKey, Corpus, SourceDocument, WorkRecord};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

/// Turns source documents into the raw corpus
///
/// Per-document work ([`Extractor::extract_document`]) is pure and may run
/// in parallel; merging into the shared corpus and statistics always happens
/// on a single [`ExtractionContext`], in input order.
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractorConfig,
    resolver: TitleResolver,
    normalizer: StructureNormalizer,
    detector: ScriptDetector,
}

impl Extractor {
    /// Create a new Extractor
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let resolver = TitleResolver::from_config(&config)?;
        let detector = ScriptDetector::new(config.script);

        Ok(Self {
            config,
            resolver,
            normalizer: StructureNormalizer::new(detector),
            detector,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The script detector in use
    pub fn detector(&self) -> ScriptDetector {
        self.detector
    }

    /// Resolve and normalize one document without touching any shared state
    pub fn extract_document(&self, doc: &SourceDocument) -> DocumentOutcome {
        let resolved = match self.resolver.resolve(&doc.title) {
            Ok(resolved) => resolved,
            Err(e) => return DocumentOutcome::TitleFailed(e),
        };

        let normalized = self.normalizer.normalize(&doc.content);
        if normalized.is_empty() {
            return DocumentOutcome::Empty {
                title: doc.title.clone(),
                anomalies: normalized.anomalies,
                blocks_filtered: normalized.blocks_filtered,
            };
        }

        let sections = normalized
            .sections
            .into_iter()
            .map(|entry| {
                let words = entry
                    .blocks()
                    .iter()
                    .map(|b| self.detector.count_words(b))
                    .sum();
                CountedSection { entry, words }
            })
            .collect();

        DocumentOutcome::Extracted {
            title: doc.title.clone(),
            author: resolved.author,
            work: resolved.work,
            sections,
            anomalies: normalized.anomalies,
            blocks_filtered: normalized.blocks_filtered,
        }
    }

    /// Start a run with fresh, caller-owned state
    pub fn begin(&self) -> ExtractionContext<'_> {
        ExtractionContext::new(self)
    }

    /// Extract every document, in input order
    ///
    /// With `parallel` enabled, per-document work runs on the rayon pool and
    /// the outcomes are merged sequentially; the result is identical.
    pub fn extract_all(&self, documents: &[SourceDocument]) -> ExtractionResult {
        info!(
            "Starting extraction of {} documents ({})",
            documents.len(),
            if self.config.parallel { "parallel" } else { "sequential" }
        );

        let mut ctx = self.begin();
        if self.config.parallel {
            let outcomes: Vec<DocumentOutcome> = documents
                .par_iter()
                .map(|doc| self.extract_document(doc))
                .collect();
            for outcome in outcomes {
                // Per-document errors are already recorded on the context
                let _ = ctx.accumulate(outcome);
            }
        } else {
            for doc in documents {
                let _ = ctx.ingest(doc);
            }
        }

        let result = ctx.finish();
        info!(
            "Extraction complete: {}/{} documents, {} sections, {} blocks, {} words",
            result.stats.documents_successful,
            result.stats.documents_seen,
            result.stats.total_sections,
            result.stats.total_blocks,
            result.stats.total_words
        );
        result
    }
}

/// Mutable state of one extraction run
///
/// Owned by the caller. Stopping early and calling [`finish`](Self::finish)
/// yields partial statistics for a truncated run.
pub struct ExtractionContext<'a> {
    extractor: &'a Extractor,
    records: BTreeMap<(String, String), WorkRecord>,
    corpus: Corpus,
    section_words: HashMap<CanonicalKey, usize>,
    stats: ExtractionStats,
    failures: Vec<ExtractionFailure>,
    documents: Vec<DocumentExtraction>,
}

impl<'a> ExtractionContext<'a> {
    fn new(extractor: &'a Extractor) -> Self {
        Self {
            extractor,
            records: BTreeMap::new(),
            corpus: Corpus::new(),
            section_words: HashMap::new(),
            stats: ExtractionStats::new(),
            failures: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// Process one document
    ///
    /// Returns the number of sections merged. Per-document errors
    /// (`TitleParse`, `EmptyExtraction`) are recorded before being returned
    /// and never invalidate the run.
    pub fn ingest(&mut self, doc: &SourceDocument) -> Result<usize, ExtractorError> {
        let outcome = self.extractor.extract_document(doc);
        self.accumulate(outcome)
    }

    /// Merge a precomputed outcome
    pub fn accumulate(&mut self, outcome: DocumentOutcome) -> Result<usize, ExtractorError> {
        self.stats.documents_seen += 1;

        match outcome {
            DocumentOutcome::TitleFailed(e) => {
                warn!("Skipping document: {}", e);
                self.stats.title_failures += 1;
                self.fail(ExtractorError::TitleParse(e))
            }
            DocumentOutcome::Empty {
                title,
                anomalies,
                blocks_filtered,
            } => {
                warn!("No qualifying sections in '{}'", title);
                self.stats.empty_extractions += 1;
                self.stats.structural_anomalies += anomalies;
                self.stats.blocks_filtered += blocks_filtered;
                self.fail(ExtractorError::EmptyExtraction(title))
            }
            DocumentOutcome::Extracted {
                title,
                author,
                work,
                sections,
                anomalies,
                blocks_filtered,
            } => {
                self.stats.structural_anomalies += anomalies;
                self.stats.blocks_filtered += blocks_filtered;
                let merged = sections.len();
                let text_blocks = sections.iter().map(|s| s.entry.block_count()).sum();
                let (author, work) = self.merge(&author, &work, sections);

                self.stats.documents_successful += 1;
                self.stats.authors.insert(normalize_component(&author));
                self.stats.works.insert(normalize_component(&work));
                debug!("Extracted '{}': {} sections, {} text blocks", title, merged, text_blocks);
                self.documents.push(DocumentExtraction {
                    title,
                    author,
                    work,
                    sections: merged,
                    text_blocks,
                });
                Ok(merged)
            }
        }
    }

    /// Returns the record's (author, work), which may be spelled differently
    /// from this document's when whitespace differs
    fn merge(&mut self, author: &str, work: &str, sections: Vec<CountedSection>) -> (String, String) {
        let pair = (normalize_component(author), normalize_component(work));
        let record = self
            .records
            .entry(pair)
            .or_insert_with(|| WorkRecord::new(author, work));

        for CountedSection { entry, words } in sections {
            let key = record.key_for(entry.section_id());
            let block_count = entry.block_count();
            let blocks = entry.blocks().to_vec();

            if let Some(replaced) = record.upsert(entry) {
                self.stats.overwrites += 1;
                self.stats.total_sections -= 1;
                self.stats.total_blocks -= replaced.block_count();
                self.stats.total_words -= self.section_words.get(&key).copied().unwrap_or(0);
                debug!("Overwriting {}", key);
            }

            self.stats.total_sections += 1;
            self.stats.total_blocks += block_count;
            self.stats.total_words += words;
            self.section_words.insert(key.clone(), words);
            self.corpus.insert(key, blocks);
        }
        (record.author.clone(), record.work.clone())
    }

    fn fail(&mut self, err: ExtractorError) -> Result<usize, ExtractorError> {
        if self.failures.len() < self.extractor.config.failure_sample_limit {
            if let Some(failure) = ExtractionFailure::from_error(&err) {
                self.failures.push(failure);
            }
        }
        Err(err)
    }

    /// Statistics so far
    pub fn stats(&self) -> &ExtractionStats {
        &self.stats
    }

    /// Raw corpus so far
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// End the run
    pub fn finish(self) -> ExtractionResult {
        ExtractionResult {
            corpus: self.corpus,
            records: self.records.into_values().collect(),
            stats: self.stats,
            failures: self.failures,
            documents: self.documents,
        }
    }
}
