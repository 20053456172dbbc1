//! Summary aggregation

use serde::{Deserialize, Serialize};
use shas_consolidator::ConsolidationReport;
use shas_domain::Corpus;
use shas_extractor::{
    DocumentExtraction, ExtractionFailure, ExtractionResult, ExtractionStats, ScholarSummary,
    ScriptDetector,
};
use std::collections::{BTreeMap, BTreeSet};

/// Authors above this many words count as substantial
pub const SUBSTANTIAL_WORDS: usize = 1000;

/// Volume contributed by one author in the final corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    /// Author label as it appears in keys
    pub author: String,

    /// Tractates with at least one section
    pub tractates: usize,

    /// Sections (entries)
    pub sections: usize,

    /// Text blocks
    pub blocks: usize,

    /// Target-script words
    pub words: usize,
}

/// Authors commenting on one tractate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TractateCoverage {
    /// Tractate label as it appears in keys
    pub tractate: String,

    /// Authors, sorted
    pub authors: Vec<String>,
}

/// Ratios over the final corpus; every field is 0.0 when its denominator is 0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    /// Words per author
    pub words_per_author: f64,

    /// Words per tractate
    pub words_per_tractate: f64,

    /// Sections per author
    pub sections_per_author: f64,

    /// Words per section
    pub words_per_section: f64,

    /// Blocks per section
    pub blocks_per_section: f64,
}

/// The report artifact
///
/// Built from run statistics and the consolidation diff; the per-author
/// breakdown is added from the final corpus with [`Summary::with_corpus`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Documents handed to the extractor
    pub documents_seen: usize,

    /// Documents that contributed sections
    pub documents_successful: usize,

    /// Documents that did not
    pub failures: usize,

    /// Successful documents as a percentage
    pub success_rate: f64,

    /// Sample of failing documents
    pub failure_samples: Vec<ExtractionFailure>,

    /// Distinct authors found during extraction
    pub distinct_authors: usize,

    /// Distinct tractates found during extraction
    pub distinct_works: usize,

    /// Sections in the raw corpus
    pub total_sections: usize,

    /// Blocks in the raw corpus
    pub total_blocks: usize,

    /// Target-script words in the raw corpus
    pub total_words: usize,

    /// Every document that contributed sections, in input order
    pub extractions: Vec<DocumentExtraction>,

    /// Raw-corpus volume per author, before consolidation
    pub scholars: BTreeMap<String, ScholarSummary>,

    /// Entries before consolidation
    pub entries_before: usize,

    /// Entries after consolidation
    pub entries_after: usize,

    /// Entries deleted
    pub deleted: usize,

    /// Entries renamed
    pub renamed: usize,

    /// Entries merged
    pub merged: usize,

    /// Full consolidation diff
    pub consolidation: ConsolidationReport,

    /// Per-author volume, largest first
    pub authors: Vec<AuthorSummary>,

    /// Per-tractate coverage, widest first
    pub coverage: Vec<TractateCoverage>,

    /// Volume ratios
    pub averages: Averages,

    /// Authors above [`SUBSTANTIAL_WORDS`]
    pub substantial_authors: usize,
}

/// Aggregate run statistics and the consolidation diff
///
/// Pure; an empty run yields a zeroed summary.
pub fn summarize(stats: &ExtractionStats, report: &ConsolidationReport) -> Summary {
    Summary {
        documents_seen: stats.documents_seen,
        documents_successful: stats.documents_successful,
        failures: stats.failures(),
        success_rate: stats.success_rate(),
        failure_samples: Vec::new(),
        distinct_authors: stats.distinct_authors(),
        distinct_works: stats.distinct_works(),
        total_sections: stats.total_sections,
        total_blocks: stats.total_blocks,
        total_words: stats.total_words,
        entries_before: report.entries_before,
        entries_after: report.entries_after,
        deleted: report.total_deleted(),
        renamed: report.total_renamed(),
        merged: report.total_merged(),
        consolidation: report.clone(),
        ..Default::default()
    }
}

impl Summary {
    /// Attach the extraction ledger: failure samples, successful documents,
    /// and the pre-consolidation per-author volume
    pub fn with_extraction(mut self, extraction: &ExtractionResult) -> Self {
        self.failure_samples = extraction.failures.clone();
        self.extractions = extraction.documents.clone();
        self.scholars = extraction.scholar_summary();
        self
    }

    /// Add the per-author breakdown of a (consolidated) corpus
    pub fn with_corpus(mut self, corpus: &Corpus, detector: &ScriptDetector) -> Self {
        let mut per_author: BTreeMap<&str, (BTreeSet<&str>, usize, usize, usize)> = BTreeMap::new();
        let mut per_tractate: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

        for (key, blocks) in corpus {
            let words: usize = blocks.iter().map(|b| detector.count_words(b)).sum();
            let entry = per_author.entry(key.author()).or_default();
            entry.0.insert(key.work());
            entry.1 += 1;
            entry.2 += blocks.len();
            entry.3 += words;
            per_tractate.entry(key.work()).or_default().insert(key.author());
        }

        let mut authors: Vec<AuthorSummary> = per_author
            .into_iter()
            .map(|(author, (tractates, sections, blocks, words))| AuthorSummary {
                author: author.to_string(),
                tractates: tractates.len(),
                sections,
                blocks,
                words,
            })
            .collect();
        authors.sort_by(|a, b| b.words.cmp(&a.words).then_with(|| a.author.cmp(&b.author)));

        let mut coverage: Vec<TractateCoverage> = per_tractate
            .into_iter()
            .map(|(tractate, authors)| TractateCoverage {
                tractate: tractate.to_string(),
                authors: authors.into_iter().map(str::to_string).collect(),
            })
            .collect();
        coverage.sort_by(|a, b| {
            b.authors
                .len()
                .cmp(&a.authors.len())
                .then_with(|| a.tractate.cmp(&b.tractate))
        });

        let words: usize = authors.iter().map(|a| a.words).sum();
        let sections = corpus.len();
        self.averages = Averages {
            words_per_author: ratio(words, authors.len()),
            words_per_tractate: ratio(words, coverage.len()),
            sections_per_author: ratio(sections, authors.len()),
            words_per_section: ratio(words, sections),
            blocks_per_section: ratio(corpus.block_count(), sections),
        };
        self.substantial_authors = authors.iter().filter(|a| a.words > SUBSTANTIAL_WORDS).count();
        self.authors = authors;
        self.coverage = coverage;
        self
    }

    /// The `n` largest authors by words
    pub fn top_authors(&self, n: usize) -> &[AuthorSummary] {
        &self.authors[..n.min(self.authors.len())]
    }

    /// Look up one author's volume
    pub fn author(&self, label: &str) -> Option<&AuthorSummary> {
        self.authors
            .iter()
            .find(|a| shas_domain::labels_match(&a.author, label))
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}
