//! The extract → consolidate → summarize pipeline shared by commands.

use crate::config::Config;
use crate::error::Result;
use shas_consolidator::{ConsolidationReport, Consolidator};
use shas_domain::{Corpus, SourceDocument};
use shas_extractor::{ExtractionFailure, ExtractionStats, Extractor};
use shas_report::{summarize, Summary};

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// Extraction statistics
    pub stats: ExtractionStats,

    /// Sampled extraction failures
    pub failures: Vec<ExtractionFailure>,

    /// Final corpus (raw when consolidation was skipped or dry-run)
    pub corpus: Corpus,

    /// Consolidation diff
    pub report: ConsolidationReport,

    /// Aggregated summary
    pub summary: Summary,
}

/// Run extraction and, unless skipped, consolidation over documents.
pub fn run_pipeline(
    config: &Config,
    documents: &[SourceDocument],
    skip_consolidation: bool,
) -> Result<PipelineRun> {
    let extractor = Extractor::new(config.extractor.clone())?;
    let consolidator = Consolidator::new(config.consolidation.clone())?;

    let mut extraction = extractor.extract_all(documents);
    let raw = std::mem::take(&mut extraction.corpus);

    let (corpus, report) = if skip_consolidation {
        let report = ConsolidationReport::unchanged(raw.len(), raw.block_count());
        (raw, report)
    } else {
        consolidator.consolidate(raw)
    };

    let summary = summarize(&extraction.stats, &report)
        .with_extraction(&extraction)
        .with_corpus(&corpus, &extractor.detector());

    Ok(PipelineRun {
        stats: extraction.stats,
        failures: extraction.failures,
        corpus,
        report,
        summary,
    })
}
