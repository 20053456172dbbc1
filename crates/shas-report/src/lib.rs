//! Shas Report
//!
//! Aggregates extraction statistics, the consolidation diff and the final
//! corpus into one [`Summary`], serializable as the JSON report artifact and
//! renderable for the terminal.
//!
//! ```
//! use shas_consolidator::ConsolidationReport;
//! use shas_extractor::ExtractionStats;
//! use shas_report::summarize;
//!
//! let summary = summarize(&ExtractionStats::default(), &ConsolidationReport::default());
//! assert_eq!(summary.documents_seen, 0);
//! assert_eq!(summary.averages.words_per_section, 0.0);
//! ```

#![warn(missing_docs)]

mod summary;
mod render;

pub use summary::{summarize, AuthorSummary, Averages, Summary, TractateCoverage, SUBSTANTIAL_WORDS};
