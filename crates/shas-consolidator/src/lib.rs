//! Shas Consolidator
//!
//! Rule-driven cleanup of the raw corpus produced by the extractor.
//!
//! # Overview
//!
//! The Consolidator is responsible for:
//! - **Deletion**: dropping labels that are not commentary (manuscript variants)
//! - **Renaming**: unifying spellings of the same commentary label
//! - **Merging**: folding several labels under one canonical author
//! - **Reporting**: recording what every rule did, for the summary narrative
//!
//! Rules match the author component of a [`CanonicalKey`](shas_domain::CanonicalKey),
//! case-insensitively and treating whitespace and underscores alike.
//!
//! # Usage
//!
//! ```
//! use shas_consolidator::{ConsolidationConfig, Consolidator};
//! use shas_domain::Corpus;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let consolidator = Consolidator::new(ConsolidationConfig::default())?;
//! let (corpus, report) = consolidator.consolidate(Corpus::new());
//!
//! assert!(corpus.is_empty());
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [consolidation]
//! dry_run = false
//! known_works = []
//!
//! [[consolidation.rules]]
//! kind = "delete"
//! work_name = "Nuschaot Ktav Yad"
//! reason = "manuscript variants, not commentary"
//!
//! [[consolidation.rules]]
//! kind = "merge"
//! canonical_author = "Maharsha"
//! source_works = ["Chidushei Agadot", "Chidushei Halachot"]
//! ```
//!
//! Invalid rule sets (empty merges, unknown labels, contradictory rules) are
//! rejected with a [`ConsolidationError`] before any entry is touched.

#![warn(missing_docs)]

mod error;
mod config;
mod rules;
mod report;
mod consolidator;

pub use error::ConsolidationError;
pub use config::{ConsolidationConfig, RuleDef};
pub use rules::RuleSet;
pub use report::{ConsolidationReport, RuleEffect};
pub use consolidator::{consolidate, Consolidator};
