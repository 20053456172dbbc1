//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the engine and infrastructure.
//! Implementations live in other crates.

use crate::{CanonicalKey, SourceDocument};

/// Criteria equivalent to the store filter
/// `title =~ /^(.+) on (w1|...|wN)$/i AND language == tag`
#[derive(Debug, Clone, Default)]
pub struct DocumentCriteria {
    /// Recognized works (tractates)
    pub works: Vec<String>,

    /// Title separator between author and work
    pub separator: String,

    /// Required language tag
    pub language_tag: String,
}

/// Trait for fetching source documents
///
/// Implemented by the infrastructure layer (document store or export reader).
/// The engine consumes an already-materialized, finite sequence.
pub trait DocumentSource {
    /// Error type for source operations
    type Error;

    /// Fetch every document matching the criteria
    fn fetch(&self, criteria: &DocumentCriteria) -> Result<Vec<SourceDocument>, Self::Error>;
}

/// Trait for persisting the corpus
///
/// Implemented by the infrastructure layer (filesystem writer).
pub trait CorpusSink {
    /// Error type for sink operations
    type Error;

    /// Persist all entries of one (author, work) pair
    fn write_work(
        &mut self,
        author: &str,
        work: &str,
        entries: &[(&CanonicalKey, &Vec<String>)],
    ) -> Result<(), Self::Error>;
}
