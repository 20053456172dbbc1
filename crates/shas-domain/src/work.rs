//! Work records: all sections discovered for one (author, work) pair

use crate::key::CanonicalKey;
use crate::section::SectionEntry;

/// Sections accumulated for one (author, work) pair
///
/// Created on the first successful title resolution for the pair. A pair
/// usually maps to a single source document, but several documents may
/// contribute sections; a repeated section identifier replaces the earlier
/// one (last write wins).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkRecord {
    /// Author component as resolved from the title
    pub author: String,

    /// Work component in its canonical vocabulary casing
    pub work: String,

    sections: Vec<SectionEntry>,
}

impl WorkRecord {
    /// Create an empty record
    pub fn new(author: impl Into<String>, work: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            work: work.into(),
            sections: Vec::new(),
        }
    }

    /// Insert a section, returning the entry it replaced, if any
    pub fn upsert(&mut self, entry: SectionEntry) -> Option<SectionEntry> {
        match self
            .sections
            .iter_mut()
            .find(|existing| existing.section_id() == entry.section_id())
        {
            Some(slot) => Some(std::mem::replace(slot, entry)),
            None => {
                self.sections.push(entry);
                None
            }
        }
    }

    /// Sections in first-seen order
    pub fn sections(&self) -> &[SectionEntry] {
        &self.sections
    }

    /// Number of sections
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Total blocks across all sections
    pub fn block_count(&self) -> usize {
        self.sections.iter().map(SectionEntry::block_count).sum()
    }

    /// Canonical key for one of this record's sections
    pub fn key_for(&self, section_id: &str) -> CanonicalKey {
        CanonicalKey::new(&self.author, &self.work, section_id)
    }
}
