//! Section entries

/// One section of a document: an identifier and its qualifying text blocks
///
/// The identifier is `section_N` for list-shaped content (1-based source
/// position) or the original key for mapping-shaped content. Blocks keep
/// source order. An entry is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    section_id: String,
    blocks: Vec<String>,
}

impl SectionEntry {
    /// Create an entry, or `None` if there are no blocks
    pub fn new(section_id: impl Into<String>, blocks: Vec<String>) -> Option<Self> {
        if blocks.is_empty() {
            return None;
        }
        Some(Self {
            section_id: section_id.into(),
            blocks,
        })
    }

    /// Positional identifier for the 1-based index `position`
    pub fn positional_id(position: usize) -> String {
        format!("section_{}", position)
    }

    /// Section identifier
    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    /// Text blocks, in source order
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// Number of blocks (always at least one)
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_blocks_rejected() {
        assert!(SectionEntry::new("section_1", Vec::new()).is_none());
    }

    #[test]
    fn test_entry_keeps_order() {
        let entry = SectionEntry::new("Daf_2a", vec!["א".to_string(), "ב".to_string()]).unwrap();
        assert_eq!(entry.section_id(), "Daf_2a");
        assert_eq!(entry.blocks(), &["א".to_string(), "ב".to_string()]);
        assert_eq!(entry.block_count(), 2);
    }

    #[test]
    fn test_positional_id() {
        assert_eq!(SectionEntry::positional_id(7), "section_7");
    }
}
