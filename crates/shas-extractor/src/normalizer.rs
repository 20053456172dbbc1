//! Structure normalization: any content shape to ordered sections

use crate::script::ScriptDetector;
use shas_domain::{ContentNode, SectionEntry, Structure};
use tracing::debug;

/// Result of normalizing one document's content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedContent {
    /// Sections with at least one qualifying block, in source order
    pub sections: Vec<SectionEntry>,

    /// Top-level elements skipped because they were not lists
    pub anomalies: usize,

    /// Items dropped by the script filter (including non-text items)
    pub blocks_filtered: usize,
}

impl NormalizedContent {
    /// True when no section survived
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total blocks across all sections
    pub fn block_count(&self) -> usize {
        self.sections.iter().map(SectionEntry::block_count).sum()
    }
}

/// Converts a [`Structure`] into ordered, script-filtered sections
///
/// - List content: element `i` (1-based) that is a non-empty list becomes
///   `section_i`; positions are never renumbered, so filtered-out elements
///   leave gaps.
/// - Mapping content: each key whose value is a non-empty list keeps its key.
/// - Absent content yields nothing.
///
/// Elements of the wrong shape are skipped and counted; nothing here fails.
#[derive(Debug, Clone, Copy)]
pub struct StructureNormalizer {
    detector: ScriptDetector,
}

impl StructureNormalizer {
    /// Create a normalizer using a detector
    pub fn new(detector: ScriptDetector) -> Self {
        Self { detector }
    }

    /// Normalize a content structure
    pub fn normalize(&self, content: &Structure) -> NormalizedContent {
        let mut out = NormalizedContent::default();

        match content {
            Structure::OrderedList(items) => {
                for (idx, item) in items.iter().enumerate() {
                    let section_id = SectionEntry::positional_id(idx + 1);
                    self.push_section(&mut out, section_id, item);
                }
            }
            Structure::KeyedMapping(entries) => {
                for (key, value) in entries {
                    self.push_section(&mut out, key.clone(), value);
                }
            }
            Structure::Absent => {}
        }

        out
    }

    fn push_section(&self, out: &mut NormalizedContent, section_id: String, node: &ContentNode) {
        let items = match node {
            ContentNode::List(items) => items,
            other => {
                debug!("Skipping non-list element '{}' ({})", section_id, shape_of(other));
                out.anomalies += 1;
                return;
            }
        };
        if items.is_empty() {
            return;
        }

        let blocks: Vec<String> = items
            .iter()
            .filter_map(|item| self.detector.qualifying_text(item))
            .map(str::to_string)
            .collect();
        out.blocks_filtered += items.len() - blocks.len();

        if let Some(entry) = SectionEntry::new(section_id, blocks) {
            out.sections.push(entry);
        }
    }
}

impl Default for StructureNormalizer {
    fn default() -> Self {
        Self::new(ScriptDetector::default())
    }
}

fn shape_of(node: &ContentNode) -> &'static str {
    match node {
        ContentNode::Text(_) => "text",
        ContentNode::List(_) => "list",
        ContentNode::Mapping(_) => "mapping",
        ContentNode::Other => "scalar",
    }
}
