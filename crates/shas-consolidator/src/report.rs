//! Consolidation report

use serde::{Deserialize, Serialize};
use shas_domain::{ConsolidationRule, RuleKind};
use std::collections::BTreeMap;

/// What one rule did to the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEffect {
    /// `delete`, `rename` or `merge`
    pub kind: String,

    /// One-line description of the rule
    pub description: String,

    /// Entries removed or re-keyed
    pub entries: usize,

    /// Blocks carried by those entries
    pub blocks: usize,

    /// Entries concatenated onto a key that already existed
    pub collisions: usize,
}

impl RuleEffect {
    pub(crate) fn for_rule(rule: &ConsolidationRule) -> Self {
        Self {
            kind: rule.kind().as_str().to_string(),
            description: rule.to_string(),
            entries: 0,
            blocks: 0,
            collisions: 0,
        }
    }

    fn is(&self, kind: RuleKind) -> bool {
        self.kind == kind.as_str()
    }
}

/// Before/after accounting of one consolidation pass
///
/// Effects are listed in application order (deletes, renames, merges).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidationReport {
    /// One entry per rule
    pub effects: Vec<RuleEffect>,

    /// Entries in the raw corpus
    pub entries_before: usize,

    /// Entries in the consolidated corpus
    pub entries_after: usize,

    /// Blocks in the raw corpus
    pub blocks_before: usize,

    /// Blocks in the consolidated corpus
    pub blocks_after: usize,

    /// Merged key → labels that contributed blocks, in concatenation order
    pub provenance: BTreeMap<String, Vec<String>>,

    /// True when the corpus was returned unchanged
    pub dry_run: bool,
}

impl ConsolidationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Report for a corpus that went through no rules
    pub fn unchanged(entries: usize, blocks: usize) -> Self {
        Self {
            entries_before: entries,
            entries_after: entries,
            blocks_before: blocks,
            blocks_after: blocks,
            ..Default::default()
        }
    }

    fn total(&self, kind: RuleKind) -> usize {
        self.effects.iter().filter(|e| e.is(kind)).map(|e| e.entries).sum()
    }

    /// Entries removed by Delete rules
    pub fn total_deleted(&self) -> usize {
        self.total(RuleKind::Delete)
    }

    /// Entries re-keyed by Rename rules
    pub fn total_renamed(&self) -> usize {
        self.total(RuleKind::Rename)
    }

    /// Entries re-keyed by MergeUnderCanonical rules
    pub fn total_merged(&self) -> usize {
        self.total(RuleKind::MergeUnderCanonical)
    }

    /// Entries concatenated onto existing keys
    pub fn total_collisions(&self) -> usize {
        self.effects.iter().map(|e| e.collisions).sum()
    }

    /// Delete effects that removed something
    pub fn deletions(&self) -> impl Iterator<Item = &RuleEffect> {
        self.effects
            .iter()
            .filter(|e| e.is(RuleKind::Delete) && e.entries > 0)
    }

    /// True when no rule matched anything
    pub fn is_noop(&self) -> bool {
        self.effects.iter().all(|e| e.entries == 0)
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Consolidation Summary".to_string(),
            "=====================".to_string(),
            format!("Entries: {} -> {}", self.entries_before, self.entries_after),
            format!("Blocks: {} -> {}", self.blocks_before, self.blocks_after),
        ];
        if self.dry_run {
            lines.push("Dry run: corpus left unchanged".to_string());
        }
        lines.push(String::new());

        if !self.effects.is_empty() {
            lines.push("Rules applied:".to_string());
            for effect in &self.effects {
                let mut line = format!(
                    "  {}: {} entries, {} blocks",
                    effect.description, effect.entries, effect.blocks
                );
                if effect.collisions > 0 {
                    line.push_str(&format!(", {} concatenated", effect.collisions));
                }
                lines.push(line);
            }
            lines.push(String::new());
        }

        lines.push(format!("Deleted: {}", self.total_deleted()));
        lines.push(format!("Renamed: {}", self.total_renamed()));
        lines.push(format!("Merged: {}", self.total_merged()));

        let concatenated: Vec<_> = self.provenance.iter().filter(|(_, s)| s.len() > 1).collect();
        if !concatenated.is_empty() {
            lines.push(String::new());
            lines.push("Concatenated keys:".to_string());
            for (key, sources) in concatenated {
                lines.push(format!("  {} <- {}", key, sources.join(" + ")));
            }
        }

        lines.join("\n")
    }
}
