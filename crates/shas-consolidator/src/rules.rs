//! Validated rule sets

use crate::error::ConsolidationError;
use shas_domain::{labels_match, normalize_label, ConsolidationRule, RuleKind};
use std::collections::{HashMap, HashSet};

/// An ordered, validated list of consolidation rules
///
/// Construction rejects every configuration that would either do nothing
/// silently or break idempotence:
///
/// - blank labels and empty merge sources
/// - labels missing from the known-works registry (when one is given)
/// - a deleted label that any other rule reads or writes
/// - rename chains and cycles (a rename target that is itself renamed)
/// - a label renamed twice, or claimed by two merges
/// - a merge target that is also a merge or rename source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<ConsolidationRule>,
}

impl RuleSet {
    /// Validate rules against an optional registry of known labels
    ///
    /// An empty `known_works` slice disables the registry check.
    pub fn new(
        rules: Vec<ConsolidationRule>,
        known_works: &[String],
    ) -> Result<Self, ConsolidationError> {
        for (index, rule) in rules.iter().enumerate() {
            check_fields(index, rule)?;
            if !known_works.is_empty() {
                for label in rule.source_labels() {
                    if !known_works.iter().any(|k| labels_match(k, label)) {
                        return Err(ConsolidationError::UnknownWork {
                            index,
                            label: label.to_string(),
                        });
                    }
                }
            }
        }
        check_conflicts(&rules)?;

        Ok(Self { rules })
    }

    /// A rule set that changes nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rules in configured order
    pub fn rules(&self) -> &[ConsolidationRule] {
        &self.rules
    }

    /// Rules in application order: every Delete, then every Rename, then
    /// every MergeUnderCanonical, each group in configured order
    pub fn ordered(&self) -> impl Iterator<Item = &ConsolidationRule> + '_ {
        [RuleKind::Delete, RuleKind::Rename, RuleKind::MergeUnderCanonical]
            .into_iter()
            .flat_map(move |kind| self.rules.iter().filter(move |r| r.kind() == kind))
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when there are no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_fields(index: usize, rule: &ConsolidationRule) -> Result<(), ConsolidationError> {
    let blank_field = |field| Err(ConsolidationError::BlankField { index, field });

    match rule {
        ConsolidationRule::Delete { work_name, .. } => {
            if blank(work_name) {
                return blank_field("work_name");
            }
        }
        ConsolidationRule::Rename { from_name, to_name } => {
            if blank(from_name) {
                return blank_field("from_name");
            }
            if blank(to_name) {
                return blank_field("to_name");
            }
            if labels_match(from_name, to_name) {
                return Err(ConsolidationError::Conflict(format!(
                    "rule {} renames '{}' to itself",
                    index, from_name
                )));
            }
        }
        ConsolidationRule::MergeUnderCanonical {
            canonical_author,
            source_works,
            ..
        } => {
            if blank(canonical_author) {
                return blank_field("canonical_author");
            }
            if source_works.is_empty() {
                return Err(ConsolidationError::EmptySources {
                    index,
                    canonical: canonical_author.clone(),
                });
            }
            if source_works.iter().any(|s| blank(s)) {
                return blank_field("source_works");
            }
        }
    }
    Ok(())
}

fn check_conflicts(rules: &[ConsolidationRule]) -> Result<(), ConsolidationError> {
    let mut deleted: HashSet<String> = HashSet::new();
    let mut renamed: HashMap<String, &str> = HashMap::new();
    let mut merged: HashMap<String, &str> = HashMap::new();
    let mut canonicals: HashSet<String> = HashSet::new();

    for rule in rules {
        match rule {
            ConsolidationRule::Delete { work_name, .. } => {
                deleted.insert(normalize_label(work_name));
            }
            ConsolidationRule::Rename { from_name, to_name } => {
                if let Some(previous) = renamed.insert(normalize_label(from_name), to_name) {
                    return Err(ConsolidationError::Conflict(format!(
                        "'{}' is renamed to both '{}' and '{}'",
                        from_name, previous, to_name
                    )));
                }
            }
            ConsolidationRule::MergeUnderCanonical {
                canonical_author,
                source_works,
                ..
            } => {
                canonicals.insert(normalize_label(canonical_author));
                for source in source_works {
                    if let Some(previous) = merged.insert(normalize_label(source), canonical_author) {
                        return Err(ConsolidationError::Conflict(format!(
                            "'{}' is merged into both '{}' and '{}'",
                            source, previous, canonical_author
                        )));
                    }
                }
            }
        }
    }

    for rule in rules {
        if rule.kind() == RuleKind::Delete {
            continue;
        }
        let touched = rule.source_labels().into_iter().chain(rule.target_label());
        for label in touched {
            if deleted.contains(&normalize_label(label)) {
                return Err(ConsolidationError::Conflict(format!(
                    "'{}' is deleted but also used by '{}'",
                    label, rule
                )));
            }
        }
    }

    for to_name in renamed.values() {
        if renamed.contains_key(&normalize_label(to_name)) {
            return Err(ConsolidationError::Conflict(format!(
                "rename target '{}' is itself renamed",
                to_name
            )));
        }
    }

    for canonical in &canonicals {
        if merged.contains_key(canonical) || renamed.contains_key(canonical) {
            return Err(ConsolidationError::Conflict(format!(
                "merge target '{}' is also a merge or rename source",
                canonical
            )));
        }
    }

    Ok(())
}
