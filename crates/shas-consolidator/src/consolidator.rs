//! Core consolidation engine

use crate::{ConsolidationConfig, ConsolidationError, ConsolidationReport, RuleSet};
use crate::report::RuleEffect;
use shas_domain::{CanonicalKey, ConsolidationRule, Corpus};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Applies a validated rule set to a raw corpus
///
/// Rules run in a fixed order: every Delete, then every Rename, then every
/// MergeUnderCanonical. Within a group, configured order applies. Re-keying
/// onto a key that already exists concatenates blocks (existing first)
/// instead of overwriting.
///
/// The pass is idempotent: feeding the output back through the same rule
/// set changes nothing.
///
/// # Examples
///
/// ```
/// use shas_consolidator::{ConsolidationConfig, Consolidator};
/// use shas_domain::{CanonicalKey, Corpus};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let consolidator = Consolidator::new(ConsolidationConfig::default())?;
///
/// let mut raw = Corpus::new();
/// raw.insert(CanonicalKey::new("Chidushei Agadot", "Shabbat", "section_1"), vec!["א".into()]);
/// raw.insert(CanonicalKey::new("Nuschaot Ktav Yad", "Shabbat", "section_1"), vec!["ב".into()]);
///
/// let (corpus, report) = consolidator.consolidate(raw);
/// assert!(corpus.get_rendered("Maharsha_Shabbat.section_1").is_some());
/// assert_eq!(report.total_deleted(), 1);
/// println!("{}", report.summary());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Consolidator {
    rules: RuleSet,
    dry_run: bool,
}

impl Consolidator {
    /// Create a Consolidator, validating the configured rules
    pub fn new(config: ConsolidationConfig) -> Result<Self, ConsolidationError> {
        Ok(Self {
            rules: config.rule_set()?,
            dry_run: config.dry_run,
        })
    }

    /// Create a Consolidator from an already validated rule set
    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            rules,
            dry_run: false,
        }
    }

    /// Report effects without changing the corpus
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// The rule set in use
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// True in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Apply every rule
    ///
    /// In dry-run mode the report is computed in full and the input corpus
    /// is returned as is.
    pub fn consolidate(&self, raw: Corpus) -> (Corpus, ConsolidationReport) {
        if self.dry_run {
            let (_, mut report) = apply(raw.clone(), &self.rules);
            report.dry_run = true;
            info!(
                "Dry run: would consolidate {} entries into {}",
                report.entries_before, report.entries_after
            );
            return (raw, report);
        }
        apply(raw, &self.rules)
    }
}

/// Apply a rule set to a raw corpus
pub fn consolidate(raw: Corpus, rules: &RuleSet) -> (Corpus, ConsolidationReport) {
    apply(raw, rules)
}

fn apply(mut corpus: Corpus, rules: &RuleSet) -> (Corpus, ConsolidationReport) {
    let mut report = ConsolidationReport {
        entries_before: corpus.len(),
        blocks_before: corpus.block_count(),
        ..Default::default()
    };
    info!(
        "Consolidating {} entries with {} rules",
        report.entries_before,
        rules.len()
    );

    for rule in rules.ordered() {
        let mut effect = RuleEffect::for_rule(rule);
        match rule {
            ConsolidationRule::Delete { work_name, reason } => {
                for key in corpus.keys_for_author(work_name) {
                    if let Some(blocks) = corpus.remove(&key) {
                        debug!("Deleting {}", key);
                        effect.entries += 1;
                        effect.blocks += blocks.len();
                    }
                }
                if effect.entries > 0 {
                    info!("Deleted {} entries of '{}': {}", effect.entries, work_name, reason);
                }
            }
            ConsolidationRule::Rename { from_name, to_name } => {
                rekey(&mut corpus, from_name, to_name, &mut effect, None);
                if effect.entries > 0 {
                    info!("Renamed {} entries '{}' -> '{}'", effect.entries, from_name, to_name);
                }
            }
            ConsolidationRule::MergeUnderCanonical {
                canonical_author,
                source_works,
                ..
            } => {
                for source in source_works {
                    rekey(
                        &mut corpus,
                        source,
                        canonical_author,
                        &mut effect,
                        Some(&mut report.provenance),
                    );
                }
                if effect.entries > 0 {
                    info!(
                        "Merged {} entries into '{}' ({} concatenated)",
                        effect.entries, canonical_author, effect.collisions
                    );
                }
            }
        }
        report.effects.push(effect);
    }

    report.entries_after = corpus.len();
    report.blocks_after = corpus.block_count();
    info!(
        "Consolidation complete: {} -> {} entries",
        report.entries_before, report.entries_after
    );
    (corpus, report)
}

/// Move every entry of `from` under `to`, concatenating onto existing keys
fn rekey(
    corpus: &mut Corpus,
    from: &str,
    to: &str,
    effect: &mut RuleEffect,
    mut provenance: Option<&mut BTreeMap<String, Vec<String>>>,
) {
    for key in corpus.keys_for_author(from) {
        let Some(blocks) = corpus.remove(&key) else {
            continue;
        };
        let target: CanonicalKey = key.with_author(to);
        effect.entries += 1;
        effect.blocks += blocks.len();

        let existed = corpus.append(target.clone(), blocks);
        if existed {
            effect.collisions += 1;
            debug!("Concatenating {} onto {}", key, target);
        }

        if let Some(provenance) = provenance.as_deref_mut() {
            let sources = provenance.entry(target.to_string()).or_default();
            if existed && sources.is_empty() {
                sources.push(to.to_string());
            }
            sources.push(from.to_string());
        }
    }
}
