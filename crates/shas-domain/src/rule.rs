//! Consolidation rules

use std::fmt;

/// The three rule kinds, in the order they are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleKind {
    /// Remove entries
    Delete,
    /// Rewrite a label
    Rename,
    /// Re-key several labels under one canonical author
    MergeUnderCanonical,
}

impl RuleKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Delete => "delete",
            RuleKind::Rename => "rename",
            RuleKind::MergeUnderCanonical => "merge",
        }
    }
}

/// A static consolidation rule
///
/// Rules name commentary labels (the `<author>` side of `<author> on <work>`).
/// Validation lives with the consolidation engine; this type only carries data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsolidationRule {
    /// Drop every entry carrying `work_name`
    Delete {
        /// Label to remove
        work_name: String,
        /// Why it is removed (logged)
        reason: String,
    },

    /// Rewrite `from_name` to `to_name`
    Rename {
        /// Existing label
        from_name: String,
        /// Replacement label
        to_name: String,
    },

    /// Re-key every entry of `source_works` under `canonical_author`
    MergeUnderCanonical {
        /// Target author
        canonical_author: String,
        /// Labels to fold in; list order is concatenation order
        source_works: Vec<String>,
        /// Why they belong together
        rationale: String,
    },
}

impl ConsolidationRule {
    /// Convenience constructor for a Delete rule
    pub fn delete(work_name: impl Into<String>, reason: impl Into<String>) -> Self {
        ConsolidationRule::Delete {
            work_name: work_name.into(),
            reason: reason.into(),
        }
    }

    /// Convenience constructor for a Rename rule
    pub fn rename(from_name: impl Into<String>, to_name: impl Into<String>) -> Self {
        ConsolidationRule::Rename {
            from_name: from_name.into(),
            to_name: to_name.into(),
        }
    }

    /// Convenience constructor for a MergeUnderCanonical rule
    pub fn merge<I, S>(canonical_author: impl Into<String>, source_works: I, rationale: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConsolidationRule::MergeUnderCanonical {
            canonical_author: canonical_author.into(),
            source_works: source_works.into_iter().map(Into::into).collect(),
            rationale: rationale.into(),
        }
    }

    /// Rule kind
    pub fn kind(&self) -> RuleKind {
        match self {
            ConsolidationRule::Delete { .. } => RuleKind::Delete,
            ConsolidationRule::Rename { .. } => RuleKind::Rename,
            ConsolidationRule::MergeUnderCanonical { .. } => RuleKind::MergeUnderCanonical,
        }
    }

    /// Labels this rule reads from the corpus
    pub fn source_labels(&self) -> Vec<&str> {
        match self {
            ConsolidationRule::Delete { work_name, .. } => vec![work_name.as_str()],
            ConsolidationRule::Rename { from_name, .. } => vec![from_name.as_str()],
            ConsolidationRule::MergeUnderCanonical { source_works, .. } => {
                source_works.iter().map(String::as_str).collect()
            }
        }
    }

    /// Label this rule writes into the corpus, if any
    pub fn target_label(&self) -> Option<&str> {
        match self {
            ConsolidationRule::Delete { .. } => None,
            ConsolidationRule::Rename { to_name, .. } => Some(to_name),
            ConsolidationRule::MergeUnderCanonical { canonical_author, .. } => Some(canonical_author),
        }
    }
}

impl fmt::Display for ConsolidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsolidationRule::Delete { work_name, reason } => {
                write!(f, "delete '{}' ({})", work_name, reason)
            }
            ConsolidationRule::Rename { from_name, to_name } => {
                write!(f, "rename '{}' -> '{}'", from_name, to_name)
            }
            ConsolidationRule::MergeUnderCanonical {
                canonical_author,
                source_works,
                ..
            } => write!(f, "merge [{}] -> '{}'", source_works.join(", "), canonical_author),
        }
    }
}
