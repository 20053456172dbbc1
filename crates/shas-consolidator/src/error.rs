//! Error types for consolidation

use thiserror::Error;

/// Errors that can occur while loading or validating consolidation rules
///
/// All of these are fatal and raised before any entry is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsolidationError {
    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required rule field is empty
    #[error("Rule {index}: '{field}' must not be blank")]
    BlankField {
        /// Position of the rule in the configured list
        index: usize,
        /// Offending field
        field: &'static str,
    },

    /// A merge rule with nothing to merge
    #[error("Rule {index}: merge into '{canonical}' has no source works")]
    EmptySources {
        /// Position of the rule in the configured list
        index: usize,
        /// Merge target
        canonical: String,
    },

    /// A rule names a label outside the known registry
    #[error("Rule {index}: unknown work '{label}'")]
    UnknownWork {
        /// Position of the rule in the configured list
        index: usize,
        /// Unrecognized label
        label: String,
    },

    /// Two rules contradict each other
    #[error("Conflicting rules: {0}")]
    Conflict(String),
}
