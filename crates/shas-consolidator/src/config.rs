//! Configuration for consolidation
//!
//! Rules are declared as a TOML array of tables tagged by `kind`:
//!
//! ```toml
//! dry_run = false
//!
//! [[rules]]
//! kind = "delete"
//! work_name = "Nuschaot Ktav Yad"
//! reason = "manuscript variants, not commentary"
//!
//! [[rules]]
//! kind = "rename"
//! from_name = "Ritba"
//! to_name = "Ritva"
//!
//! [[rules]]
//! kind = "merge"
//! canonical_author = "Maharsha"
//! source_works = ["Chidushei Agadot", "Chidushei Halachot"]
//! ```

use crate::error::ConsolidationError;
use crate::rules::RuleSet;
use serde::{Deserialize, Serialize};
use shas_domain::ConsolidationRule;

/// One rule as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleDef {
    /// Drop a label
    Delete {
        /// Label to remove
        work_name: String,
        /// Logged with every deletion
        #[serde(default)]
        reason: String,
    },

    /// Rewrite a label
    Rename {
        /// Existing label
        from_name: String,
        /// Replacement label
        to_name: String,
    },

    /// Fold labels under one author
    Merge {
        /// Target author
        canonical_author: String,
        /// Labels to fold in, in concatenation order
        #[serde(default)]
        source_works: Vec<String>,
        /// Why they belong together
        #[serde(default)]
        rationale: String,
    },
}

impl From<RuleDef> for ConsolidationRule {
    fn from(def: RuleDef) -> Self {
        match def {
            RuleDef::Delete { work_name, reason } => ConsolidationRule::Delete { work_name, reason },
            RuleDef::Rename { from_name, to_name } => ConsolidationRule::Rename { from_name, to_name },
            RuleDef::Merge {
                canonical_author,
                source_works,
                rationale,
            } => ConsolidationRule::MergeUnderCanonical {
                canonical_author,
                source_works,
                rationale,
            },
        }
    }
}

impl From<&ConsolidationRule> for RuleDef {
    fn from(rule: &ConsolidationRule) -> Self {
        match rule.clone() {
            ConsolidationRule::Delete { work_name, reason } => RuleDef::Delete { work_name, reason },
            ConsolidationRule::Rename { from_name, to_name } => RuleDef::Rename { from_name, to_name },
            ConsolidationRule::MergeUnderCanonical {
                canonical_author,
                source_works,
                rationale,
            } => RuleDef::Merge {
                canonical_author,
                source_works,
                rationale,
            },
        }
    }
}

/// Configuration for the Consolidator
///
/// # Examples
///
/// ```
/// use shas_consolidator::ConsolidationConfig;
///
/// let config = ConsolidationConfig::default();
/// assert_eq!(config.rules.len(), 2);
/// assert!(!config.dry_run);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidationConfig {
    /// Dry-run mode: report every effect but return the corpus unchanged
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,

    /// Registry of recognized labels; empty disables the check
    #[serde(default)]
    pub known_works: Vec<String>,

    /// Rules, in configured order
    #[serde(default = "default_rules")]
    pub rules: Vec<RuleDef>,
}

fn default_rules() -> Vec<RuleDef> {
    vec![
        RuleDef::Delete {
            work_name: "Nuschaot Ktav Yad".to_string(),
            reason: "manuscript variants, not commentary".to_string(),
        },
        RuleDef::Merge {
            canonical_author: "Maharsha".to_string(),
            source_works: vec![
                "Chidushei Agadot".to_string(),
                "Chidushei Halachot".to_string(),
            ],
            rationale: "Combined halakhic and aggadic innovations".to_string(),
        },
    ]
}

impl Default for ConsolidationConfig {
    /// The standing rule set
    ///
    /// - Delete "Nuschaot Ktav Yad"
    /// - Merge "Chidushei Agadot" and "Chidushei Halachot" under "Maharsha"
    fn default() -> Self {
        Self {
            dry_run: false,
            known_works: Vec::new(),
            rules: default_rules(),
        }
    }
}

impl ConsolidationConfig {
    /// Configuration with no rules at all
    pub fn empty() -> Self {
        Self {
            dry_run: false,
            known_works: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Build a validated rule set
    pub fn rule_set(&self) -> Result<RuleSet, ConsolidationError> {
        let rules = self.rules.iter().cloned().map(ConsolidationRule::from).collect();
        RuleSet::new(rules, &self.known_works)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        self.rule_set().map(|_| ()).map_err(|e| e.to_string())
    }

    /// Load from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Save to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConsolidationConfig::default();
        assert!(!config.dry_run);
        assert!(config.known_works.is_empty());
        assert_eq!(config.rules.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let toml_str = r#"
            dry_run = true

            [[rules]]
            kind = "delete"
            work_name = "Nuschaot Ktav Yad"

            [[rules]]
            kind = "rename"
            from_name = "Ritba"
            to_name = "Ritva"

            [[rules]]
            kind = "merge"
            canonical_author = "Maharsha"
            source_works = ["Chidushei Agadot", "Chidushei Halachot"]
        "#;

        let config = ConsolidationConfig::from_toml(toml_str).unwrap();
        assert!(config.dry_run);
        assert_eq!(config.rules.len(), 3);
        assert_eq!(
            config.rules[0],
            RuleDef::Delete {
                work_name: "Nuschaot Ktav Yad".to_string(),
                reason: String::new()
            }
        );
        assert_eq!(config.rule_set().unwrap().len(), 3);
    }

    #[test]
    fn test_missing_rules_use_defaults() {
        let config = ConsolidationConfig::from_toml("dry_run = false").unwrap();
        assert_eq!(config.rules, ConsolidationConfig::default().rules);
    }

    #[test]
    fn test_explicit_empty_rules() {
        let config = ConsolidationConfig::from_toml("rules = []").unwrap();
        assert!(config.rules.is_empty());
        assert!(config.rule_set().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let toml_str = r#"
            [[rules]]
            kind = "split"
            work_name = "Rashi"
        "#;
        assert!(ConsolidationConfig::from_toml(toml_str).is_err());
    }

    #[test]
    fn test_empty_merge_fails_validation() {
        let toml_str = r#"
            [[rules]]
            kind = "merge"
            canonical_author = "Maharsha"
        "#;
        let config = ConsolidationConfig::from_toml(toml_str).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.contains("no source works"));
    }

    #[test]
    fn test_module_example_is_valid() {
        let toml_str = r#"
            dry_run = false

            [[rules]]
            kind = "delete"
            work_name = "Nuschaot Ktav Yad"
            reason = "manuscript variants, not commentary"

            [[rules]]
            kind = "rename"
            from_name = "Ritba"
            to_name = "Ritva"

            [[rules]]
            kind = "merge"
            canonical_author = "Maharsha"
            source_works = ["Chidushei Agadot", "Chidushei Halachot"]
        "#;
        let config = ConsolidationConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_whitespace_only_rename_rejected() {
        let toml_str = r#"
            [[rules]]
            kind = "rename"
            from_name = "Rabbeinu  Chananel"
            to_name = "Rabbeinu Chananel"
        "#;
        let config = ConsolidationConfig::from_toml(toml_str).unwrap();
        assert!(matches!(config.rule_set(), Err(ConsolidationError::Conflict(_))));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ConsolidationConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ConsolidationConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_rule_conversion() {
        let rule = ConsolidationRule::rename("A", "B");
        let def = RuleDef::from(&rule);
        assert_eq!(ConsolidationRule::from(def), rule);
    }
}
