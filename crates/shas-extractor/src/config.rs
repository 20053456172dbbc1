//! Configuration for the Extractor

use crate::script::ScriptRange;
use serde::{Deserialize, Serialize};
use shas_domain::traits::DocumentCriteria;
use std::collections::HashSet;

/// The 36 tractates of the Babylonian Talmud, in canonical order and casing
pub const TALMUD_TRACTATES: [&str; 36] = [
    "Berakhot", "Shabbat", "Eruvin", "Pesachim", "Yoma", "Sukkah",
    "Beitzah", "Rosh Hashanah", "Taanit", "Megillah", "Moed Katan",
    "Chagigah", "Yevamot", "Ketubot", "Nedarim", "Nazir", "Sotah",
    "Gittin", "Kiddushin", "Bava Kamma", "Bava Metzia", "Bava Batra",
    "Sanhedrin", "Makkot", "Shevuot", "Avodah Zarah", "Horayot",
    "Zevachim", "Menachot", "Chullin", "Bekhorot", "Arakhin",
    "Temurah", "Keritot", "Meilah", "Niddah",
];

/// Configuration for the Extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Controlled vocabulary of recognized works
    #[serde(default = "default_works")]
    pub works: Vec<String>,

    /// Qualifying script codepoint range
    #[serde(default)]
    pub script: ScriptRange,

    /// Separator between author and work in titles
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Language tag documents must carry
    #[serde(default = "default_language_tag")]
    pub language_tag: String,

    /// Store field holding the content structure
    #[serde(default = "default_content_field")]
    pub content_field: String,

    /// Maximum failing titles kept as samples in the statistics
    #[serde(default = "default_failure_sample_limit")]
    pub failure_sample_limit: usize,

    /// Compute per-document extraction on the rayon pool
    #[serde(default)]
    pub parallel: bool,
}

fn default_works() -> Vec<String> {
    TALMUD_TRACTATES.iter().map(|s| s.to_string()).collect()
}

fn default_separator() -> String {
    " on ".to_string()
}

fn default_language_tag() -> String {
    "he".to_string()
}

fn default_content_field() -> String {
    "chapter".to_string()
}

fn default_failure_sample_limit() -> usize {
    20
}

impl Default for ExtractorConfig {
    /// Babylonian Talmud tractates, Hebrew block, `" on "` separator
    fn default() -> Self {
        Self {
            works: default_works(),
            script: ScriptRange::default(),
            separator: default_separator(),
            language_tag: default_language_tag(),
            content_field: default_content_field(),
            failure_sample_limit: default_failure_sample_limit(),
            parallel: false,
        }
    }
}

impl ExtractorConfig {
    /// Default configuration with a different vocabulary
    pub fn with_works<I, S>(works: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            works: works.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.works.is_empty() {
            return Err("works must not be empty".to_string());
        }
        let mut seen = HashSet::new();
        for work in &self.works {
            if work.trim().is_empty() {
                return Err("works must not contain blank entries".to_string());
            }
            if !seen.insert(work.trim().to_lowercase()) {
                return Err(format!("duplicate work '{}'", work));
            }
        }
        if self.separator.trim().is_empty() {
            return Err("separator must contain a non-whitespace token".to_string());
        }
        if self.language_tag.trim().is_empty() {
            return Err("language_tag must not be empty".to_string());
        }
        if self.content_field.is_empty() {
            return Err("content_field must not be empty".to_string());
        }
        self.script.validate()?;
        Ok(())
    }

    /// Store filter criteria equivalent to this configuration
    pub fn criteria(&self) -> DocumentCriteria {
        DocumentCriteria {
            works: self.works.clone(),
            separator: self.separator.clone(),
            language_tag: self.language_tag.clone(),
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.works.len(), 36);
        assert_eq!(config.separator, " on ");
        assert_eq!(config.language_tag, "he");
    }

    #[test]
    fn test_empty_works_rejected() {
        let config = ExtractorConfig::with_works(Vec::<String>::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_works_rejected() {
        let config = ExtractorConfig::with_works(["Yoma", "yoma"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_separator_rejected() {
        let mut config = ExtractorConfig::default();
        config.separator = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExtractorConfig::from_toml(
            r#"
            works = ["Sanhedrin"]
            parallel = true

            [script]
            start = 0x0590
            end = 0x05FF
            "#,
        )
        .unwrap();

        assert_eq!(config.works, vec!["Sanhedrin".to_string()]);
        assert!(config.parallel);
        assert_eq!(config.separator, " on ");
        assert_eq!(config.failure_sample_limit, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.works, parsed.works);
        assert_eq!(config.script, parsed.script);
        assert_eq!(config.content_field, parsed.content_field);
    }

    #[test]
    fn test_criteria() {
        let config = ExtractorConfig::with_works(["Yoma"]);
        let criteria = config.criteria();
        assert_eq!(criteria.works, vec!["Yoma".to_string()]);
        assert_eq!(criteria.language_tag, "he");
    }
}
