//! In-process equivalent of the document store filter

use crate::error::ExtractorError;
use regex::{Regex, RegexBuilder};
use shas_domain::traits::DocumentCriteria;
use shas_domain::SourceDocument;

/// Compiled `title =~ /^(.+) on (w1|...|wN)$/i AND language == tag`
///
/// Document sources that cannot push the filter down to a database (such as
/// an export file) apply this instead.
#[derive(Debug, Clone)]
pub struct DocumentQuery {
    title_pattern: Regex,
    language_tag: String,
}

impl DocumentQuery {
    /// Compile criteria into a query
    pub fn new(criteria: &DocumentCriteria) -> Result<Self, ExtractorError> {
        if criteria.works.is_empty() {
            return Err(ExtractorError::Config("query needs at least one work".to_string()));
        }
        let alternatives: Vec<String> = criteria.works.iter().map(|w| regex::escape(w)).collect();
        let title_pattern = RegexBuilder::new(&format!(
            "^(.+){}({})$",
            regex::escape(&criteria.separator),
            alternatives.join("|")
        ))
        .case_insensitive(true)
        .build()
        .map_err(|e| ExtractorError::Config(format!("query pattern: {}", e)))?;

        Ok(Self {
            title_pattern,
            language_tag: criteria.language_tag.clone(),
        })
    }

    /// The title pattern as a string, for logging
    pub fn pattern(&self) -> &str {
        self.title_pattern.as_str()
    }

    /// Check a document against the filter
    pub fn matches(&self, doc: &SourceDocument) -> bool {
        doc.language_tag == self.language_tag && self.title_pattern.is_match(&doc.title)
    }

    /// Keep only matching documents, preserving order
    pub fn apply(&self, documents: Vec<SourceDocument>) -> Vec<SourceDocument> {
        documents.into_iter().filter(|d| self.matches(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractorConfig;
    use shas_domain::Structure;

    fn query() -> DocumentQuery {
        DocumentQuery::new(&ExtractorConfig::default().criteria()).unwrap()
    }

    #[test]
    fn test_matches_title_and_language() {
        let q = query();
        assert!(q.matches(&SourceDocument::new("Rashi on Berakhot", "he", Structure::Absent)));
        assert!(q.matches(&SourceDocument::new("rashi ON bava kamma", "he", Structure::Absent)));
        assert!(!q.matches(&SourceDocument::new("Rashi on Berakhot", "en", Structure::Absent)));
        assert!(!q.matches(&SourceDocument::new("Rashi on Genesis", "he", Structure::Absent)));
    }

    #[test]
    fn test_apply_preserves_order() {
        let docs = vec![
            SourceDocument::new("Ran on Nedarim", "he", Structure::Absent),
            SourceDocument::new("Rashi on Exodus", "he", Structure::Absent),
            SourceDocument::new("Meiri on Yoma", "he", Structure::Absent),
        ];
        let kept = query().apply(docs);
        let titles: Vec<&str> = kept.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["Ran on Nedarim", "Meiri on Yoma"]);
    }

    #[test]
    fn test_empty_works_rejected() {
        let criteria = DocumentCriteria {
            works: Vec::new(),
            separator: " on ".to_string(),
            language_tag: "he".to_string(),
        };
        assert!(DocumentQuery::new(&criteria).is_err());
    }
}
