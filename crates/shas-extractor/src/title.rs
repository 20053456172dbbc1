//! Title resolution: `<author> on <work>` against a controlled vocabulary

use crate::config::ExtractorConfig;
use crate::error::{ExtractorError, TitleParseError, TitleParseReason};
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

/// A successfully resolved title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTitle {
    /// Author component, trimmed
    pub author: String,

    /// Work component in canonical vocabulary casing
    pub work: String,
}

/// Parses document titles into (author, work)
///
/// The title must match `^(.+)<separator>(w1|...|wN)$`, case-insensitively;
/// the separator itself is matched case-insensitively too, so `"Rashi ON Yoma"`
/// resolves like `"Rashi on Yoma"`, as the store filter selects both. The separator
/// must occur exactly once; the resolver reports failures rather than
/// guessing which occurrence was meant.
#[derive(Debug, Clone)]
pub struct TitleResolver {
    separator: Regex,
    pattern: Regex,
    canonical: HashMap<String, String>,
}

impl TitleResolver {
    /// Build a resolver for a vocabulary and separator
    pub fn new<I, S>(works: I, separator: &str) -> Result<Self, ExtractorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if separator.trim().is_empty() {
            return Err(ExtractorError::Config("separator must not be blank".to_string()));
        }

        let mut canonical = HashMap::new();
        let mut alternatives = Vec::new();
        for work in works {
            let work = work.as_ref().trim();
            if work.is_empty() {
                continue;
            }
            canonical.insert(work.to_lowercase(), work.to_string());
            alternatives.push(regex::escape(work));
        }
        if alternatives.is_empty() {
            return Err(ExtractorError::Config("vocabulary must not be empty".to_string()));
        }

        let separator_pattern = RegexBuilder::new(&regex::escape(separator))
            .case_insensitive(true)
            .build()
            .map_err(|e| ExtractorError::Config(format!("separator pattern: {}", e)))?;

        let pattern = RegexBuilder::new(&format!(
            "^(.+){}({})$",
            regex::escape(separator),
            alternatives.join("|")
        ))
        .case_insensitive(true)
        .build()
        .map_err(|e| ExtractorError::Config(format!("title pattern: {}", e)))?;

        Ok(Self {
            separator: separator_pattern,
            pattern,
            canonical,
        })
    }

    /// Build a resolver from extractor configuration
    pub fn from_config(config: &ExtractorConfig) -> Result<Self, ExtractorError> {
        Self::new(&config.works, &config.separator)
    }

    /// Resolve a title into (author, work)
    ///
    /// # Examples
    ///
    /// ```
    /// use shas_extractor::TitleResolver;
    ///
    /// let resolver = TitleResolver::new(["Rosh Hashanah"], " on ").unwrap();
    /// let resolved = resolver.resolve("Ritva on rosh hashanah").unwrap();
    /// assert_eq!(resolved.author, "Ritva");
    /// assert_eq!(resolved.work, "Rosh Hashanah");
    /// ```
    pub fn resolve(&self, title: &str) -> Result<ResolvedTitle, TitleParseError> {
        let mut found = self.separator.find_iter(title);
        let separator = found
            .next()
            .ok_or_else(|| TitleParseError::new(title, TitleParseReason::MissingSeparator))?;
        if found.next().is_some() {
            return Err(TitleParseError::new(title, TitleParseReason::AmbiguousSeparator));
        }

        let author = title[..separator.start()].trim();
        if author.is_empty() {
            return Err(TitleParseError::new(title, TitleParseReason::EmptyAuthor));
        }

        let captures = self
            .pattern
            .captures(title)
            .ok_or_else(|| TitleParseError::new(title, TitleParseReason::UnknownWork))?;
        let matched = captures
            .get(2)
            .map(|m| m.as_str())
            .ok_or_else(|| TitleParseError::new(title, TitleParseReason::UnknownWork))?;
        let work = self
            .canonical
            .get(&matched.to_lowercase())
            .cloned()
            .ok_or_else(|| TitleParseError::new(title, TitleParseReason::UnknownWork))?;

        Ok(ResolvedTitle {
            author: author.to_string(),
            work,
        })
    }

    /// Check whether a title would resolve
    pub fn is_match(&self, title: &str) -> bool {
        self.resolve(title).is_ok()
    }
}

/// Free-function form of [`TitleResolver::resolve`] with the default separator
pub fn resolve<I, S>(title: &str, known_works: I) -> Result<ResolvedTitle, ExtractorError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let resolver = TitleResolver::new(known_works, " on ")?;
    Ok(resolver.resolve(title)?)
}
