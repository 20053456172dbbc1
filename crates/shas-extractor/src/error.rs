//! Error types for the Extractor

use thiserror::Error;

/// Why a title could not be resolved into (author, work)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleParseReason {
    /// The separator does not occur
    MissingSeparator,
    /// The separator occurs more than once
    AmbiguousSeparator,
    /// Nothing before the separator
    EmptyAuthor,
    /// The trailing component is not in the vocabulary
    UnknownWork,
}

impl TitleParseReason {
    /// Short description
    pub fn as_str(&self) -> &'static str {
        match self {
            TitleParseReason::MissingSeparator => "missing separator",
            TitleParseReason::AmbiguousSeparator => "ambiguous separator",
            TitleParseReason::EmptyAuthor => "empty author",
            TitleParseReason::UnknownWork => "unknown work",
        }
    }
}

/// A title that does not match `<author> on <work>` against the vocabulary
///
/// Recoverable: the document is skipped and the run continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot parse title '{title}': {}", reason.as_str())]
pub struct TitleParseError {
    /// The offending title
    pub title: String,

    /// What was wrong with it
    pub reason: TitleParseReason,
}

impl TitleParseError {
    pub(crate) fn new(title: &str, reason: TitleParseReason) -> Self {
        Self {
            title: title.to_string(),
            reason,
        }
    }
}

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Title could not be resolved
    #[error(transparent)]
    TitleParse(#[from] TitleParseError),

    /// Structure normalization yielded no sections
    #[error("No qualifying sections in '{0}'")]
    EmptyExtraction(String),

    /// A store record could not be decoded
    #[error("Invalid document at position {position}: {reason}")]
    InvalidDocument {
        /// Zero-based record position in the export
        position: usize,
        /// What was wrong
        reason: String,
    },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_parse_error_message() {
        let err = TitleParseError::new("Rashi", TitleParseReason::MissingSeparator);
        assert_eq!(err.to_string(), "Cannot parse title 'Rashi': missing separator");

        let wrapped: ExtractorError = err.into();
        assert!(wrapped.to_string().contains("missing separator"));
    }
}
