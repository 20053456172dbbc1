//! Script detection by codepoint range

use regex::Regex;
use serde::{Deserialize, Serialize};
use shas_domain::ContentNode;
use std::sync::LazyLock;

static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Inclusive codepoint range of the target script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRange {
    /// First codepoint in the range
    pub start: u32,
    /// Last codepoint in the range (inclusive)
    pub end: u32,
}

impl ScriptRange {
    /// The Hebrew Unicode block, U+0590 to U+05FF
    pub const HEBREW: ScriptRange = ScriptRange {
        start: 0x0590,
        end: 0x05FF,
    };

    /// Check whether a character lies in the range
    pub fn contains(&self, c: char) -> bool {
        (self.start..=self.end).contains(&(c as u32))
    }

    /// Validate the range
    pub fn validate(&self) -> Result<(), String> {
        if self.start > self.end {
            return Err(format!(
                "script range start {:#06X} is after end {:#06X}",
                self.start, self.end
            ));
        }
        if self.end > char::MAX as u32 {
            return Err(format!("script range end {:#X} is not a codepoint", self.end));
        }
        Ok(())
    }
}

impl Default for ScriptRange {
    fn default() -> Self {
        ScriptRange::HEBREW
    }
}

/// Classifies text as belonging to the target script
///
/// A block qualifies as soon as it holds a single in-range codepoint, mixed
/// script included. This favors recall: a Latin paragraph quoting one Hebrew
/// word is kept whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptDetector {
    range: ScriptRange,
}

impl ScriptDetector {
    /// Create a detector for a range
    pub fn new(range: ScriptRange) -> Self {
        Self { range }
    }

    /// The configured range
    pub fn range(&self) -> ScriptRange {
        self.range
    }

    /// True iff `text` contains at least one in-range codepoint
    ///
    /// Empty and whitespace-only input is false.
    pub fn is_target_script(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        text.chars().any(|c| self.range.contains(c))
    }

    /// Apply the detector to a content node; non-text nodes never qualify
    pub fn qualifying_text<'a>(&self, node: &'a ContentNode) -> Option<&'a str> {
        node.as_text().filter(|text| self.is_target_script(text))
    }

    /// Count target-script words
    ///
    /// Markup tags are stripped, every character that is neither in range
    /// nor whitespace becomes a space, and the remaining tokens are counted.
    pub fn count_words(&self, text: &str) -> usize {
        let stripped = MARKUP_RE.replace_all(text, "");
        let cleaned: String = stripped
            .chars()
            .map(|c| {
                if self.range.contains(c) || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();
        cleaned.split_whitespace().count()
    }
}

/// Free-function form of [`ScriptDetector::is_target_script`]
pub fn is_target_script(text: &str, range: ScriptRange) -> bool {
    ScriptDetector::new(range).is_target_script(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hebrew_detected() {
        let detector = ScriptDetector::default();
        assert!(detector.is_target_script("שלום"));
        assert!(detector.is_target_script("hello שלום world"));
    }

    #[test]
    fn test_non_hebrew_rejected() {
        let detector = ScriptDetector::default();
        assert!(!detector.is_target_script("hello"));
        assert!(!detector.is_target_script("Привет"));
        assert!(!detector.is_target_script("123"));
    }

    #[test]
    fn test_empty_and_whitespace_fail_closed() {
        let detector = ScriptDetector::default();
        assert!(!detector.is_target_script(""));
        assert!(!detector.is_target_script("   \n\t"));
    }

    #[test]
    fn test_range_boundaries_inclusive() {
        let detector = ScriptDetector::default();
        assert!(detector.is_target_script("\u{0590}"));
        assert!(detector.is_target_script("\u{05FF}"));
        assert!(!detector.is_target_script("\u{058F}"));
        assert!(!detector.is_target_script("\u{0600}"));
    }

    #[test]
    fn test_non_text_nodes_never_qualify() {
        let detector = ScriptDetector::default();
        assert_eq!(detector.qualifying_text(&ContentNode::Other), None);
        assert_eq!(detector.qualifying_text(&ContentNode::text_list(["שלום"])), None);
        assert_eq!(detector.qualifying_text(&ContentNode::text("שלום")), Some("שלום"));
    }

    #[test]
    fn test_custom_range() {
        // Arabic block
        let detector = ScriptDetector::new(ScriptRange { start: 0x0600, end: 0x06FF });
        assert!(detector.is_target_script("سلام"));
        assert!(!detector.is_target_script("שלום"));
    }

    #[test]
    fn test_count_words_strips_markup_and_foreign_text() {
        let detector = ScriptDetector::default();
        assert_eq!(detector.count_words("<b>אמר</b> רבא"), 2);
        assert_eq!(detector.count_words("Rava said: אמר רבא, 123"), 2);
        assert_eq!(detector.count_words("no hebrew here"), 0);
        assert_eq!(detector.count_words(""), 0);
    }

    #[test]
    fn test_range_validation() {
        assert!(ScriptRange::HEBREW.validate().is_ok());
        assert!(ScriptRange { start: 10, end: 5 }.validate().is_err());
        assert!(ScriptRange { start: 0, end: 0x11_0000 }.validate().is_err());
    }
}
