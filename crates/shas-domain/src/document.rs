//! Source documents as handed over by the document store

/// A node inside a document's content tree
///
/// Store records are schema-loose: a list may hold strings, nested lists,
/// mappings, or scalars. Anything that is not one of the first three shapes
/// is kept as [`ContentNode::Other`] so it can be skipped without guessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    /// A text block
    Text(String),

    /// An ordered list of nodes
    List(Vec<ContentNode>),

    /// A keyed mapping, in source order
    Mapping(Vec<(String, ContentNode)>),

    /// Numbers, booleans, nulls
    Other,
}

impl ContentNode {
    /// Build a text node
    pub fn text(value: impl Into<String>) -> Self {
        ContentNode::Text(value.into())
    }

    /// Build a list of text nodes
    pub fn text_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ContentNode::List(items.into_iter().map(ContentNode::text).collect())
    }

    /// Get the text payload, if this node is a text block
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentNode::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// The top-level shape of a document's content field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Structure {
    /// Positional sections (`section_1`, `section_2`, ...)
    OrderedList(Vec<ContentNode>),

    /// Keyed sections, in source order
    KeyedMapping(Vec<(String, ContentNode)>),

    /// No content field
    #[default]
    Absent,
}

impl Structure {
    /// Short shape name, used in log lines
    pub fn shape(&self) -> &'static str {
        match self {
            Structure::OrderedList(_) => "list",
            Structure::KeyedMapping(_) => "mapping",
            Structure::Absent => "absent",
        }
    }

    /// Number of top-level elements
    pub fn len(&self) -> usize {
        match self {
            Structure::OrderedList(items) => items.len(),
            Structure::KeyedMapping(entries) => entries.len(),
            Structure::Absent => 0,
        }
    }

    /// True when there are no top-level elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A document as returned by the store. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Document title, expected as `<author> on <work>`
    pub title: String,

    /// Language tag (e.g. `he`)
    pub language_tag: String,

    /// Content structure
    pub content: Structure,
}

impl SourceDocument {
    /// Create a new document
    pub fn new(title: impl Into<String>, language_tag: impl Into<String>, content: Structure) -> Self {
        Self {
            title: title.into(),
            language_tag: language_tag.into(),
            content,
        }
    }

    /// Convenience constructor for list-shaped content of text lists
    pub fn with_sections<I, S>(title: impl Into<String>, language_tag: impl Into<String>, sections: I) -> Self
    where
        I: IntoIterator<Item = Vec<S>>,
        S: Into<String>,
    {
        let items = sections
            .into_iter()
            .map(ContentNode::text_list)
            .collect();
        Self::new(title, language_tag, Structure::OrderedList(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_sections_builds_ordered_list() {
        let doc = SourceDocument::with_sections("Rashi on Berakhot", "he", vec![vec!["א"], vec!["ב", "ג"]]);
        assert_eq!(doc.content.shape(), "list");
        assert_eq!(doc.content.len(), 2);

        match &doc.content {
            Structure::OrderedList(items) => {
                assert_eq!(items[1], ContentNode::text_list(["ב", "ג"]));
            }
            other => panic!("Expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_absent_is_empty() {
        assert!(Structure::Absent.is_empty());
        assert_eq!(Structure::default(), Structure::Absent);
    }

    #[test]
    fn test_as_text() {
        assert_eq!(ContentNode::text("שלום").as_text(), Some("שלום"));
        assert_eq!(ContentNode::Other.as_text(), None);
    }
}
