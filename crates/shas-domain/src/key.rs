//! Canonical keys and label normalization

use std::cmp::Ordering;
use std::fmt;

/// Normalize an author or work component for key construction
///
/// Trims the value and replaces every run of whitespace with a single
/// underscore: `"Rosh Hashanah"` becomes `"Rosh_Hashanah"`.
pub fn normalize_component(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Normalize a label for comparison
///
/// Case-insensitive; runs of whitespace and underscores are equivalent.
pub fn normalize_label(value: &str) -> String {
    value
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Check whether two labels name the same thing
pub fn labels_match(a: &str, b: &str) -> bool {
    normalize_label(a) == normalize_label(b)
}

/// The externally visible identifier `{Author}_{Work}.{section_id}`
///
/// Components are stored separately so that authors and works containing
/// underscores never have to be parsed back out of the rendered string.
/// Ordering is by author, then work, then section identifier compared
/// naturally (`section_2` sorts before `section_10`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalKey {
    author: String,
    work: String,
    section_id: String,
}

impl CanonicalKey {
    /// Create a key; author and work are normalized
    ///
    /// # Examples
    ///
    /// ```
    /// use shas_domain::CanonicalKey;
    ///
    /// let key = CanonicalKey::new("Rabbeinu Chananel", "Bava Kamma", "section_3");
    /// assert_eq!(key.to_string(), "Rabbeinu_Chananel_Bava_Kamma.section_3");
    /// ```
    pub fn new(author: &str, work: &str, section_id: impl Into<String>) -> Self {
        Self {
            author: normalize_component(author),
            work: normalize_component(work),
            section_id: section_id.into(),
        }
    }

    /// Normalized author component
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Normalized work component
    pub fn work(&self) -> &str {
        &self.work
    }

    /// Section identifier
    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    /// The same work and section under a different author
    pub fn with_author(&self, author: &str) -> Self {
        Self {
            author: normalize_component(author),
            work: self.work.clone(),
            section_id: self.section_id.clone(),
        }
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}.{}", self.author, self.work, self.section_id)
    }
}

impl PartialOrd for CanonicalKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CanonicalKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.author
            .cmp(&other.author)
            .then_with(|| self.work.cmp(&other.work))
            .then_with(|| natural_cmp(&self.section_id, &other.section_id))
            .then_with(|| self.section_id.cmp(&other.section_id))
    }
}

/// Compare strings treating digit runs as numbers
pub(crate) fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x, y) {
                    (Chunk::Number(n), Chunk::Number(m)) => {
                        let n = n.trim_start_matches('0');
                        let m = m.trim_start_matches('0');
                        n.len().cmp(&m.len()).then_with(|| n.cmp(m))
                    }
                    (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
                    (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
                    (Chunk::Text(s), Chunk::Text(t)) => s.cmp(t),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

enum Chunk<'a> {
    Number(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        Some(if digits { Chunk::Number(head) } else { Chunk::Text(head) })
    }
}
