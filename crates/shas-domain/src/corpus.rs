//! The corpus: canonical keys mapped to ordered text blocks

use crate::key::{labels_match, CanonicalKey};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Mapping CanonicalKey → ordered text blocks
///
/// Used for both the raw extraction output and the consolidated corpus.
/// Iteration order is deterministic (see [`CanonicalKey`] ordering).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    entries: BTreeMap<CanonicalKey, Vec<String>>,
}

impl Corpus {
    /// Create an empty corpus
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry, returning the previous blocks
    pub fn insert(&mut self, key: CanonicalKey, blocks: Vec<String>) -> Option<Vec<String>> {
        self.entries.insert(key, blocks)
    }

    /// Append blocks to an entry, creating it if absent
    ///
    /// Returns true when the key already existed (the blocks were concatenated).
    pub fn append(&mut self, key: CanonicalKey, blocks: Vec<String>) -> bool {
        match self.entries.entry(key) {
            btree_map::Entry::Occupied(mut slot) => {
                slot.get_mut().extend(blocks);
                true
            }
            btree_map::Entry::Vacant(slot) => {
                slot.insert(blocks);
                false
            }
        }
    }

    /// Remove an entry
    pub fn remove(&mut self, key: &CanonicalKey) -> Option<Vec<String>> {
        self.entries.remove(key)
    }

    /// Look up an entry
    pub fn get(&self, key: &CanonicalKey) -> Option<&Vec<String>> {
        self.entries.get(key)
    }

    /// Look up an entry by its rendered form (`Rashi_Berakhot.section_1`)
    pub fn get_rendered(&self, rendered: &str) -> Option<&Vec<String>> {
        self.entries
            .iter()
            .find(|(k, _)| k.to_string() == rendered)
            .map(|(_, v)| v)
    }

    /// Check for an entry
    pub fn contains_key(&self, key: &CanonicalKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the corpus has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> btree_map::Iter<'_, CanonicalKey, Vec<String>> {
        self.entries.iter()
    }

    /// Iterate keys in order
    pub fn keys(&self) -> btree_map::Keys<'_, CanonicalKey, Vec<String>> {
        self.entries.keys()
    }

    /// Total blocks across all entries
    pub fn block_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Keys whose author component matches `label` (case/whitespace-insensitive)
    pub fn keys_for_author(&self, label: &str) -> Vec<CanonicalKey> {
        self.entries
            .keys()
            .filter(|k| labels_match(k.author(), label))
            .cloned()
            .collect()
    }

    /// Entries grouped by (author, work), the unit of one persisted file
    pub fn group_by_work(&self) -> BTreeMap<(String, String), Vec<(&CanonicalKey, &Vec<String>)>> {
        let mut groups: BTreeMap<(String, String), Vec<(&CanonicalKey, &Vec<String>)>> = BTreeMap::new();
        for (key, blocks) in &self.entries {
            groups
                .entry((key.author().to_string(), key.work().to_string()))
                .or_default()
                .push((key, blocks));
        }
        groups
    }
}

impl FromIterator<(CanonicalKey, Vec<String>)> for Corpus {
    fn from_iter<I: IntoIterator<Item = (CanonicalKey, Vec<String>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Corpus {
    type Item = (CanonicalKey, Vec<String>);
    type IntoIter = btree_map::IntoIter<CanonicalKey, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = (&'a CanonicalKey, &'a Vec<String>);
    type IntoIter = btree_map::Iter<'a, CanonicalKey, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
