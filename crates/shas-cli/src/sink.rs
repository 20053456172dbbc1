//! Corpus sinks writing JSON files.

use crate::error::Result;
use serde_json::{Map, Value};
use shas_domain::traits::CorpusSink;
use shas_domain::{CanonicalKey, Corpus};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Write every (author, work) group of a corpus to a sink.
///
/// Returns the number of groups written.
pub fn write_corpus<S: CorpusSink>(corpus: &Corpus, sink: &mut S) -> std::result::Result<usize, S::Error> {
    let groups = corpus.group_by_work();
    for ((author, work), entries) in &groups {
        sink.write_work(author, work, entries)?;
    }
    Ok(groups.len())
}

fn to_object(entries: &[(&CanonicalKey, &Vec<String>)], object: &mut Map<String, Value>) {
    for (key, blocks) in entries {
        let blocks = blocks.iter().cloned().map(Value::String).collect();
        object.insert(key.to_string(), Value::Array(blocks));
    }
}

/// Path-safe form of a key component.
///
/// Separators become underscores, and a component made only of dots (or
/// nothing at all) is replaced so it can never name `.` or `..`.
fn file_component(value: &str) -> String {
    let safe: String = value
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    if safe.chars().all(|c| c == '.') {
        return "_".repeat(safe.len().max(1));
    }
    safe
}

/// Writes `<root>/<Author>/<Work>.json`, one file per (author, work) pair.
///
/// Keys appear in corpus order: section identifiers compared naturally,
/// not in the order the source document listed them.
#[derive(Debug)]
pub struct DirectorySink {
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl DirectorySink {
    /// Create a sink rooted at a directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
        }
    }

    /// Files written so far.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl CorpusSink for DirectorySink {
    type Error = crate::error::CliError;

    fn write_work(
        &mut self,
        author: &str,
        work: &str,
        entries: &[(&CanonicalKey, &Vec<String>)],
    ) -> Result<()> {
        let dir = self.root.join(file_component(author));
        fs::create_dir_all(&dir)?;

        let mut object = Map::new();
        to_object(entries, &mut object);

        let path = dir.join(format!("{}.json", file_component(work)));
        fs::write(&path, serde_json::to_string_pretty(&Value::Object(object))?)?;
        debug!("Wrote {} entries to {}", entries.len(), path.display());
        self.files.push(path);
        Ok(())
    }
}

/// Collects every group and writes a single `corpus.json`.
#[derive(Debug)]
pub struct CombinedSink {
    path: PathBuf,
    object: Map<String, Value>,
}

impl CombinedSink {
    /// Create a sink writing `<root>/corpus.json`.
    pub fn new(root: &Path) -> Self {
        Self {
            path: root.join("corpus.json"),
            object: Map::new(),
        }
    }

    /// Write the collected corpus, returning its path.
    pub fn finish(self) -> Result<PathBuf> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(self.object))?)?;
        Ok(self.path)
    }
}

impl CorpusSink for CombinedSink {
    type Error = crate::error::CliError;

    fn write_work(
        &mut self,
        _author: &str,
        _work: &str,
        entries: &[(&CanonicalKey, &Vec<String>)],
    ) -> Result<()> {
        to_object(entries, &mut self.object);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Corpus {
        let mut corpus = Corpus::new();
        for section in ["section_10", "section_2"] {
            corpus.insert(
                CanonicalKey::new("Rabbeinu Chananel", "Bava Kamma", section),
                vec!["א".to_string()],
            );
        }
        corpus.insert(CanonicalKey::new("Rashi", "Yoma", "Daf_2a"), vec!["ב".to_string(), "ג".to_string()]);
        corpus
    }

    #[test]
    fn test_directory_sink_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());

        let written = write_corpus(&corpus(), &mut sink).unwrap();
        assert_eq!(written, 2);
        assert_eq!(sink.files().len(), 2);

        let path = dir.path().join("Rabbeinu_Chananel").join("Bava_Kamma.json");
        let contents = fs::read_to_string(path).unwrap();
        let value: Value = serde_json::from_str(&contents).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            vec![
                "Rabbeinu_Chananel_Bava_Kamma.section_2",
                "Rabbeinu_Chananel_Bava_Kamma.section_10"
            ]
        );
    }

    #[test]
    fn test_combined_sink() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CombinedSink::new(dir.path());
        write_corpus(&corpus(), &mut sink).unwrap();
        let path = sink.finish().unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 3);
        assert_eq!(value["Rashi_Yoma.Daf_2a"][1], "ג");
    }

    #[test]
    fn test_file_component() {
        assert_eq!(file_component("Ein Ayah/Notes"), "Ein Ayah_Notes");
        assert_eq!(file_component(".."), "__");
        assert_eq!(file_component("."), "_");
        assert_eq!(file_component(""), "_");
        assert_eq!(file_component("R. Akiva"), "R. Akiva");
    }

    #[test]
    fn test_dot_author_stays_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("out");
        let mut corpus = Corpus::new();
        corpus.insert(CanonicalKey::new("..", "Berakhot", "section_1"), vec!["א".to_string()]);

        let mut sink = DirectorySink::new(&root);
        write_corpus(&corpus, &mut sink).unwrap();

        assert_eq!(sink.files(), &[root.join("__").join("Berakhot.json")]);
        assert!(!dir.path().join("Berakhot.json").exists());
    }
}
