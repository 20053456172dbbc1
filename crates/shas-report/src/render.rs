//! Plain-text rendering

use crate::summary::Summary;
use std::fmt::Write;

const AUTHOR_PREVIEW: usize = 3;

impl Summary {
    /// Render for a terminal, listing at most `top` authors
    pub fn render_text(&self, top: usize) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = self.write_text(&mut out, top);
        out
    }

    fn write_text(&self, out: &mut String, top: usize) -> std::fmt::Result {
        heading(out, "OVERALL STATISTICS")?;
        writeln!(out, "Documents seen: {}", self.documents_seen)?;
        writeln!(out, "Documents extracted: {}", self.documents_successful)?;
        writeln!(out, "Failures: {}", self.failures)?;
        writeln!(out, "Success rate: {:.1}%", self.success_rate)?;
        writeln!(out, "Authors: {}", self.distinct_authors)?;
        writeln!(out, "Tractates: {}", self.distinct_works)?;
        writeln!(out, "Sections: {}", self.total_sections)?;
        writeln!(out, "Text blocks: {}", self.total_blocks)?;
        writeln!(out, "Words: {}", self.total_words)?;

        if !self.failure_samples.is_empty() {
            heading(out, "SAMPLE FAILURES")?;
            for failure in &self.failure_samples {
                writeln!(out, "  {} ({})", failure.title, failure.reason)?;
            }
        }

        if !self.scholars.is_empty() {
            heading(out, "EXTRACTIONS BY SCHOLAR")?;
            let mut scholars: Vec<_> = self.scholars.iter().collect();
            scholars.sort_by(|a, b| b.1.tractates.cmp(&a.1.tractates).then_with(|| a.0.cmp(b.0)));
            for (name, scholar) in scholars.into_iter().take(top) {
                writeln!(
                    out,
                    "  {}: {} tractates, {} text blocks",
                    name, scholar.tractates, scholar.text_blocks
                )?;
            }
        }

        heading(out, "CONSOLIDATION")?;
        writeln!(out, "Entries: {} -> {}", self.entries_before, self.entries_after)?;
        writeln!(
            out,
            "Deleted: {}  Renamed: {}  Merged: {}",
            self.deleted, self.renamed, self.merged
        )?;

        if !self.authors.is_empty() {
            heading(out, &format!("TOP {} AUTHORS BY WORD COUNT", top.min(self.authors.len())))?;
            for (i, author) in self.top_authors(top).iter().enumerate() {
                writeln!(
                    out,
                    "{:2}. {:<30} {:>8} words ({} tractates)",
                    i + 1,
                    author.author,
                    author.words,
                    author.tractates
                )?;
            }
        }

        if !self.coverage.is_empty() {
            heading(out, "TRACTATE COVERAGE")?;
            writeln!(out, "{:<15} {:<8} Commentary sources", "Tractate", "Authors")?;
            for entry in &self.coverage {
                let mut preview = entry
                    .authors
                    .iter()
                    .take(AUTHOR_PREVIEW)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ");
                if entry.authors.len() > AUTHOR_PREVIEW {
                    preview.push_str(&format!(" (+{} more)", entry.authors.len() - AUTHOR_PREVIEW));
                }
                writeln!(out, "{:<15} {:<8} {}", entry.tractate, entry.authors.len(), preview)?;
            }
        }

        heading(out, "CONTENT VOLUME")?;
        writeln!(out, "Average words per author: {:.0}", self.averages.words_per_author)?;
        writeln!(out, "Average words per tractate: {:.0}", self.averages.words_per_tractate)?;
        writeln!(out, "Average sections per author: {:.0}", self.averages.sections_per_author)?;
        writeln!(out, "Average words per section: {:.0}", self.averages.words_per_section)?;
        writeln!(out, "Average blocks per section: {:.1}", self.averages.blocks_per_section)?;
        write!(
            out,
            "Authors with substantial content (>{} words): {}",
            crate::SUBSTANTIAL_WORDS,
            self.substantial_authors
        )
    }
}

fn heading(out: &mut String, title: &str) -> std::fmt::Result {
    if !out.is_empty() {
        writeln!(out)?;
    }
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(title.len()))
}
