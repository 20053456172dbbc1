//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use shas_consolidator::{ConsolidationReport, RuleDef};
use shas_domain::ConsolidationRule;
use shas_extractor::ExtractionStats;
use shas_report::Summary;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format extraction statistics.
    pub fn format_stats(&self, stats: &ExtractionStats) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(stats)?);
        }

        let rows = [
            ("Documents seen", stats.documents_seen.to_string()),
            ("Documents extracted", stats.documents_successful.to_string()),
            ("Title failures", stats.title_failures.to_string()),
            ("Empty documents", stats.empty_extractions.to_string()),
            ("Structural anomalies", stats.structural_anomalies.to_string()),
            ("Blocks filtered", stats.blocks_filtered.to_string()),
            ("Overwrites", stats.overwrites.to_string()),
            ("Authors", stats.distinct_authors().to_string()),
            ("Tractates", stats.distinct_works().to_string()),
            ("Sections", stats.total_sections.to_string()),
            ("Blocks", stats.total_blocks.to_string()),
            ("Words", stats.total_words.to_string()),
            ("Success rate", format!("{:.1}%", stats.success_rate())),
        ];

        let mut builder = Builder::default();
        builder.push_record(["Metric", "Value"]);
        for (metric, value) in rows {
            builder.push_record([metric.to_string(), value]);
        }
        Ok(self.render(builder))
    }

    /// Format a consolidation report.
    pub fn format_report(&self, report: &ConsolidationReport) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(report)?);
        }
        if report.effects.is_empty() {
            return Ok(self.colorize("No consolidation rules applied.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Rule", "Entries", "Blocks", "Concatenated"]);
        for effect in &report.effects {
            builder.push_record([
                effect.description.clone(),
                effect.entries.to_string(),
                effect.blocks.to_string(),
                effect.collisions.to_string(),
            ]);
        }

        let mut out = self.render(builder);
        out.push('\n');
        out.push_str(&format!(
            "Entries: {} -> {}",
            report.entries_before, report.entries_after
        ));
        if report.dry_run {
            out.push('\n');
            out.push_str(&self.warning("Dry run: corpus written unconsolidated"));
        }
        Ok(out)
    }

    /// Format a run summary.
    pub fn format_summary(&self, summary: &Summary, top: usize) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(summary.to_json()?),
            OutputFormat::Table => Ok(summary.render_text(top)),
        }
    }

    /// Format a list of rules.
    pub fn format_rules(&self, rules: &[ConsolidationRule]) -> Result<String> {
        if self.format == OutputFormat::Json {
            let defs: Vec<RuleDef> = rules.iter().map(RuleDef::from).collect();
            return Ok(serde_json::to_string_pretty(&defs)?);
        }
        if rules.is_empty() {
            return Ok(self.colorize("No rules configured.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Kind", "Rule"]);
        for (i, rule) in rules.iter().enumerate() {
            builder.push_record([
                (i + 1).to_string(),
                rule.kind().as_str().to_string(),
                rule.to_string(),
            ]);
        }
        Ok(self.render(builder))
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
