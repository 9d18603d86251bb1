//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use casefile_domain::{Unit, WorkerId};
use casefile_extractor::{ExtractionReport, UnitRecord, UnitStats};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest error message shown in a table cell
const MAX_STATUS_WIDTH: usize = 48;

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

    /// Format the per-unit results of an extraction run.
    pub fn format_records(&self, records: &[UnitRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let stats: Vec<UnitStats> = records.iter().map(UnitRecord::stats).collect();
                Ok(serde_json::to_string_pretty(&stats)?)
            }
            OutputFormat::Table => Ok(self.format_records_table(records)),
        }
    }

    fn format_records_table(&self, records: &[UnitRecord]) -> String {
        if records.is_empty() {
            return self.colorize("No units processed.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Unit", "Worker", "Duration (s)", "Chars", "Status"]);

        for record in records {
            let status = match record.content.error_message() {
                Some(reason) => truncate(reason, MAX_STATUS_WIDTH),
                None => "ok".to_string(),
            };
            builder.push_record([
                record.unit_index.to_string(),
                record.worker.to_string(),
                format!("{:.2}", record.duration),
                record.char_count.to_string(),
                status,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the closing status lines of an extraction run.
    pub fn report_summary(&self, report: &ExtractionReport) -> String {
        let mut lines = Vec::new();

        for worker in &report.workers {
            lines.push(self.info(&format!(
                "Worker {}: {} unit(s), {} failed",
                worker.worker, worker.processed, worker.failed
            )));
        }
        for (worker, reason) in &report.worker_failures {
            lines.push(self.error(&format!("Worker {} stopped early: {}", worker, reason)));
        }

        let failed = report.failed_units();
        if failed > 0 {
            lines.push(self.warning(&format!(
                "{} of {} unit(s) produced no content",
                failed,
                report.records.len()
            )));
        }
        lines.push(self.success(&format!("Extracted {} unit(s)", report.records.len())));

        lines.join("\n")
    }

    /// Format the units a document splits into.
    pub fn format_units(&self, units: &[Unit]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = units
                    .iter()
                    .map(|unit| {
                        serde_json::json!({
                            "unit_index": unit.index,
                            "char_count": unit.char_count(),
                            "estimated_pages": unit.estimated_pages(),
                            "worker": WorkerId::for_index(unit.index).value(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Table => Ok(self.format_units_table(units)),
        }
    }

    fn format_units_table(&self, units: &[Unit]) -> String {
        if units.is_empty() {
            return self.colorize("No units found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Unit", "Chars", "Est. pages", "Worker"]);

        for unit in units {
            let pages = unit
                .estimated_pages()
                .map(|p| format!("{:.2}", p))
                .unwrap_or_else(|| "-".to_string());
            builder.push_record([
                unit.index.to_string(),
                unit.char_count().to_string(),
                pages,
                WorkerId::for_index(unit.index).to_string(),
            ]);
        }

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

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
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

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut)
}
