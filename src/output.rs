//! Report formatting for the command line: colored text and JSON.

use crate::rule::{Diagnostic, Severity};
use crate::types::{Stats, ValidationResult};
use colored::Colorize;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format '{other}' (expected text or json)")),
        }
    }
}

/// Validation result of one document, tagged with where it came from
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub result: ValidationResult,
}

impl FileReport {
    pub fn new(file: impl Into<String>, result: ValidationResult) -> Self {
        Self {
            file: file.into(),
            result,
        }
    }
}

/// Totals across all reported documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub files: usize,
    pub invalid_files: usize,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl Summary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        reports.iter().fold(Self::default(), |mut acc, report| {
            acc.files += 1;
            if !report.result.valid {
                acc.invalid_files += 1;
            }
            acc.errors += report.result.count(Severity::Error);
            acc.warnings += report.result.count(Severity::Warning);
            acc.infos += report.result.count(Severity::Info);
            acc
        })
    }
}

/// `path:line:col: severity[rule] message`; diagnostics without a line show just the path
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter {
    pub color: bool,
}

impl TextFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn format_diagnostic(&self, path: &str, diag: &Diagnostic) -> String {
        let location = match (diag.line, diag.column) {
            (0, _) => path.to_string(),
            (line, 0) => format!("{path}:{line}"),
            (line, column) => format!("{path}:{line}:{column}"),
        };

        let label = format!("{}[{}]", diag.severity, diag.rule);
        if !self.color {
            return format!("{location}: {label} {}", diag.message);
        }

        let label = match diag.severity {
            Severity::Error => label.red().bold(),
            Severity::Warning => label.yellow().bold(),
            Severity::Info => label.blue().bold(),
        };
        format!("{}: {label} {}", location.bold(), diag.message)
    }

    /// Diagnostic lines for one document, errors first
    pub fn format_report(&self, report: &FileReport) -> Vec<String> {
        report
            .result
            .diagnostics()
            .map(|diag| self.format_diagnostic(&report.file, diag))
            .collect()
    }

    pub fn format_stats(&self, report: &FileReport) -> String {
        let Stats {
            lines,
            characters,
            words,
            headings,
            links,
            images,
            code_blocks,
        } = report.result.stats;
        format!(
            "{}: {lines} lines, {characters} characters, {words} words, {headings} headings, {links} links, {images} images, {code_blocks} code blocks",
            report.file
        )
    }

    pub fn format_summary(&self, summary: &Summary) -> String {
        let mut parts = Vec::new();
        if summary.errors > 0 {
            parts.push(format!("{} error(s)", summary.errors));
        }
        if summary.warnings > 0 {
            parts.push(format!("{} warning(s)", summary.warnings));
        }
        if summary.infos > 0 {
            parts.push(format!("{} info(s)", summary.infos));
        }

        let files = if summary.files == 1 { "file" } else { "files" };
        if parts.is_empty() {
            let text = format!("Checked {} {files}, no issues found", summary.files);
            return if self.color { text.green().to_string() } else { text };
        }

        let text = format!(
            "Found {} in {} {files} ({} invalid)",
            parts.join(", "),
            summary.files,
            summary.invalid_files
        );
        if self.color && summary.errors > 0 {
            text.red().to_string()
        } else {
            text
        }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    files: &'a [FileReport],
    summary: Summary,
}

/// Pretty JSON: `{"files": [{"file", "valid", "errors", "warnings", "stats"}], "summary": {...}}`
pub fn format_json(reports: &[FileReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput {
        files: reports,
        summary: Summary::from_reports(reports),
    })
}
