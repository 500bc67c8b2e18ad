use crate::metadata::DocumentMetadata;
use crate::rule::{Diagnostic, Severity};
use crate::utils::word_count::count_words;
use serde::{Deserialize, Serialize};

/// Document statistics, derived from the raw text and the extracted metadata
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Number of `\n`-separated lines (a trailing newline adds an empty line)
    pub lines: usize,
    /// Length of the raw text in characters
    pub characters: usize,
    pub words: usize,
    pub headings: usize,
    pub links: usize,
    pub images: usize,
    pub code_blocks: usize,
}

impl Stats {
    pub fn compute(content: &str, metadata: &DocumentMetadata) -> Self {
        Self {
            lines: content.split('\n').count(),
            characters: content.chars().count(),
            words: count_words(content),
            headings: metadata.headings.len(),
            links: metadata.links.len(),
            images: metadata.images.len(),
            code_blocks: metadata.code_blocks.len(),
        }
    }
}

/// Outcome of linting one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff `errors` is empty
    pub valid: bool,
    /// Diagnostics with severity `error`, in scan order
    pub errors: Vec<Diagnostic>,
    /// All other diagnostics (warnings and infos), in scan order
    pub warnings: Vec<Diagnostic>,
    pub stats: Stats,
}

impl ValidationResult {
    /// Partition diagnostics by severity, preserving their order
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>, stats: Stats) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            diagnostics.into_iter().partition(|d| d.severity == Severity::Error);
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
            stats,
        }
    }

    /// All diagnostics, errors first
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics().filter(|d| d.severity == severity).count()
    }
}
