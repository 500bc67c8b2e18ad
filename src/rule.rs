//! Rule trait and the diagnostic types every rule produces.

use crate::lint_context::LintContext;
use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic. Only `Error` affects the document's validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// One finding from the linter.
///
/// `line` and `column` are 1-based; `0` means the finding has no single-line
/// (or column) locus, e.g. issues reported against a link's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub severity: Severity,
    /// Stable machine-readable identifier such as `heading-depth`
    pub rule: String,
}

impl Diagnostic {
    pub fn new(
        line: usize,
        column: usize,
        severity: Severity,
        rule: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line,
            column,
            message: message.into(),
            severity,
            rule: rule.to_string(),
        }
    }

    pub fn error(line: usize, column: usize, rule: &str, message: impl Into<String>) -> Self {
        Self::new(line, column, Severity::Error, rule, message)
    }

    pub fn warning(line: usize, column: usize, rule: &str, message: impl Into<String>) -> Self {
        Self::new(line, column, Severity::Warning, rule, message)
    }

    pub fn info(line: usize, column: usize, rule: &str, message: impl Into<String>) -> Self {
        Self::new(line, column, Severity::Info, rule, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Broad grouping of rules, used by `mdguard rules` and for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Line-level syntax checks over the raw text
    Syntax,
    Link,
    Image,
    CodeBlock,
    Heading,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleCategory::Syntax => "syntax",
            RuleCategory::Link => "link",
            RuleCategory::Image => "image",
            RuleCategory::CodeBlock => "code-block",
            RuleCategory::Heading => "heading",
        };
        f.write_str(name)
    }
}

/// A lint check. Rules are pure: the same context always yields the same
/// diagnostics, in the same order.
pub trait Rule: DynClone + Send + Sync {
    /// Name of the check as used in `enable`/`disable` lists (e.g. `links`)
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn category(&self) -> RuleCategory;

    /// Diagnostic identifiers this rule can emit
    fn rule_ids(&self) -> &'static [&'static str];

    fn check(&self, ctx: &LintContext) -> Vec<Diagnostic>;

    fn from_config(config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized;
}

dyn_clone::clone_trait_object!(Rule);
