use crate::lint_context::LintContext;
use crate::rule::{Diagnostic, Rule, RuleCategory};
use itertools::Itertools;
use std::collections::HashSet;

/// Heading structure: presence, first level (strict), level increments, duplicates.
///
/// Headings are checked in document order.
#[derive(Debug, Clone, Default)]
pub struct HeadingCheck;

impl Rule for HeadingCheck {
    fn name(&self) -> &'static str {
        "headings"
    }

    fn description(&self) -> &'static str {
        "Headings should exist, increment one level at a time, and be unique"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Heading
    }

    fn rule_ids(&self) -> &'static [&'static str] {
        &["no-headings", "first-heading-h1", "heading-increment", "duplicate-heading"]
    }

    fn check(&self, ctx: &LintContext) -> Vec<Diagnostic> {
        let headings = &ctx.metadata.headings;

        if headings.is_empty() {
            return vec![Diagnostic::info(0, 0, "no-headings", "Document has no headings")];
        }

        let mut diagnostics = Vec::new();

        if ctx.is_strict() && headings[0].level != 1 {
            diagnostics.push(Diagnostic::warning(
                headings[0].line,
                1,
                "first-heading-h1",
                format!("First heading should be level 1 (found H{})", headings[0].level),
            ));
        }

        for (previous, current) in headings.iter().tuple_windows() {
            if current.level > previous.level.saturating_add(1) {
                diagnostics.push(Diagnostic::warning(
                    current.line,
                    1,
                    "heading-increment",
                    format!(
                        "Heading level jumps from H{} to H{}; increment by one level at a time",
                        previous.level, current.level
                    ),
                ));
            }
        }

        // Every occurrence of a repeated text is flagged, including the first
        let repeated: HashSet<String> = headings
            .iter()
            .map(|h| h.text.to_lowercase())
            .counts()
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(text, _)| text)
            .collect();

        for heading in headings {
            if repeated.contains(&heading.text.to_lowercase()) {
                diagnostics.push(Diagnostic::warning(
                    heading.line,
                    1,
                    "duplicate-heading",
                    format!("Duplicate heading: \"{}\"", heading.text),
                ));
            }
        }

        diagnostics
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule> {
        Box::new(HeadingCheck)
    }
}
