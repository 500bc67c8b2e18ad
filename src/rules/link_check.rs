use crate::lint_context::LintContext;
use crate::rule::{Diagnostic, Rule, RuleCategory};

/// Checks extracted links. Links carry no position, so every diagnostic is
/// reported at line 0, column 0.
#[derive(Debug, Clone, Default)]
pub struct LinkCheck;

impl Rule for LinkCheck {
    fn name(&self) -> &'static str {
        "links"
    }

    fn description(&self) -> &'static str {
        "Links should have text, use HTTPS, and never use javascript: URLs"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Link
    }

    fn rule_ids(&self) -> &'static [&'static str] {
        &["empty-link-text", "insecure-link", "javascript-url"]
    }

    fn check(&self, ctx: &LintContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for link in &ctx.metadata.links {
            if link.text.trim().is_empty() {
                diagnostics.push(Diagnostic::warning(
                    0,
                    0,
                    "empty-link-text",
                    format!("Link has no text: {}", link.url),
                ));
            }

            if link.url.starts_with("http://") {
                diagnostics.push(Diagnostic::warning(
                    0,
                    0,
                    "insecure-link",
                    format!("Insecure HTTP link: {}", link.url),
                ));
            }

            if link.url.to_ascii_lowercase().contains("javascript:") {
                diagnostics.push(Diagnostic::error(
                    0,
                    0,
                    "javascript-url",
                    format!("JavaScript URL not allowed in link \"{}\"", link.text),
                ));
            }
        }

        diagnostics
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule> {
        Box::new(LinkCheck)
    }
}
