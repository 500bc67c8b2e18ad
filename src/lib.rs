pub mod config;
pub mod exit_codes;
pub mod inline_config;
pub mod lint_context;
pub mod metadata;
pub mod output;
pub mod rule;
pub mod rules;
pub mod safety;
pub mod types;
pub mod utils;
pub mod validator;

pub use rules::*;

pub use crate::lint_context::{LineInfo, LintContext, LintOptions};
pub use crate::metadata::{DocumentMetadata, ExtractError, MetadataExtractor, PulldownExtractor, StaticMetadata};
pub use crate::rule::{Diagnostic, Rule, RuleCategory, Severity};
pub use crate::types::{Stats, ValidationResult};
pub use crate::validator::{ValidationError, ValidationRequest, ValidationResponse, Validator};

use std::time::Instant;

/// Lint a document against its pre-extracted metadata.
///
/// Pure and deterministic: rules run in the order given, each rule's
/// diagnostics keep their emission order, and the result is the ordered
/// partition of all of them into errors and warnings. Inline
/// `<!-- mdguard-disable ... -->` comments are honoured.
pub fn lint(
    content: &str,
    metadata: &DocumentMetadata,
    options: LintOptions,
    rules: &[Box<dyn Rule>],
) -> ValidationResult {
    lint_with_filter(content, metadata, options, rules, &RuleFilter::default(), true)
}

/// Like [`lint`], additionally dropping diagnostics rejected by `filter`.
///
/// With `inline_directives` off, `<!-- mdguard-... -->` comments in the
/// document are ignored and every finding the filter allows is reported.
pub fn lint_with_filter(
    content: &str,
    metadata: &DocumentMetadata,
    options: LintOptions,
    rules: &[Box<dyn Rule>],
    filter: &RuleFilter,
    inline_directives: bool,
) -> ValidationResult {
    let overall_start = Instant::now();

    let lint_ctx = LintContext::new(content, metadata, options);

    // Parse inline configuration comments once
    let inline_config = inline_directives
        .then(|| crate::inline_config::InlineConfig::from_context(&lint_ctx))
        .filter(|config| !config.is_empty());

    let mut diagnostics = Vec::new();

    for rule in rules {
        let rule_start = Instant::now();

        let rule_diagnostics = rule.check(&lint_ctx);
        let emitted = rule_diagnostics.len();

        diagnostics.extend(rule_diagnostics.into_iter().filter(|diag| {
            filter.allows(rule.name(), &diag.rule)
                && !inline_config
                    .as_ref()
                    .is_some_and(|config| config.is_rule_disabled(&[diag.rule.as_str(), rule.name()], diag.line))
        }));

        log::debug!(
            "Rule {} produced {} diagnostic(s) in {:?}",
            rule.name(),
            emitted,
            rule_start.elapsed()
        );
    }

    let result = ValidationResult::from_diagnostics(diagnostics, types::Stats::compute(content, metadata));

    log::debug!(
        "Linted {} line(s): {} error(s), {} warning(s) in {:?}",
        result.stats.lines,
        result.errors.len(),
        result.warnings.len(),
        overall_start.elapsed()
    );

    result
}
