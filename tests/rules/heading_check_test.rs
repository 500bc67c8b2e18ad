use mdguard_lib::lint_context::{LintContext, LintOptions};
use mdguard_lib::metadata::PulldownExtractor;
use mdguard_lib::rule::{Diagnostic, Rule, Severity};
use mdguard_lib::rules::HeadingCheck;

fn check(content: &str, strict: bool) -> Vec<Diagnostic> {
    let metadata = PulldownExtractor::collect(content);
    let ctx = LintContext::new(content, &metadata, LintOptions { strict });
    HeadingCheck.check(&ctx)
}

#[test]
fn test_document_without_headings() {
    let result = check("Just a paragraph.\n\n#NotAHeading\n", true);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].rule, "no-headings");
    assert_eq!(result[0].severity, Severity::Info);
}

#[test]
fn test_skipped_level_uses_heading_line() {
    let content = "# Title\n\nIntro\n\n### Detail\n";
    let result = check(content, false);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].rule, "heading-increment");
    assert_eq!((result[0].line, result[0].column), (5, 1));
}

#[test]
fn test_setext_headings_are_seen() {
    let content = "Title\n=====\n\nPart\n----\n\n#### Too deep a jump\n";
    let result = check(content, false);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].line, 7);
}

#[test]
fn test_strict_first_heading() {
    let content = "## Not first level\n";
    assert!(check(content, false).is_empty());
    let result = check(content, true);
    assert_eq!(result[0].rule, "first-heading-h1");
    assert_eq!(result[0].line, 1);
}

#[test]
fn test_duplicate_headings_ignore_case_and_markup() {
    let content = "# Guide\n\n## *Install*\n\n## install\n";
    let result = check(content, false);
    let lines: Vec<usize> = result
        .iter()
        .filter(|d| d.rule == "duplicate-heading")
        .map(|d| d.line)
        .collect();
    assert_eq!(lines, vec![3, 5]);
}

#[test]
fn test_headings_in_code_are_ignored() {
    let content = "# One\n\n```\n# One\n### Three\n```\n";
    assert!(check(content, true).is_empty());
}
