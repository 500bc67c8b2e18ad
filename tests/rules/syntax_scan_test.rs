use mdguard_lib::lint_context::{LintContext, LintOptions};
use mdguard_lib::metadata::DocumentMetadata;
use mdguard_lib::rule::{Diagnostic, Rule, Severity};
use mdguard_lib::rules::SyntaxScan;

fn check(content: &str, strict: bool) -> Vec<Diagnostic> {
    let metadata = DocumentMetadata::default();
    let ctx = LintContext::new(content, &metadata, LintOptions { strict });
    SyntaxScan::default().check(&ctx)
}

#[test]
fn test_document_with_every_syntax_error() {
    let content = "####### Seven\n\n[broken]()\n\n![missing]()\n\n```rust\nfn main() {}\n";
    let result = check(content, false);
    let found: Vec<(usize, usize, &str)> = result.iter().map(|d| (d.line, d.column, d.rule.as_str())).collect();
    assert_eq!(
        found,
        vec![
            (1, 1, "heading-depth"),
            (3, 8, "empty-link"),
            (5, 10, "empty-image"),
            (7, 1, "unclosed-code-block"),
        ]
    );
    assert!(result.iter().all(|d| d.severity == Severity::Error));
}

#[test]
fn test_links_are_reported_before_images_on_a_line() {
    let result = check("![a]() then [b]()", false);
    let rules: Vec<&str> = result.iter().map(|d| d.rule.as_str()).collect();
    assert_eq!(rules, vec!["empty-link", "empty-image"]);
    assert_eq!(result[0].column, 15);
    assert_eq!(result[1].column, 4);
}

#[test]
fn test_strict_checks_on_one_line() {
    let line = format!("\t{} ", "x".repeat(130));
    let result = check(&line, true);
    let rules: Vec<&str> = result.iter().map(|d| d.rule.as_str()).collect();
    assert_eq!(rules, vec!["line-length", "trailing-whitespace", "no-tabs"]);
    assert!(result.iter().all(|d| d.severity == Severity::Warning));
    assert_eq!(result[0].column, 121);
    assert_eq!(result[1].column, 132);
    assert_eq!(result[2].column, 1);
}

#[test]
fn test_closed_fences_hide_their_content() {
    let content = "```\n####### not a heading\n```\n\n~~~\n#Tilde fences are not tracked\n~~~\n";
    let result = check(content, false);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].rule, "heading-space");
    assert_eq!(result[0].line, 6);
}

#[test]
fn test_indented_fence_still_toggles() {
    let content = "  ```\n#hidden\n  ```\n";
    assert!(check(content, false).is_empty());
}

#[test]
fn test_second_unclosed_fence_is_reported() {
    let content = "```\na\n```\ntext\n```\nb\n";
    let result = check(content, false);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].line, 5);
}
