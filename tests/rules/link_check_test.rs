use mdguard_lib::lint_context::{LintContext, LintOptions};
use mdguard_lib::metadata::PulldownExtractor;
use mdguard_lib::rule::{Diagnostic, Rule, Severity};
use mdguard_lib::rules::LinkCheck;

fn check(content: &str) -> Vec<Diagnostic> {
    let metadata = PulldownExtractor::collect(content);
    let ctx = LintContext::new(content, &metadata, LintOptions::default());
    LinkCheck.check(&ctx)
}

#[test]
fn test_secure_links_pass() {
    assert!(check("[docs](https://docs.test) and [local](./guide.md#setup)").is_empty());
}

#[test]
fn test_insecure_link_from_markdown() {
    let result = check("Visit [the site](http://example.com) today.");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].rule, "insecure-link");
    assert_eq!(result[0].severity, Severity::Warning);
    assert_eq!((result[0].line, result[0].column), (0, 0));
}

#[test]
fn test_link_without_text() {
    let result = check("[](https://example.com)");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].rule, "empty-link-text");
}

#[test]
fn test_javascript_url_is_an_error() {
    let result = check("[click](javascript:alert(1))");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].rule, "javascript-url");
    assert!(result[0].is_error());
}

#[test]
fn test_one_link_can_trigger_several_checks() {
    let result = check("[ ](http://x.test/?next=javascript:void)");
    let rules: Vec<&str> = result.iter().map(|d| d.rule.as_str()).collect();
    assert_eq!(rules, vec!["empty-link-text", "insecure-link", "javascript-url"]);
}

#[test]
fn test_autolinks_are_links() {
    let result = check("<http://plain.test>");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].rule, "insecure-link");
}
