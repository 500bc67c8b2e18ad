use mdguard_lib::config::Config;
use mdguard_lib::lint_context::{LintContext, LintOptions};
use mdguard_lib::metadata::PulldownExtractor;
use mdguard_lib::rule::{Diagnostic, Rule};
use mdguard_lib::rules::CodeBlockCheck;

fn check_with(rule: &dyn Rule, content: &str) -> Vec<Diagnostic> {
    let metadata = PulldownExtractor::collect(content);
    let ctx = LintContext::new(content, &metadata, LintOptions::default());
    rule.check(&ctx)
}

#[test]
fn test_tagged_fence_passes() {
    let rule = CodeBlockCheck::default();
    assert!(check_with(&rule, "```rust\nfn main() {}\n```\n").is_empty());
}

#[test]
fn test_untagged_fence_and_indented_block() {
    let rule = CodeBlockCheck::default();
    let result = check_with(&rule, "```\nplain\n```\n\nText\n\n    indented code\n");
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|d| d.rule == "missing-language" && d.line == 0));
}

#[test]
fn test_large_block_threshold_from_config() {
    let config = Config::from_toml_str("[large-code-block]\nmax_chars = 10\n").unwrap();
    let rule = CodeBlockCheck::from_config(&config);

    // "0123456789\n" is 11 characters
    let result = check_with(rule.as_ref(), "```text\n0123456789\n```\n");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].rule, "large-code-block");

    assert!(check_with(rule.as_ref(), "```text\n012345678\n```\n").is_empty());
}
