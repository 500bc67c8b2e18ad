use mdguard_lib::config::Config;
use mdguard_lib::lint_context::LintOptions;
use mdguard_lib::metadata::PulldownExtractor;
use mdguard_lib::rules::all_rules;
use mdguard_lib::types::ValidationResult;

fn lint(content: &str) -> ValidationResult {
    let metadata = PulldownExtractor::collect(content);
    mdguard_lib::lint(content, &metadata, LintOptions::strict(), &all_rules(&Config::default()))
}

fn rule_lines(result: &ValidationResult) -> Vec<(String, usize)> {
    result.diagnostics().map(|d| (d.rule.clone(), d.line)).collect()
}

#[test]
fn test_disable_line() {
    let content = "# T\n\ntrailing   <!-- mdguard-disable-line -->  \nnext  \n";
    let result = lint(content);
    assert_eq!(rule_lines(&result), vec![("trailing-whitespace".to_string(), 4)]);
}

#[test]
fn test_disable_then_enable_specific_id() {
    let content = "# T\n\n<!-- mdguard-disable no-tabs -->\na\tb\n<!-- mdguard-enable no-tabs -->\nc\td\n";
    let result = lint(content);
    assert_eq!(rule_lines(&result), vec![("no-tabs".to_string(), 6)]);
}

#[test]
fn test_disable_all_with_reenabled_check() {
    let content = "# T\n\n<!-- mdguard-disable -->\n<!-- mdguard-enable syntax -->\n#x\t\n";
    let result = lint(content);
    let rules: Vec<String> = rule_lines(&result).into_iter().map(|(r, _)| r).collect();
    assert_eq!(rules, vec!["heading-space", "trailing-whitespace", "no-tabs"]);
}

#[test]
fn test_directives_inside_code_blocks_do_nothing() {
    let content = "# T\n\n```md\n<!-- mdguard-disable -->\n```\n####### deep\n";
    let result = lint(content);
    assert!(!result.valid);
    assert_eq!(result.errors[0].line, 6);
}

#[test]
fn test_disable_file_anywhere() {
    let content = "# T\n\n####### deep\n\n<!-- mdguard-disable-file heading-depth -->\n";
    assert!(lint(content).valid);
}
