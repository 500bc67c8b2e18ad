use mdguard_lib::config::Config;
use mdguard_lib::lint_context::{LintContext, LintOptions};
use mdguard_lib::metadata::PulldownExtractor;
use mdguard_lib::rule::{Diagnostic, Rule};
use mdguard_lib::rules::ImageCheck;

fn check_with(rule: &dyn Rule, content: &str) -> Vec<Diagnostic> {
    let metadata = PulldownExtractor::collect(content);
    let ctx = LintContext::new(content, &metadata, LintOptions::default());
    rule.check(&ctx)
}

fn rules(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.rule.as_str()).collect()
}

#[test]
fn test_good_image() {
    let rule = ImageCheck::default();
    assert!(check_with(&rule, "![Company logo](https://cdn.test/logo.PNG)").is_empty());
}

#[test]
fn test_image_problems_in_order() {
    let rule = ImageCheck::default();
    let result = check_with(&rule, "![](http://cdn.test/diagram.bmp)");
    assert_eq!(rules(&result), vec!["missing-alt-text", "image-extension", "insecure-image"]);
    assert!(result.iter().all(|d| !d.is_error() && d.line == 0));
}

#[test]
fn test_image_without_extension() {
    let rule = ImageCheck::default();
    assert_eq!(rules(&check_with(&rule, "![chart](images/chart)")), vec!["image-extension"]);
}

#[test]
fn test_allowed_extensions_from_config() {
    let config = Config::from_toml_str("[image-extension]\nallowed = [\".bmp\", \"PNG\"]\n").unwrap();
    let rule = ImageCheck::from_config(&config);
    assert!(check_with(rule.as_ref(), "![a](x.bmp) ![b](y.png)").is_empty());
    assert_eq!(rules(&check_with(rule.as_ref(), "![c](z.jpg)")), vec!["image-extension"]);
}

#[test]
fn test_image_inside_link_is_still_checked() {
    let rule = ImageCheck::default();
    let result = check_with(&rule, "[![](badge.svg)](https://ci.test)");
    assert_eq!(rules(&result), vec!["missing-alt-text"]);
}
