use crate::lint_context::LintContext;
use crate::rule::{Diagnostic, Rule, RuleCategory};

pub const DEFAULT_MAX_CODE_BLOCK_CHARS: usize = 10_000;

/// Checks extracted code blocks for a language tag and a sane size.
#[derive(Debug, Clone)]
pub struct CodeBlockCheck {
    max_chars: usize,
}

impl Default for CodeBlockCheck {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CODE_BLOCK_CHARS)
    }
}

impl CodeBlockCheck {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl Rule for CodeBlockCheck {
    fn name(&self) -> &'static str {
        "code-blocks"
    }

    fn description(&self) -> &'static str {
        "Code blocks should declare a language and stay under the size limit"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::CodeBlock
    }

    fn rule_ids(&self) -> &'static [&'static str] {
        &["missing-language", "large-code-block"]
    }

    fn check(&self, ctx: &LintContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for block in &ctx.metadata.code_blocks {
            if block.language.trim().is_empty() {
                diagnostics.push(Diagnostic::warning(
                    0,
                    0,
                    "missing-language",
                    "Code block has no language specified",
                ));
            }

            let size = block.code.chars().count();
            if size > self.max_chars {
                diagnostics.push(Diagnostic::warning(
                    0,
                    0,
                    "large-code-block",
                    format!("Code block is very large ({size} > {} characters)", self.max_chars),
                ));
            }
        }

        diagnostics
    }

    fn from_config(config: &crate::config::Config) -> Box<dyn Rule> {
        let max = crate::config::get_rule_config_value::<usize>(config, "large-code-block", "max-chars")
            .unwrap_or(DEFAULT_MAX_CODE_BLOCK_CHARS);
        Box::new(Self::new(max))
    }
}
