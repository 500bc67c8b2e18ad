use crate::lint_context::LintContext;
use crate::rule::{Diagnostic, Rule, RuleCategory};
use regex::Regex;
use std::sync::LazyLock;

static HEADING_TOO_DEEP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{7,}").unwrap());
static HEADING_NO_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#[^#\s]").unwrap());
// Group 1 is `!` for images
static EMPTY_TARGET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(!?)\[[^\]]*\]\(\s*\)").unwrap());

pub const DEFAULT_MAX_LINE_LENGTH: usize = 120;

/// Single forward pass over the document lines.
///
/// Lines inside fenced code blocks (and the fence lines themselves) are only
/// used to track fence state. A fence that is still open at the end of the
/// document is reported at the line that opened it.
#[derive(Debug, Clone)]
pub struct SyntaxScan {
    max_line_length: usize,
}

impl Default for SyntaxScan {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINE_LENGTH)
    }
}

impl SyntaxScan {
    pub fn new(max_line_length: usize) -> Self {
        Self { max_line_length }
    }

    fn check_line(&self, line_num: usize, line: &str, strict: bool, out: &mut Vec<Diagnostic>) {
        if HEADING_TOO_DEEP.is_match(line) {
            out.push(Diagnostic::error(line_num, 1, "heading-depth", "Heading level too deep (max 6)"));
        }

        if HEADING_NO_SPACE.is_match(line) {
            out.push(Diagnostic::warning(
                line_num,
                1,
                "heading-space",
                "Missing space after heading marker",
            ));
        }

        if line.contains("](") {
            let mut images = Vec::new();
            for cap in EMPTY_TARGET.captures_iter(line) {
                let Some(whole) = cap.get(0) else { continue };
                let bracket = whole.start() + whole.as_str().find("](").unwrap_or(0);
                let column = char_column(line, bracket);
                if cap[1].is_empty() {
                    out.push(Diagnostic::error(line_num, column, "empty-link", "Empty link URL"));
                } else {
                    images.push(Diagnostic::error(line_num, column, "empty-image", "Empty image source"));
                }
            }
            out.extend(images);
        }

        if !strict {
            return;
        }

        let length = line.chars().count();
        if length > self.max_line_length {
            out.push(Diagnostic::warning(
                line_num,
                self.max_line_length + 1,
                "line-length",
                format!("Line too long ({length} > {} characters)", self.max_line_length),
            ));
        }

        if line.ends_with(char::is_whitespace) {
            out.push(Diagnostic::warning(line_num, length, "trailing-whitespace", "Trailing whitespace"));
        }

        if let Some(pos) = line.find('\t') {
            out.push(Diagnostic::warning(
                line_num,
                char_column(line, pos),
                "no-tabs",
                "Tab character found; use spaces for indentation",
            ));
        }
    }
}

/// 1-based character column of byte offset `byte_pos`
fn char_column(line: &str, byte_pos: usize) -> usize {
    line[..byte_pos].chars().count() + 1
}

impl Rule for SyntaxScan {
    fn name(&self) -> &'static str {
        "syntax"
    }

    fn description(&self) -> &'static str {
        "Line-level syntax: heading markers, empty link/image targets, fences, and strict-mode style"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Syntax
    }

    fn rule_ids(&self) -> &'static [&'static str] {
        &[
            "heading-depth",
            "heading-space",
            "empty-link",
            "empty-image",
            "unclosed-code-block",
            "line-length",
            "trailing-whitespace",
            "no-tabs",
        ]
    }

    fn check(&self, ctx: &LintContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let strict = ctx.is_strict();

        for (info, line) in ctx.iter_lines() {
            if info.is_fence || info.in_code_block {
                continue;
            }
            self.check_line(info.number, line, strict, &mut diagnostics);
        }

        if let Some(line) = ctx.unclosed_fence {
            diagnostics.push(Diagnostic::error(line, 1, "unclosed-code-block", "Unclosed code block"));
        }

        diagnostics
    }

    fn from_config(config: &crate::config::Config) -> Box<dyn Rule> {
        let max = crate::config::get_rule_config_value::<usize>(config, "line-length", "max")
            .unwrap_or(DEFAULT_MAX_LINE_LENGTH);
        Box::new(Self::new(max))
    }
}
