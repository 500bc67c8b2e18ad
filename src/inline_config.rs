//! Inline suppression comments
//!
//! Supports:
//! - `<!-- mdguard-disable -->` - Disable all rules from this point
//! - `<!-- mdguard-enable -->` - Re-enable all rules from this point
//! - `<!-- mdguard-disable heading-space no-tabs -->` - Disable specific rules
//! - `<!-- mdguard-enable heading-space -->` - Re-enable specific rules
//! - `<!-- mdguard-disable-line no-tabs -->` - Disable rules for the current line
//! - `<!-- mdguard-disable-next-line no-tabs -->` - Disable rules for the next line
//! - `<!-- mdguard-disable-file insecure-link -->` - Disable rules for the entire file
//!
//! Rule names may be diagnostic ids (`insecure-link`) or check names (`links`).
//! Comments inside fenced code blocks are ignored.

use crate::config::normalize_key;
use crate::lint_context::LintContext;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static DIRECTIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--\s*mdguard-(disable-next-line|disable-line|disable-file|disable|enable)((?:\s+[\w-]+)*)\s*-->")
        .unwrap()
});

/// Which rules are switched off at a given point of the document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct RuleState {
    all_disabled: bool,
    disabled: HashSet<String>,
    /// Rules re-enabled while `all_disabled` is set
    enabled: HashSet<String>,
}

impl RuleState {
    fn disable(&mut self, rules: &[String]) {
        if rules.is_empty() {
            *self = RuleState {
                all_disabled: true,
                ..Default::default()
            };
        } else if self.all_disabled {
            for rule in rules {
                self.enabled.remove(rule);
            }
        } else {
            self.disabled.extend(rules.iter().cloned());
        }
    }

    fn enable(&mut self, rules: &[String]) {
        if rules.is_empty() {
            *self = RuleState::default();
        } else if self.all_disabled {
            self.enabled.extend(rules.iter().cloned());
        } else {
            for rule in rules {
                self.disabled.remove(rule);
            }
        }
    }

    fn is_disabled(&self, names: &[&str]) -> bool {
        if self.all_disabled {
            !names.iter().any(|name| self.enabled.contains(*name))
        } else {
            names.iter().any(|name| self.disabled.contains(*name))
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InlineConfig {
    /// State in effect at each line (index 0 is line 1)
    state_at_line: Vec<RuleState>,
    /// Rules disabled for specific lines via disable-line / disable-next-line
    line_disabled_rules: HashMap<usize, RuleState>,
    /// Rules disabled for the entire file
    file_disabled_rules: RuleState,
}

impl InlineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process all inline comments in the document
    pub fn from_context(ctx: &LintContext) -> Self {
        let mut config = Self::new();
        let mut current = RuleState::default();

        for (info, line) in ctx.iter_lines() {
            if !info.in_code_block && !info.is_fence && line.contains("<!--") {
                for cap in DIRECTIVE_REGEX.captures_iter(line) {
                    let rules: Vec<String> = cap
                        .get(2)
                        .map(|m| m.as_str().split_whitespace().map(normalize_key).collect())
                        .unwrap_or_default();

                    match &cap[1] {
                        "disable" => current.disable(&rules),
                        "enable" => current.enable(&rules),
                        "disable-file" => config.file_disabled_rules.disable(&rules),
                        "disable-line" => config.line_disabled_rules.entry(info.number).or_default().disable(&rules),
                        "disable-next-line" => config
                            .line_disabled_rules
                            .entry(info.number + 1)
                            .or_default()
                            .disable(&rules),
                        _ => {}
                    }
                }
            }
            config.state_at_line.push(current.clone());
        }

        config
    }

    /// Whether any of `names` is suppressed at `line` (1-based; 0 = no line)
    pub fn is_rule_disabled(&self, names: &[&str], line: usize) -> bool {
        if self.file_disabled_rules.is_disabled(names) {
            return true;
        }
        if line == 0 {
            return false;
        }
        if self.line_disabled_rules.get(&line).is_some_and(|s| s.is_disabled(names)) {
            return true;
        }
        self.state_at_line
            .get(line - 1)
            .is_some_and(|state| state.is_disabled(names))
    }

    pub fn is_empty(&self) -> bool {
        self.line_disabled_rules.is_empty()
            && self.file_disabled_rules == RuleState::default()
            && self.state_at_line.iter().all(|s| *s == RuleState::default())
    }
}
