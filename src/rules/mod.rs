mod code_block_check;
mod heading_check;
mod image_check;
mod link_check;
mod syntax_scan;

pub use code_block_check::{CodeBlockCheck, DEFAULT_MAX_CODE_BLOCK_CHARS};
pub use heading_check::HeadingCheck;
pub use image_check::{DEFAULT_IMAGE_EXTENSIONS, ImageCheck};
pub use link_check::LinkCheck;
pub use syntax_scan::{DEFAULT_MAX_LINE_LENGTH, SyntaxScan};

use crate::config::{Config, GlobalConfig, normalize_key};
use crate::rule::Rule;
use std::collections::HashSet;

/// Returns all rule instances, in the order their diagnostics are reported
pub fn all_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    type RuleCtor = fn(&Config) -> Box<dyn Rule>;
    const RULES: &[(&str, RuleCtor)] = &[
        ("syntax", SyntaxScan::from_config),
        ("links", LinkCheck::from_config),
        ("images", ImageCheck::from_config),
        ("code-blocks", CodeBlockCheck::from_config),
        ("headings", HeadingCheck::from_config),
    ];
    RULES.iter().map(|(_, ctor)| ctor(config)).collect()
}

/// Every check name and diagnostic id, for config validation
pub fn known_rule_names(rules: &[Box<dyn Rule>]) -> Vec<&'static str> {
    rules
        .iter()
        .flat_map(|rule| std::iter::once(rule.name()).chain(rule.rule_ids().iter().copied()))
        .collect()
}

/// Decides which diagnostics survive the `enable`/`disable` lists.
///
/// Entries may name a check (`links`) or a single diagnostic id (`insecure-link`).
#[derive(Debug, Clone, Default)]
pub struct RuleFilter {
    enable: HashSet<String>,
    disable: HashSet<String>,
}

impl RuleFilter {
    pub fn new<I, S>(enable: I, disable: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            enable: enable.into_iter().map(|s| normalize_key(s.as_ref())).collect(),
            disable: disable.into_iter().map(|s| normalize_key(s.as_ref())).collect(),
        }
    }

    pub fn from_config(global: &GlobalConfig) -> Self {
        Self::new(&global.enable, &global.disable)
    }

    /// Whether diagnostic `id` emitted by check `check` should be kept
    pub fn allows(&self, check: &str, id: &str) -> bool {
        let named = |set: &HashSet<String>| set.contains(check) || set.contains(id);
        let enabled = named(&self.enable);

        // Handle 'disable: ["all"]': only explicitly enabled rules survive
        if self.disable.contains("all") {
            return enabled;
        }
        if !self.enable.is_empty() && !enabled {
            return false;
        }
        !named(&self.disable)
    }

    /// Whether any diagnostic of `rule` could be kept
    pub fn allows_rule(&self, rule: &dyn Rule) -> bool {
        rule.rule_ids().iter().any(|id| self.allows(rule.name(), id))
    }
}

/// Drop rules that cannot produce any allowed diagnostic
pub fn filter_rules(rules: &[Box<dyn Rule>], global_config: &GlobalConfig) -> Vec<Box<dyn Rule>> {
    let filter = RuleFilter::from_config(global_config);
    rules
        .iter()
        .filter(|rule| filter.allows_rule(rule.as_ref()))
        .map(|rule| dyn_clone::clone_box(&**rule))
        .collect()
}
