use crate::lint_context::LintContext;
use crate::rule::{Diagnostic, Rule, RuleCategory};

pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "svg", "webp"];

/// Checks extracted images for alt text, a known file extension, and HTTPS.
#[derive(Debug, Clone)]
pub struct ImageCheck {
    /// Lowercase extensions without the leading dot
    allowed_extensions: Vec<String>,
}

impl Default for ImageCheck {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_EXTENSIONS.iter().map(|s| s.to_string()).collect())
    }
}

impl ImageCheck {
    pub fn new(allowed_extensions: Vec<String>) -> Self {
        Self {
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    fn has_allowed_extension(&self, src: &str) -> bool {
        let Some((_, ext)) = src.rsplit_once('.') else {
            return false;
        };
        let ext = ext.to_ascii_lowercase();
        self.allowed_extensions.iter().any(|allowed| *allowed == ext)
    }
}

impl Rule for ImageCheck {
    fn name(&self) -> &'static str {
        "images"
    }

    fn description(&self) -> &'static str {
        "Images should have alt text, a known image extension, and use HTTPS"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Image
    }

    fn rule_ids(&self) -> &'static [&'static str] {
        &["missing-alt-text", "image-extension", "insecure-image"]
    }

    fn check(&self, ctx: &LintContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for image in &ctx.metadata.images {
            if image.alt.trim().is_empty() {
                diagnostics.push(Diagnostic::warning(
                    0,
                    0,
                    "missing-alt-text",
                    format!("Image is missing alt text: {}", image.src),
                ));
            }

            if !self.has_allowed_extension(&image.src) {
                diagnostics.push(Diagnostic::warning(
                    0,
                    0,
                    "image-extension",
                    format!("Unrecognised image file extension: {}", image.src),
                ));
            }

            if image.src.starts_with("http://") {
                diagnostics.push(Diagnostic::warning(
                    0,
                    0,
                    "insecure-image",
                    format!("Insecure HTTP image source: {}", image.src),
                ));
            }
        }

        diagnostics
    }

    fn from_config(config: &crate::config::Config) -> Box<dyn Rule> {
        match crate::config::get_rule_config_value::<Vec<String>>(config, "image-extension", "allowed") {
            Some(allowed) => Box::new(Self::new(allowed)),
            None => Box::new(Self::default()),
        }
    }
}
