//! Request-level validation: input gating, metadata extraction, and the
//! success/failure response envelope around the pure linter.

use crate::config::{Config, DEFAULT_MAX_INPUT_CHARS};
use crate::lint_context::LintOptions;
use crate::metadata::{ExtractError, MetadataExtractor, PulldownExtractor};
use crate::rule::Rule;
use crate::rules::{RuleFilter, all_rules, filter_rules};
use crate::safety::{BasicContentSafety, ContentSafety, NoSafetyCheck};
use crate::types::ValidationResult;
use serde::{Deserialize, Serialize};

/// Message returned when the failure is ours rather than the caller's
pub const GENERIC_FAILURE_MESSAGE: &str = "Markdown validation failed";

/// A validation request as received from a caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub markdown: Option<String>,
    pub strict: Option<bool>,
}

impl ValidationRequest {
    pub fn new(markdown: impl Into<String>, strict: bool) -> Self {
        Self {
            markdown: Some(markdown.into()),
            strict: Some(strict),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Markdown content is required")]
    MissingMarkdown,

    #[error("Markdown content too large ({len} characters, maximum {max})")]
    TooLarge { len: usize, max: usize },

    #[error("Markdown content rejected by safety check: {reason}")]
    Unsafe { reason: String },

    #[error("Metadata extraction failed: {0}")]
    Metadata(#[from] ExtractError),
}

impl ValidationError {
    /// Rejections caused by the request itself (4xx-style), as opposed to upstream failures
    pub fn is_input_rejection(&self) -> bool {
        !matches!(self, ValidationError::Metadata(_))
    }

    /// Message safe to show an end user. Upstream failures never leak their details.
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::Metadata(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Response envelope: `{"success": true, ...result}` or `{"success": false, "error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationResponse {
    Success {
        success: bool,
        #[serde(flatten)]
        result: ValidationResult,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl ValidationResponse {
    pub fn success(result: ValidationResult) -> Self {
        ValidationResponse::Success { success: true, result }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        ValidationResponse::Failure {
            success: false,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ValidationResponse::Success { .. })
    }
}

impl From<Result<ValidationResult, ValidationError>> for ValidationResponse {
    fn from(outcome: Result<ValidationResult, ValidationError>) -> Self {
        match outcome {
            Ok(result) => ValidationResponse::success(result),
            Err(e) => {
                if e.is_input_rejection() {
                    log::info!("Rejected validation request: {e}");
                } else {
                    log::error!("Validation failed: {e}");
                }
                ValidationResponse::failure(e.user_message())
            }
        }
    }
}

/// Wires configuration, rules, the metadata extractor and the safety gate together.
pub struct Validator {
    rules: Vec<Box<dyn Rule>>,
    filter: RuleFilter,
    extractor: Box<dyn MetadataExtractor>,
    safety: Box<dyn ContentSafety>,
    max_input_chars: usize,
    default_strict: bool,
    inline_directives: bool,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Validator {
    pub fn new(config: &Config) -> Self {
        let safety: Box<dyn ContentSafety> = if config.global.safety_check {
            Box::new(BasicContentSafety)
        } else {
            Box::new(NoSafetyCheck)
        };

        Self {
            rules: filter_rules(&all_rules(config), &config.global),
            filter: RuleFilter::from_config(&config.global),
            extractor: Box::new(PulldownExtractor),
            safety,
            max_input_chars: effective_max_input(config.global.max_input_chars),
            default_strict: config.global.strict,
            inline_directives: false,
        }
    }

    pub fn with_extractor(mut self, extractor: Box<dyn MetadataExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_safety(mut self, safety: Box<dyn ContentSafety>) -> Self {
        self.safety = safety;
        self
    }

    pub fn with_max_input_chars(mut self, max: usize) -> Self {
        self.max_input_chars = effective_max_input(max);
        self
    }

    /// Honour `<!-- mdguard-... -->` comments in validated documents. Off by
    /// default, since a request's document must not silence its own findings.
    pub fn with_inline_directives(mut self, enabled: bool) -> Self {
        self.inline_directives = enabled;
        self
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Reject empty, oversized or unsafe input before any linting happens
    pub fn check_input(&self, markdown: &str) -> Result<(), ValidationError> {
        if markdown.is_empty() {
            return Err(ValidationError::MissingMarkdown);
        }
        self.check_limits(markdown)
    }

    fn check_limits(&self, markdown: &str) -> Result<(), ValidationError> {
        let len = markdown.chars().count();
        if len > self.max_input_chars {
            return Err(ValidationError::TooLarge {
                len,
                max: self.max_input_chars,
            });
        }

        self.safety
            .check(markdown)
            .map_err(|reason| ValidationError::Unsafe { reason })
    }

    /// Validate one document. Diagnostics are data, not failures: any document that
    /// passes the input gate and whose metadata can be extracted yields `Ok`.
    pub fn validate_markdown(&self, markdown: &str, strict: bool) -> Result<ValidationResult, ValidationError> {
        self.check_input(markdown)?;
        self.lint_document(markdown, strict)
    }

    /// Validate a document read from disk. Empty files are linted like any other.
    pub fn validate_file_content(&self, content: &str, strict: bool) -> Result<ValidationResult, ValidationError> {
        self.check_limits(content)?;
        self.lint_document(content, strict)
    }

    fn lint_document(&self, markdown: &str, strict: bool) -> Result<ValidationResult, ValidationError> {
        let metadata = self.extractor.extract(markdown)?;
        log::debug!("Metadata extracted by {}", self.extractor.name());

        Ok(crate::lint_with_filter(
            markdown,
            &metadata,
            LintOptions { strict },
            &self.rules,
            &self.filter,
            self.inline_directives,
        ))
    }

    pub fn validate(&self, request: &ValidationRequest) -> Result<ValidationResult, ValidationError> {
        let markdown = request.markdown.as_deref().ok_or(ValidationError::MissingMarkdown)?;
        self.validate_markdown(markdown, request.strict.unwrap_or(self.default_strict))
    }

    /// Validate and wrap the outcome in the response envelope
    pub fn respond(&self, request: &ValidationRequest) -> ValidationResponse {
        self.validate(request).into()
    }
}

fn effective_max_input(max: usize) -> usize {
    if max == 0 { DEFAULT_MAX_INPUT_CHARS } else { max }
}
