//! Content-safety gate applied to documents before they are linted.
//!
//! A document flagged here is rejected outright; it never reaches the rules.

use crate::lint_context::FENCE_MARKER;
use regex::Regex;
use std::sync::LazyLock;

static ACTIVE_HTML: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*(script|iframe|object|embed)\b").unwrap());

/// Decides whether a document may be processed at all.
pub trait ContentSafety: Send + Sync {
    /// `Err(reason)` when the document must be rejected
    fn check(&self, content: &str) -> Result<(), String>;
}

/// Rejects raw active HTML elements and NUL bytes outside fenced code.
///
/// Code samples that merely show a `<script>` tag inside a fence are allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicContentSafety;

impl ContentSafety for BasicContentSafety {
    fn check(&self, content: &str) -> Result<(), String> {
        let mut in_fence = false;

        for (idx, line) in content.split('\n').enumerate() {
            if line.trim().starts_with(FENCE_MARKER) {
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }
            if line.contains('\0') {
                return Err(format!("NUL byte on line {}", idx + 1));
            }
            if let Some(cap) = ACTIVE_HTML.captures(line) {
                return Err(format!(
                    "<{}> element on line {}",
                    cap[1].to_ascii_lowercase(),
                    idx + 1
                ));
            }
        }

        Ok(())
    }
}

/// Accepts everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSafetyCheck;

impl ContentSafety for NoSafetyCheck {
    fn check(&self, _content: &str) -> Result<(), String> {
        Ok(())
    }
}
