//! Approximate word counting for Markdown text.
//!
//! Code is not prose: fenced blocks and inline code spans are removed before
//! counting. Punctuation becomes whitespace and the remaining whitespace-separated
//! tokens are counted. This is not locale-aware and does not implement Unicode
//! word segmentation (a CJK sentence without spaces is a single word).

use regex::Regex;
use std::sync::LazyLock;

// Non-greedy across lines
static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]*`").unwrap());
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Count prose words in `content`
pub fn count_words(content: &str) -> usize {
    let without_fences = FENCED_CODE.replace_all(content, " ");
    let without_code = INLINE_CODE.replace_all(&without_fences, " ");
    let words_only = NON_WORD.replace_all(&without_code, " ");
    words_only.split_whitespace().count()
}
