use crate::metadata::DocumentMetadata;

/// Fence marker that toggles code-block state
pub const FENCE_MARKER: &str = "```";

/// Per-call options that change which checks run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LintOptions {
    /// Enable stylistic checks (line length, trailing whitespace, tabs, first heading)
    pub strict: bool,
}

impl LintOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Pre-computed information about a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInfo {
    /// 1-based line number
    pub number: usize,
    /// Byte offset where this line starts in the document
    pub byte_offset: usize,
    /// Length of the line in bytes (without `\n` or a trailing `\r`)
    pub byte_len: usize,
    /// Whether this line opens or closes a fenced code block
    pub is_fence: bool,
    /// Whether this line sits between an opening and a closing fence
    pub in_code_block: bool,
}

impl LineInfo {
    /// Get the line content as a string slice from the source document
    pub fn content<'a>(&self, source: &'a str) -> &'a str {
        &source[self.byte_offset..self.byte_offset + self.byte_len]
    }
}

/// Everything a rule may look at for one lint call.
///
/// Built once per document and shared read-only by all rules.
pub struct LintContext<'a> {
    pub content: &'a str,
    pub lines: Vec<LineInfo>,
    pub metadata: &'a DocumentMetadata,
    pub options: LintOptions,
    /// Line of a fence that is never closed, if any
    pub unclosed_fence: Option<usize>,
}

impl<'a> LintContext<'a> {
    pub fn new(content: &'a str, metadata: &'a DocumentMetadata, options: LintOptions) -> Self {
        let (lines, unclosed_fence) = Self::compute_line_info(content);
        Self {
            content,
            lines,
            metadata,
            options,
            unclosed_fence,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.options.strict
    }

    /// Iterate `(info, content)` pairs in document order
    pub fn iter_lines(&self) -> impl Iterator<Item = (&LineInfo, &'a str)> {
        let content = self.content;
        self.lines.iter().map(move |info| (info, info.content(content)))
    }

    /// Get line info by 1-based line number
    #[cfg(test)]
    fn line_info(&self, line_num: usize) -> Option<&LineInfo> {
        if line_num > 0 { self.lines.get(line_num - 1) } else { None }
    }

    #[cfg(test)]
    fn is_in_code_block(&self, line_num: usize) -> bool {
        self.line_info(line_num).is_some_and(|info| info.in_code_block)
    }

    fn compute_line_info(content: &str) -> (Vec<LineInfo>, Option<usize>) {
        let mut lines = Vec::new();
        let mut byte_offset = 0;
        let mut open_fence: Option<usize> = None;

        for (idx, raw) in content.split('\n').enumerate() {
            let text = raw.strip_suffix('\r').unwrap_or(raw);
            let is_fence = text.trim().starts_with(FENCE_MARKER);
            let in_code_block = open_fence.is_some() && !is_fence;

            if is_fence {
                open_fence = match open_fence {
                    Some(_) => None,
                    None => Some(idx + 1),
                };
            }

            lines.push(LineInfo {
                number: idx + 1,
                byte_offset,
                byte_len: text.len(),
                is_fence,
                in_code_block,
            });
            byte_offset += raw.len() + 1;
        }

        (lines, open_fence)
    }
}
