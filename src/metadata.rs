//! Structural metadata extracted from a Markdown document.
//!
//! The checks in `rules` never parse Markdown themselves: they consume a
//! [`DocumentMetadata`] produced by a [`MetadataExtractor`]. The default
//! extractor walks `pulldown-cmark` events in-process; [`StaticMetadata`]
//! stands in for an external collaborator that has already done the work.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

/// A heading in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    /// 1-based line of the heading marker
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub alt: String,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub language: String,
    pub code: String,
}

/// Everything the metadata checks need to know about one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub headings: Vec<Heading>,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    pub code_blocks: Vec<CodeBlock>,
}

/// Failure of the upstream metadata collaborator
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Failed to parse document metadata: {0}")]
    Parse(String),

    #[error("Metadata extraction timed out after {millis}ms")]
    Timeout { millis: u64 },

    #[error("Metadata extractor unavailable: {0}")]
    Unavailable(String),
}

/// Produces [`DocumentMetadata`] for a document.
pub trait MetadataExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract(&self, content: &str) -> Result<DocumentMetadata, ExtractError>;
}

/// Returns metadata supplied up front, ignoring the document content.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata {
    metadata: DocumentMetadata,
}

impl StaticMetadata {
    pub fn new(metadata: DocumentMetadata) -> Self {
        Self { metadata }
    }

    /// Parse metadata from its JSON form
    /// (`{"headings": [...], "links": [...], "images": [...], "codeBlocks": [...]}`)
    pub fn from_json(json: &str) -> Result<Self, ExtractError> {
        serde_json::from_str(json)
            .map(Self::new)
            .map_err(|e| ExtractError::Parse(e.to_string()))
    }
}

impl MetadataExtractor for StaticMetadata {
    fn name(&self) -> &'static str {
        "static"
    }

    fn extract(&self, _content: &str) -> Result<DocumentMetadata, ExtractError> {
        Ok(self.metadata.clone())
    }
}

/// In-process extractor built on `pulldown-cmark`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulldownExtractor;

/// An element whose text is still being collected
enum Open {
    Heading { level: u8, line: usize, text: String },
    Link { url: String, text: String },
    Image { src: String, alt: String },
    Code { language: String, code: String },
}

impl Open {
    fn push_text(&mut self, s: &str) {
        match self {
            Open::Heading { text, .. } | Open::Link { text, .. } => text.push_str(s),
            Open::Image { alt, .. } => alt.push_str(s),
            Open::Code { code, .. } => code.push_str(s),
        }
    }
}

impl PulldownExtractor {
    fn options() -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        options
    }

    /// Collect metadata from `content`. Never fails: pulldown-cmark accepts any input.
    pub fn collect(content: &str) -> DocumentMetadata {
        let line_offsets = line_offsets(content);
        let mut metadata = DocumentMetadata::default();
        let mut stack: Vec<Open> = Vec::new();

        for (event, range) in Parser::new_ext(content, Self::options()).into_offset_iter() {
            match event {
                Event::Start(Tag::Heading { level, .. }) => stack.push(Open::Heading {
                    level: level as u8,
                    line: offset_to_line(&line_offsets, range.start),
                    text: String::new(),
                }),
                Event::Start(Tag::Link { dest_url, .. }) => stack.push(Open::Link {
                    url: dest_url.to_string(),
                    text: String::new(),
                }),
                Event::Start(Tag::Image { dest_url, .. }) => stack.push(Open::Image {
                    src: dest_url.to_string(),
                    alt: String::new(),
                }),
                Event::Start(Tag::CodeBlock(kind)) => {
                    let language = match kind {
                        CodeBlockKind::Fenced(info) => info.split_whitespace().next().unwrap_or("").to_string(),
                        CodeBlockKind::Indented => String::new(),
                    };
                    stack.push(Open::Code {
                        language,
                        code: String::new(),
                    });
                }
                Event::End(TagEnd::Heading(_) | TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock) => {
                    let Some(open) = stack.pop() else { continue };
                    match open {
                        Open::Heading { level, line, text } => metadata.headings.push(Heading {
                            level,
                            text: text.trim().to_string(),
                            line,
                        }),
                        Open::Link { url, text } => metadata.links.push(Link { text, url }),
                        Open::Image { src, alt } => metadata.images.push(Image { alt, src }),
                        Open::Code { language, code } => metadata.code_blocks.push(CodeBlock { language, code }),
                    }
                }
                // Text belongs to every enclosing element: a heading wrapping a
                // link, or a link wrapping an image, all see it
                Event::Text(text) | Event::Code(text) => {
                    for open in &mut stack {
                        open.push_text(&text);
                    }
                }
                Event::SoftBreak | Event::HardBreak => {
                    for open in &mut stack {
                        open.push_text(" ");
                    }
                }
                _ => {}
            }
        }

        log::debug!(
            "Extracted {} headings, {} links, {} images, {} code blocks",
            metadata.headings.len(),
            metadata.links.len(),
            metadata.images.len(),
            metadata.code_blocks.len()
        );

        metadata
    }
}

impl MetadataExtractor for PulldownExtractor {
    fn name(&self) -> &'static str {
        "pulldown-cmark"
    }

    fn extract(&self, content: &str) -> Result<DocumentMetadata, ExtractError> {
        Ok(Self::collect(content))
    }
}

fn line_offsets(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, b) in content.bytes().enumerate() {
        if b == b'\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// 1-based line containing byte `offset`
fn offset_to_line(line_offsets: &[usize], offset: usize) -> usize {
    line_offsets.partition_point(|&start| start <= offset).max(1)
}
