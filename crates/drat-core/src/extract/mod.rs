//! Text extraction from document bytes.
//!
//! Each [`DocumentFormat`] has a [`TextExtractor`] that turns raw bytes into
//! plain text suitable for [`crate::tokenize`]. The format is chosen from a
//! file extension or an HTTP `Content-Type`, or set explicitly by the caller.

mod html;
mod markdown;
mod office;

use camino::Utf8Path;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ExtractResult;

pub use html::HtmlExtractor;
pub use markdown::MarkdownExtractor;
pub use office::{DocxExtractor, OpenDocumentExtractor};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DocumentFormat {
    /// Plain text in any encoding close enough to UTF-8.
    PlainText,
    /// CommonMark; code blocks are ignored.
    Markdown,
    /// An HTML page; only visible text is kept.
    Html,
    /// Office Open XML word-processing document (`.docx`).
    Docx,
    /// OpenDocument text, spreadsheet or presentation (`.odt`, `.ods`, `.odp`).
    OpenDocument,
}

impl DocumentFormat {
    /// Detect the format of a local file from its extension.
    pub fn from_path(path: &Utf8Path) -> Self {
        let ext = path.extension().map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("docx") => Self::Docx,
            Some("odt" | "ods" | "odp") => Self::OpenDocument,
            Some("html" | "htm" | "xhtml") => Self::Html,
            Some("md" | "markdown") => Self::Markdown,
            _ => Self::PlainText,
        }
    }

    /// Detect the format of a downloaded body from its `Content-Type`.
    ///
    /// Web pages without a usable content type are assumed to be HTML.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(content_type) = content_type else {
            return Self::Html;
        };
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match mime.as_str() {
            "text/plain" => Self::PlainText,
            "text/markdown" | "text/x-markdown" => Self::Markdown,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Self::Docx
            }
            m if m.starts_with("application/vnd.oasis.opendocument.") => Self::OpenDocument,
            _ => Self::Html,
        }
    }

    /// Returns the format name as used on the command line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "plain-text",
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Docx => "docx",
            Self::OpenDocument => "open-document",
        }
    }

    /// The extractor for this format.
    ///
    /// `max_entry_bytes` caps how far an office archive's body may inflate.
    pub fn extractor(self, max_entry_bytes: Option<usize>) -> Box<dyn TextExtractor> {
        match self {
            Self::PlainText => Box::new(PlainTextExtractor),
            Self::Markdown => Box::new(MarkdownExtractor),
            Self::Html => Box::new(HtmlExtractor),
            Self::Docx => Box::new(DocxExtractor::new(max_entry_bytes)),
            Self::OpenDocument => Box::new(OpenDocumentExtractor::new(max_entry_bytes)),
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns the raw bytes of one document into plain text.
pub trait TextExtractor: Send + Sync {
    /// Extract the document's text.
    fn extract(&self, bytes: &[u8]) -> ExtractResult<String>;
}

/// Decodes bytes as UTF-8, replacing invalid sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> ExtractResult<String> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Extract text from `bytes` in the given format.
///
/// Decompressed office bodies larger than `max_input_bytes` are rejected
/// with [`crate::error::ExtractError::TooLarge`].
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn extract_text(
    format: DocumentFormat,
    bytes: &[u8],
    max_input_bytes: Option<usize>,
) -> ExtractResult<String> {
    format.extractor(max_input_bytes).extract(bytes)
}
