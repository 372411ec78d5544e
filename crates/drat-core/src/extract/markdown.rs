//! Markdown text extraction.
//!
//! Uses pulldown-cmark so that code blocks, inline code and raw HTML are
//! recognized properly and left out; everything a reader sees as prose,
//! headings included, is kept.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use super::TextExtractor;
use crate::error::ExtractResult;

/// Extracts prose from CommonMark documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> ExtractResult<String> {
        let source = String::from_utf8_lossy(bytes);
        Ok(markdown_to_text(&source))
    }
}

fn markdown_to_text(source: &str) -> String {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let mut text = String::with_capacity(source.len());
    let mut in_code_block = false;

    for event in Parser::new_ext(source, options) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(t) if !in_code_block => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::TableCell
                | TagEnd::TableRow,
            ) => text.push('\n'),
            _ => {}
        }
    }

    text
}
