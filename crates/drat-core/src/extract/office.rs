//! Office document text extraction.
//!
//! `.docx` and OpenDocument files are zip archives with the body stored as
//! XML in a single entry. The XML is walked event by event; character data
//! is kept and structural elements are mapped to whitespace.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use super::TextExtractor;
use crate::config::DEFAULT_MAX_INPUT_BYTES;
use crate::error::{ExtractError, ExtractResult};

const DOCX_BODY: &str = "word/document.xml";
const OPENDOCUMENT_BODY: &str = "content.xml";

/// Extracts text from Office Open XML word-processing documents.
#[derive(Debug, Clone, Copy)]
pub struct DocxExtractor {
    max_entry_bytes: Option<usize>,
}

impl DocxExtractor {
    /// Cap the decompressed body at `max_entry_bytes`; `None` disables it.
    pub const fn new(max_entry_bytes: Option<usize>) -> Self {
        Self { max_entry_bytes }
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new(Some(DEFAULT_MAX_INPUT_BYTES))
    }
}

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> ExtractResult<String> {
        let xml = read_archive_entry(bytes, DOCX_BODY, self.max_entry_bytes)?;
        xml_to_text(&xml)
    }
}

/// Extracts text from OpenDocument text, spreadsheet and presentation files.
#[derive(Debug, Clone, Copy)]
pub struct OpenDocumentExtractor {
    max_entry_bytes: Option<usize>,
}

impl OpenDocumentExtractor {
    /// Cap the decompressed body at `max_entry_bytes`; `None` disables it.
    pub const fn new(max_entry_bytes: Option<usize>) -> Self {
        Self { max_entry_bytes }
    }
}

impl Default for OpenDocumentExtractor {
    fn default() -> Self {
        Self::new(Some(DEFAULT_MAX_INPUT_BYTES))
    }
}

impl TextExtractor for OpenDocumentExtractor {
    fn extract(&self, bytes: &[u8]) -> ExtractResult<String> {
        let xml = read_archive_entry(bytes, OPENDOCUMENT_BODY, self.max_entry_bytes)?;
        xml_to_text(&xml)
    }
}

/// Decompress one archive entry, refusing to inflate past `limit` bytes.
fn read_archive_entry(
    bytes: &[u8],
    part: &'static str,
    limit: Option<usize>,
) -> ExtractResult<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let entry = match archive.by_name(part) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(ExtractError::MissingPart { part });
        }
        Err(e) => return Err(e.into()),
    };

    // One byte past the limit is enough to tell it was exceeded.
    let cap = limit.map_or(u64::MAX, |limit| (limit as u64).saturating_add(1));
    let mut body = Vec::new();
    entry.take(cap).read_to_end(&mut body)?;
    if let Some(limit) = limit
        && body.len() > limit
    {
        return Err(ExtractError::TooLarge {
            name: part.to_string(),
            size: body.len() as u64,
            limit,
        });
    }
    String::from_utf8(body)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

/// What a structural element contributes to the extracted text.
enum Break {
    Newline,
    Space,
}

/// Classify an element by local name (namespace prefixes differ per format).
fn element_break(local_name: &[u8]) -> Option<Break> {
    match local_name {
        // w:p, text:p, text:h
        b"p" | b"h" => Some(Break::Newline),
        // w:br, w:cr, text:line-break
        b"br" | b"cr" | b"line-break" => Some(Break::Newline),
        // w:tab, text:tab, text:s
        b"tab" | b"s" => Some(Break::Space),
        _ => None,
    }
}

fn push_break(text: &mut String, brk: Break) {
    text.push(match brk {
        Break::Newline => '\n',
        Break::Space => ' ',
    });
}

fn xml_to_text(xml: &str) -> ExtractResult<String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::with_capacity(xml.len() / 4);

    loop {
        match reader.read_event()? {
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
            Event::End(e) => {
                if let Some(Break::Newline) = element_break(e.local_name().as_ref()) {
                    text.push('\n');
                }
            }
            Event::Empty(e) => {
                if let Some(brk) = element_break(e.local_name().as_ref()) {
                    push_break(&mut text, brk);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}
