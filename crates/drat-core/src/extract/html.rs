//! HTML text extraction.

use scraper::{Html, Node};

use super::TextExtractor;
use crate::error::ExtractResult;

/// Elements whose text is never shown to a reader.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Elements that start a new line of text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Extracts the visible text of an HTML page.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExtractor;

impl TextExtractor for HtmlExtractor {
    fn extract(&self, bytes: &[u8]) -> ExtractResult<String> {
        let source = String::from_utf8_lossy(bytes);
        Ok(html_to_text(&source))
    }
}

fn html_to_text(source: &str) -> String {
    let document = Html::parse_document(source);
    let mut text = String::with_capacity(source.len() / 2);

    for node in document.root_element().descendants() {
        match node.value() {
            Node::Element(element) if BLOCK_ELEMENTS.contains(&element.name()) => {
                text.push('\n');
            }
            Node::Text(content) => {
                let hidden = node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|e| HIDDEN_ELEMENTS.contains(&e.name()))
                });
                if !hidden {
                    text.push_str(content);
                }
            }
            _ => {}
        }
    }

    text
}
