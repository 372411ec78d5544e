//! End-to-end analysis of one document's text.
//!
//! Ties [`crate::tokenize`], [`crate::classify`] and [`crate::report`]
//! together. Nothing here touches the filesystem or the network, so the
//! same entry points serve the CLI and the MCP server.

use crate::classify::classify;
use crate::error::AnalysisResult;
use crate::report::{LexicalReport, RenderedReport, render};
use crate::tokenize::tokenize;
use crate::word_sets::WordSets;

/// Analyze `text` and build its report.
#[tracing::instrument(skip(text, words), fields(len = text.len()))]
pub fn analyze_text(document: &str, text: &str, words: &WordSets) -> AnalysisResult<LexicalReport> {
    let tokens = tokenize(text);
    let classification = classify(&tokens, words);
    tracing::debug!(
        total = classification.total,
        unique = classification.unique_count,
        uncommon = classification.uncommon.len(),
        "classified"
    );
    LexicalReport::from_classification(document, &classification)
}

/// Analyze `text` and render the report text and summary message.
pub fn check_text(
    document: &str,
    text: &str,
    words: &WordSets,
) -> AnalysisResult<(LexicalReport, RenderedReport)> {
    let report = analyze_text(document, text, words)?;
    let rendered = render(&report);
    Ok((report, rendered))
}
