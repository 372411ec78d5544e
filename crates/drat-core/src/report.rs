//! Report formatting.
//!
//! [`LexicalReport`] carries the metrics of one document; [`render`] turns
//! it into the fixed-template report text and the one-line summary message.
//! Rendering never touches the filesystem; see [`crate::sink`] for that.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::classify::Classification;
use crate::error::AnalysisResult;

/// Column at which the uncommon-word listing wraps.
pub const WRAP_WIDTH: usize = 80;

const WORD_SEPARATOR: &str = "   ";

/// Lexical statistics for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LexicalReport {
    /// File path or URL the text came from.
    pub document: String,
    /// Number of words.
    pub total_words: usize,
    /// Number of distinct words.
    pub unique_words: usize,
    /// Occurrences of lexical (non-function) words.
    pub lexical_words: usize,
    /// Lexical density as a percentage.
    pub lexical_density: f64,
    /// Distinct words outside the common vocabulary, in first-seen order.
    pub uncommon_words: Vec<String>,
}

impl LexicalReport {
    /// Build the report for `document`, failing on an empty document.
    pub fn from_classification(
        document: impl Into<String>,
        classification: &Classification,
    ) -> AnalysisResult<Self> {
        let lexical_density = classification.lexical_density()?;
        Ok(Self {
            document: document.into(),
            total_words: classification.total,
            unique_words: classification.unique_count,
            lexical_words: classification.lexical_count,
            lexical_density,
            uncommon_words: classification.uncommon.iter().cloned().collect(),
        })
    }

    /// Number of uncommon words.
    pub fn uncommon_count(&self) -> usize {
        self.uncommon_words.len()
    }
}

/// Report text plus its summary message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RenderedReport {
    /// The full multi-line report.
    pub text: String,
    /// One-line summary of the uncommon count and lexical density.
    pub message: String,
}

/// Render `report` as report text and summary message.
pub fn render(report: &LexicalReport) -> RenderedReport {
    let uncommon = report.uncommon_count();
    let density = report.lexical_density;

    let mut text = format!("Report for {}.\n", report.document);
    text.push_str(&format!(
        "The lexical density of this text is {density:.2}.\n"
    ));
    text.push_str(&format!(
        "There are a total of {} unique words in the text.\n",
        report.unique_words
    ));
    text.push_str(&format!(
        "The following {uncommon} words are not in the list of common words:\n"
    ));
    text.push_str(&wrap_words(&report.uncommon_words, WORD_SEPARATOR, WRAP_WIDTH));

    RenderedReport {
        text,
        message: summary_message(uncommon, density),
    }
}

/// The one-line summary shown to the operator.
pub fn summary_message(uncommon: usize, density: f64) -> String {
    format!("There are {uncommon} uncommon words, and the lexical density is {density:.2}.")
}

/// Greedily fill lines of at most `width` columns with `words` joined by `sep`.
///
/// Separators at line breaks are dropped. A word wider than `width` gets a
/// line of its own and is not broken.
pub fn wrap_words<S: AsRef<str>>(words: &[S], sep: &str, width: usize) -> String {
    let sep_width = sep.chars().count();
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in words {
        let word = word.as_ref();
        let word_width = word.chars().count();
        if line.is_empty() {
            line.push_str(word);
            line_width = word_width;
        } else if line_width + sep_width + word_width <= width {
            line.push_str(sep);
            line.push_str(word);
            line_width += sep_width + word_width;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_width = word_width;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines.join("\n")
}
