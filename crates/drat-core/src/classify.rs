//! Token classification against the reference word sets.

use std::collections::HashSet;

use indexmap::IndexSet;

use crate::error::{AnalysisError, AnalysisResult};
use crate::word_sets::WordSets;

/// Counts gathered from one pass over a token sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Number of tokens.
    pub total: usize,
    /// Number of distinct tokens.
    pub unique_count: usize,
    /// Distinct tokens outside the common vocabulary, in first-seen order.
    pub uncommon: IndexSet<String>,
    /// Token occurrences that are not function words.
    pub lexical_count: usize,
}

impl Classification {
    /// Percentage of lexical (non-function) word occurrences.
    ///
    /// Undefined for an empty document, which yields
    /// [`AnalysisError::EmptyDocument`].
    pub fn lexical_density(&self) -> AnalysisResult<f64> {
        if self.total == 0 {
            return Err(AnalysisError::EmptyDocument);
        }
        Ok(self.lexical_count as f64 / self.total as f64 * 100.0)
    }
}

/// Classify `tokens` in a single pass.
#[tracing::instrument(skip_all, fields(tokens = tokens.len()))]
pub fn classify<S: AsRef<str>>(tokens: &[S], words: &WordSets) -> Classification {
    let mut unique: HashSet<&str> = HashSet::new();
    let mut uncommon = IndexSet::new();
    let mut lexical_count = 0;

    for token in tokens {
        let token = token.as_ref();
        if !words.is_function_word(token) {
            lexical_count += 1;
        }
        if unique.insert(token) && !words.is_common(token) {
            uncommon.insert(token.to_string());
        }
    }

    Classification {
        total: tokens.len(),
        unique_count: unique.len(),
        uncommon,
        lexical_count,
    }
}
