//! Reference word sets: function words and common vocabulary.
//!
//! Both lists are plain text, one word per line. They are loaded once per
//! run and only read afterwards; supplementary lists may be merged into the
//! common vocabulary before analysis starts.

use std::collections::HashSet;

use camino::Utf8Path;

use crate::error::{WordListError, WordListResult};

/// File name of the function-word list inside a word-list directory.
pub const FUNCTION_WORDS_FILE: &str = "EN_function.txt";

/// File name of the common-vocabulary list inside a word-list directory.
pub const COMMON_WORDS_FILE: &str = "EN_vocab.txt";

static BUILTIN_FUNCTION_WORDS: &str = include_str!("../data/EN_function.txt");
static BUILTIN_COMMON_WORDS: &str = include_str!("../data/EN_vocab.txt");

/// The two reference sets every analysis compares tokens against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSets {
    function: HashSet<String>,
    common: HashSet<String>,
}

impl WordSets {
    /// Build word sets from in-memory word collections.
    pub fn from_words<F, C, S, T>(function: F, common: C) -> Self
    where
        F: IntoIterator<Item = S>,
        C: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            function: collect_words(function),
            common: collect_words(common),
        }
    }

    /// The lists compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            function: collect_words(BUILTIN_FUNCTION_WORDS.lines()),
            common: collect_words(BUILTIN_COMMON_WORDS.lines()),
        }
    }

    /// Load [`FUNCTION_WORDS_FILE`] and [`COMMON_WORDS_FILE`] from `dir`.
    ///
    /// A missing or unreadable list is an error; there is no fallback to the
    /// built-in lists.
    #[tracing::instrument(skip_all, fields(dir = %dir))]
    pub fn load(dir: &Utf8Path) -> WordListResult<Self> {
        let function = read_list(&dir.join(FUNCTION_WORDS_FILE))?;
        let common = read_list(&dir.join(COMMON_WORDS_FILE))?;
        let sets = Self {
            function: collect_words(function.lines()),
            common: collect_words(common.lines()),
        };
        tracing::debug!(
            function_words = sets.function.len(),
            common_words = sets.common.len(),
            "word lists loaded"
        );
        Ok(sets)
    }

    /// Merge supplementary words into the common vocabulary.
    ///
    /// Lines are trimmed and lowercased; blank lines are skipped. Returns how
    /// many words were new.
    pub fn merge_supplement<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.common.len();
        self.common.extend(collect_words(lines));
        self.common.len() - before
    }

    /// Read a supplementary list file and merge it into the common vocabulary.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn merge_supplement_file(&mut self, path: &Utf8Path) -> WordListResult<usize> {
        let content = read_list(path)?;
        let added = self.merge_supplement(content.lines());
        tracing::debug!(added, "supplementary word list merged");
        Ok(added)
    }

    /// Returns a copy with `words` added to the common vocabulary.
    pub fn with_supplement<I, S>(&self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sets = self.clone();
        sets.merge_supplement(words);
        sets
    }

    /// Whether `word` is a closed-class grammatical word.
    pub fn is_function_word(&self, word: &str) -> bool {
        self.function.contains(word)
    }

    /// Whether `word` belongs to the common vocabulary.
    pub fn is_common(&self, word: &str) -> bool {
        self.common.contains(word)
    }

    /// Number of function words.
    pub fn function_len(&self) -> usize {
        self.function.len()
    }

    /// Number of common-vocabulary words.
    pub fn common_len(&self) -> usize {
        self.common.len()
    }
}

fn read_list(path: &Utf8Path) -> WordListResult<String> {
    std::fs::read_to_string(path.as_std_path()).map_err(|source| WordListError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn collect_words<I, S>(lines: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| line.as_ref().trim().to_lowercase())
        .filter(|word| !word.is_empty())
        .collect()
}
