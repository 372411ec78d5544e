//! Command implementations.

use anyhow::Context;
use camino::Utf8PathBuf;
use drat_core::config::Config;
use drat_core::word_sets::WordSets;

pub mod check;
pub mod info;
#[cfg(feature = "mcp")]
pub mod serve;

/// Load the reference word sets and merge every supplementary list.
///
/// Lists named in the configuration are merged before those passed on the
/// command line. Any unreadable list aborts the run.
pub fn load_word_sets(config: &Config, extra: &[Utf8PathBuf]) -> anyhow::Result<WordSets> {
    let mut words = match config.wordlist_dir {
        Some(ref dir) => WordSets::load(dir)
            .with_context(|| format!("failed to load reference word lists from {dir}"))?,
        None => WordSets::builtin(),
    };

    let configured = config.wordlists.as_deref().unwrap_or_default();
    for path in configured.iter().chain(extra) {
        let added = words
            .merge_supplement_file(path)
            .with_context(|| format!("failed to load supplementary word list {path}"))?;
        tracing::debug!(path = %path, added, "merged supplementary word list");
    }

    tracing::debug!(
        function_words = words.function_len(),
        common_words = words.common_len(),
        "word sets ready"
    );
    Ok(words)
}
