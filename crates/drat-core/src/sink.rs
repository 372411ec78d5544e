//! Report persistence.
//!
//! Reports are written as `<name>_<unix seconds>.txt`, where `<name>` is a
//! filesystem-safe rendition of the document's path or URL. Existing files
//! are never overwritten: a clash gets a `-1`, `-2`, ... suffix instead.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;

use crate::error::{ReportError, ReportResult};
use crate::report::RenderedReport;

/// Base name used when nothing usable survives sanitizing.
const FALLBACK_NAME: &str = "report";

static URL_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://").expect("valid regex"));

/// Derive a filesystem-safe base name from a document identifier.
///
/// URLs lose their scheme and any leading `www.`; file paths are reduced to
/// their stem. Only the first whitespace-delimited token is kept, and every
/// character other than ASCII letters, digits, `-` and `_` is removed.
pub fn report_base_name(identifier: &str) -> String {
    let trimmed = identifier.trim();
    let stripped = if let Some(scheme) = URL_SCHEME.find(trimmed) {
        let rest = &trimmed[scheme.end()..];
        rest.strip_prefix("www.").unwrap_or(rest)
    } else {
        Utf8Path::new(trimmed).file_stem().unwrap_or(trimmed)
    };

    let name: String = stripped
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect();

    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}

/// Report file name for `identifier` at `unix_seconds`.
pub fn report_file_name(identifier: &str, unix_seconds: f64) -> String {
    numbered_file_name(&report_stem(identifier, unix_seconds), 0)
}

fn report_stem(identifier: &str, unix_seconds: f64) -> String {
    format!("{}_{unix_seconds:.2}", report_base_name(identifier))
}

fn numbered_file_name(stem: &str, attempt: u32) -> String {
    if attempt == 0 {
        format!("{stem}.txt")
    } else {
        format!("{stem}-{attempt}.txt")
    }
}

/// Write `text` to a fresh report file in `dir` and return its path.
///
/// The file is created exclusively; if the timestamped name is taken, the
/// next free numbered name is used.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn write_report(dir: &Utf8Path, identifier: &str, text: &str) -> ReportResult<Utf8PathBuf> {
    let stem = report_stem(identifier, unix_now());
    let mut attempt = 0;
    loop {
        let path = dir.join(numbered_file_name(&stem, attempt));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path.as_std_path())
        {
            Ok(mut file) => {
                file.write_all(text.as_bytes())
                    .map_err(|source| ReportError::Write {
                        path: path.clone(),
                        source,
                    })?;
                tracing::debug!(path = %path, "report written");
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!(path = %path, "report name taken");
                attempt += 1;
            }
            Err(source) => return Err(ReportError::Write { path, source }),
        }
    }
}

/// Persist a rendered report and append the file hint to its message.
///
/// This is the console counterpart of [`crate::report::render`]: the
/// returned message is what the operator should see.
pub fn persist(
    dir: &Utf8Path,
    identifier: &str,
    rendered: &RenderedReport,
) -> ReportResult<(Utf8PathBuf, String)> {
    let path = write_report(dir, identifier, &rendered.text)?;
    let file_name = path.file_name().unwrap_or(path.as_str());
    let message = format!(
        "{}\nFor further details, read the {file_name} file.",
        rendered.message
    );
    Ok((path, message))
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn url_base_name_strips_scheme_and_separators() {
        assert_eq!(report_base_name("http://example.com/page"), "examplecompage");
        assert_eq!(report_base_name("https://www.example.org/a/b.html"), "exampleorgabhtml");
    }

    #[test]
    fn url_query_characters_are_dropped() {
        assert_eq!(report_base_name("https://example.com/?q=1&r=2"), "examplecomq1r2");
    }

    #[test]
    fn file_base_name_is_stem() {
        assert_eq!(report_base_name("notes.txt"), "notes");
        assert_eq!(report_base_name("drafts/chapter_1.docx"), "chapter_1");
    }

    #[test]
    fn first_whitespace_token_wins() {
        assert_eq!(report_base_name("my notes.txt"), "my");
    }

    #[test]
    fn unusable_identifier_falls_back() {
        assert_eq!(report_base_name("http://"), FALLBACK_NAME);
        assert_eq!(report_base_name("   "), FALLBACK_NAME);
    }

    #[test]
    fn file_name_carries_timestamp() {
        assert_eq!(
            report_file_name("http://example.com/page", 1_700_000_000.25),
            "examplecompage_1700000000.25.txt"
        );
        assert_eq!(report_file_name("notes.txt", 12.5), "notes_12.50.txt");
    }

    #[test]
    fn write_report_creates_file() {
        let tmp = TempDir::new().unwrap();
        let dir = Utf8Path::from_path(tmp.path()).unwrap();

        let path = write_report(dir, "notes.txt", "Report for notes.txt.\n").unwrap();

        assert!(path.starts_with(dir));
        let name = path.file_name().unwrap();
        assert!(name.starts_with("notes_") && name.ends_with(".txt"), "{name}");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Report for notes.txt.\n"
        );
    }

    #[test]
    fn write_report_never_overwrites() {
        let tmp = TempDir::new().unwrap();
        let dir = Utf8Path::from_path(tmp.path()).unwrap();

        let first = write_report(dir, "a/notes.txt", "first").unwrap();
        let second = write_report(dir, "b/notes.txt", "second").unwrap();
        let third = write_report(dir, "b/notes.txt", "third").unwrap();

        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_eq!(std::fs::read_to_string(&first).unwrap(), "first");
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "second");
        assert_eq!(std::fs::read_to_string(&third).unwrap(), "third");
    }

    #[test]
    fn taken_name_gets_a_counter() {
        let stem = report_stem("notes.txt", 12.5);
        assert_eq!(numbered_file_name(&stem, 0), "notes_12.50.txt");
        assert_eq!(numbered_file_name(&stem, 2), "notes_12.50-2.txt");
    }

    #[test]
    fn write_report_to_missing_dir_fails() {
        let result = write_report(Utf8Path::new("/nonexistent/drat/out"), "notes.txt", "x");
        assert!(matches!(result, Err(ReportError::Write { .. })));
    }

    #[test]
    fn persist_appends_file_hint() {
        let tmp = TempDir::new().unwrap();
        let dir = Utf8Path::from_path(tmp.path()).unwrap();
        let rendered = RenderedReport {
            text: "body".to_string(),
            message: "There are 0 uncommon words, and the lexical density is 10.00.".to_string(),
        };

        let (path, message) = persist(dir, "notes.txt", &rendered).unwrap();

        assert!(message.starts_with(&rendered.message));
        assert!(message.ends_with(&format!(
            "read the {} file.",
            path.file_name().unwrap()
        )));
    }
}
