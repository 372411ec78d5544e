//! Error types for drat-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A config file or `DRAT_*` variable has an invalid value.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading reference or supplementary word lists.
#[derive(Error, Debug)]
pub enum WordListError {
    /// A word list file is missing or unreadable.
    #[error("failed to read word list {path}")]
    Read {
        /// The list that could not be read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`WordListError`].
pub type WordListResult<T> = Result<T, WordListError>;

/// Errors raised while reading a document and extracting its text.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A local file could not be read.
    #[error("failed to read {path}")]
    Read {
        /// The file that could not be read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A URL could not be fetched.
    #[error("failed to fetch {url}")]
    Fetch {
        /// The URL that failed.
        url: String,
        /// Underlying HTTP error.
        #[source]
        source: Box<ureq::Error>,
    },

    /// The input exceeds the configured size limit.
    #[error("input too large: {name} is {size} bytes (limit: {limit} bytes)")]
    TooLarge {
        /// File path or URL.
        name: String,
        /// Observed size in bytes (a lower bound for streamed bodies).
        size: u64,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The office document is not a readable zip archive.
    #[error("invalid document archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The archive lacks the part that holds the document body.
    #[error("document archive has no {part} entry")]
    MissingPart {
        /// Name of the missing archive entry.
        part: &'static str,
    },

    /// The document body is malformed XML.
    #[error("malformed document XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An archive entry could not be decompressed.
    #[error("failed to read archive entry: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`ExtractError`].
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Errors that can occur during lexical analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The document contains no alphabetic words, so density is undefined.
    #[error("document contains no words to analyze")]
    EmptyDocument,
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors raised while persisting a report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The report file could not be written.
    #[error("failed to write report {path}")]
    Write {
        /// Target report path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`ReportError`].
pub type ReportResult<T> = Result<T, ReportError>;
