//! Document sources: local files and URLs.
//!
//! A source is resolved from a command-line argument, loaded into memory
//! under a size limit, and tagged with the [`DocumentFormat`] its bytes are
//! in. URL fetches are blocking and always carry a timeout.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};

use crate::config::{Config, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_INPUT_BYTES};
use crate::error::{ExtractError, ExtractResult};
use crate::extract::{DocumentFormat, extract_text};

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// A path on the local filesystem.
    File(Utf8PathBuf),
    /// A remote page fetched over HTTP(S).
    Url(String),
}

impl DocumentSource {
    /// Resolve an argument: anything starting with `http` is a URL.
    pub fn parse(arg: &str) -> Self {
        if arg.starts_with("http") {
            Self::Url(arg.to_string())
        } else {
            Self::File(Utf8PathBuf::from(arg))
        }
    }

    /// The identifier used in reports and report file names.
    pub fn name(&self) -> &str {
        match self {
            Self::File(path) => path.as_str(),
            Self::Url(url) => url,
        }
    }

    /// Read or fetch the document.
    #[tracing::instrument(skip(options), fields(source = %self.name()))]
    pub fn load(&self, options: &SourceOptions) -> ExtractResult<Document> {
        let mut document = match self {
            Self::File(path) => load_file(path, options.max_input_bytes)?,
            Self::Url(url) => fetch_url(url, options)?,
        };
        if let Some(format) = options.format {
            document.format = format;
        }
        tracing::debug!(
            format = %document.format,
            bytes = document.bytes.len(),
            "document loaded"
        );
        Ok(document)
    }
}

impl std::fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Limits and overrides applied while loading documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    /// Maximum document size in bytes; `None` disables the check.
    pub max_input_bytes: Option<usize>,
    /// Timeout for a whole URL fetch.
    pub fetch_timeout: Duration,
    /// Force a format instead of detecting it.
    pub format: Option<DocumentFormat>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            max_input_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            format: None,
        }
    }
}

impl SourceOptions {
    /// Options derived from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_input_bytes: config.input_limit(),
            fetch_timeout: config.fetch_timeout(),
            format: None,
        }
    }

    /// Force every document to be read as `format`.
    #[must_use]
    pub const fn with_format(mut self, format: Option<DocumentFormat>) -> Self {
        self.format = format;
        self
    }
}

/// A document's raw bytes and the format they are in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File path or URL.
    pub name: String,
    /// Detected or forced format.
    pub format: DocumentFormat,
    /// Raw content.
    pub bytes: Vec<u8>,
    /// Limit on decompressed content, carried over from [`SourceOptions`].
    pub max_input_bytes: Option<usize>,
}

impl Document {
    /// Extract the document's plain text.
    pub fn text(&self) -> ExtractResult<String> {
        extract_text(self.format, &self.bytes, self.max_input_bytes)
    }
}

fn load_file(path: &Utf8Path, max_bytes: Option<usize>) -> ExtractResult<Document> {
    let read_err = |source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    };

    // Preflight: check file size via metadata before reading into memory.
    let metadata = std::fs::metadata(path.as_std_path()).map_err(read_err)?;
    if let Some(limit) = max_bytes
        && metadata.len() > limit as u64
    {
        return Err(ExtractError::TooLarge {
            name: path.to_string(),
            size: metadata.len(),
            limit,
        });
    }

    let bytes = std::fs::read(path.as_std_path()).map_err(read_err)?;
    Ok(Document {
        name: path.to_string(),
        format: DocumentFormat::from_path(path),
        bytes,
        max_input_bytes: max_bytes,
    })
}

fn fetch_url(url: &str, options: &SourceOptions) -> ExtractResult<Document> {
    let fetch_err = |source: ureq::Error| ExtractError::Fetch {
        url: url.to_string(),
        source: Box::new(source),
    };

    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(options.fetch_timeout))
        .build()
        .into();

    let mut response = agent.get(url).call().map_err(fetch_err)?;
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let limit = options.max_input_bytes.map_or(u64::MAX, |max| max as u64);
    let bytes = response
        .body_mut()
        .with_config()
        .limit(limit)
        .read_to_vec()
        .map_err(|e| match e {
            ureq::Error::BodyExceedsLimit(size) => ExtractError::TooLarge {
                name: url.to_string(),
                size,
                limit: options.max_input_bytes.unwrap_or(usize::MAX),
            },
            other => fetch_err(other),
        })?;

    Ok(Document {
        name: url.to_string(),
        format: DocumentFormat::from_content_type(content_type.as_deref()),
        bytes,
        max_input_bytes: options.max_input_bytes,
    })
}
