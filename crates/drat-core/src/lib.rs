//! Core library for drat.
//!
//! This crate provides lexical-density analysis and uncommon-word detection
//! for the `drat` CLI and any downstream consumers.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//! - [`word_sets`] - Function-word and common-word reference sets
//! - [`tokenize`] - Word tokenization
//! - [`classify`] - Word counts, uncommon words and lexical density
//! - [`report`] - Report rendering
//! - [`sink`] - Report file naming and persistence
//! - [`extract`] - Plain text from HTML, Markdown and office documents
//! - [`source`] - Loading documents from files and URLs
//! - [`analyze`] - Text-to-report pipeline
//!
//! # Quick Start
//!
//! ```
//! use drat_core::{WordSets, analyze_text};
//!
//! let words = WordSets::builtin();
//! let report = analyze_text("note", "The cat is happy.", &words).unwrap();
//! assert_eq!(report.total_words, 4);
//! assert!((report.lexical_density - 50.0).abs() < 1e-9);
//! ```
#![deny(unsafe_code)]

pub mod analyze;
pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod report;
pub mod sink;
pub mod source;
pub mod tokenize;
pub mod word_sets;

pub use analyze::{analyze_text, check_text};
pub use classify::{Classification, classify};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{
    AnalysisError, AnalysisResult, ConfigError, ConfigResult, ExtractError, ExtractResult,
    ReportError, ReportResult, WordListError, WordListResult,
};
pub use extract::{DocumentFormat, TextExtractor, extract_text};
pub use report::{LexicalReport, RenderedReport, render};
pub use sink::persist;
pub use source::{Document, DocumentSource, SourceOptions};
pub use tokenize::tokenize;
pub use word_sets::WordSets;
