//! Check command: the default action when no subcommand is given.
//!
//! Each target is loaded, analyzed and reported on in turn. A failing
//! document is reported and skipped; the command fails at the end if any
//! document did.

use std::io::{BufRead, Write};

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use drat_core::config::Config;
use drat_core::extract::DocumentFormat;
use drat_core::report::{LexicalReport, render};
use drat_core::source::{DocumentSource, SourceOptions};
use drat_core::word_sets::WordSets;
use drat_core::{analyze_text, sink};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use super::load_word_sets;

/// Arguments for checking documents.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Files or URLs to check (read from stdin, one per line, when omitted)
    #[arg(value_name = "INFILE")]
    pub infile: Vec<String>,

    /// Supplementary word list merged into the common vocabulary (repeatable)
    #[arg(short, long, value_name = "FILE")]
    pub wordlist: Vec<Utf8PathBuf>,

    /// Directory report files are written to (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<Utf8PathBuf>,

    /// Read every input as this format instead of detecting it
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<DocumentFormat>,
}

/// One successfully checked document.
#[derive(Debug, Serialize)]
struct Checked {
    #[serde(flatten)]
    report: LexicalReport,
    report_file: Utf8PathBuf,
    #[serde(skip)]
    message: String,
}

/// Check every target and write one report file per document.
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `quiet` - Suppress the progress bar
/// * `config` - Loaded configuration
#[instrument(name = "cmd_check", skip_all, fields(targets))]
pub fn cmd_check(
    args: CheckArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let targets = if args.infile.is_empty() {
        read_targets(std::io::stdin().lock()).context("failed to read targets from stdin")?
    } else {
        args.infile
    };
    if targets.is_empty() {
        bail!("no documents to check; pass INFILE arguments or list them on stdin");
    }
    tracing::Span::current().record("targets", targets.len());

    let words = load_word_sets(config, &args.wordlist)?;

    let output_dir = args
        .output_dir
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| Utf8PathBuf::from("."));
    std::fs::create_dir_all(output_dir.as_std_path())
        .with_context(|| format!("failed to create output directory {output_dir}"))?;

    let options = SourceOptions::from_config(config).with_format(args.format);
    debug!(
        output_dir = %output_dir,
        max_input_bytes = ?options.max_input_bytes,
        fetch_timeout = ?options.fetch_timeout,
        "executing check command"
    );

    let progress = progress_bar(targets.len(), global_json || quiet);
    let failed = check_all(
        &targets,
        &words,
        &options,
        &output_dir,
        global_json,
        &progress,
        &mut std::io::stdout(),
    );
    progress.finish_and_clear();

    if failed > 0 {
        bail!("{failed} of {} documents failed", targets.len());
    }
    Ok(())
}

/// Check each target in turn, printing results to `out`; returns how many
/// documents failed.
fn check_all<W: Write>(
    targets: &[String],
    words: &WordSets,
    options: &SourceOptions,
    output_dir: &Utf8Path,
    json: bool,
    progress: &ProgressBar,
    out: &mut W,
) -> usize {
    let batch = targets.len() > 1;
    let mut failed = 0usize;

    for target in targets {
        let source = DocumentSource::parse(target);
        progress.set_message(source.name().to_string());

        let result = check_one(&source, words, options, output_dir).and_then(|checked| {
            progress
                .suspend(|| print_checked(out, &checked, json, batch))
                .context("failed to print result")
        });
        if let Err(err) = result {
            failed += 1;
            tracing::error!(document = %source, error = %format!("{err:#}"), "document failed");
            progress.suspend(|| eprintln!("{} {source}: {err:#}", "FAIL:".red()));
        }
        progress.inc(1);
    }
    failed
}

#[instrument(skip_all, fields(document = %source))]
fn check_one(
    source: &DocumentSource,
    words: &WordSets,
    options: &SourceOptions,
    output_dir: &Utf8Path,
) -> anyhow::Result<Checked> {
    let document = source.load(options)?;
    let text = document
        .text()
        .with_context(|| format!("failed to extract text as {}", document.format))?;
    let report = analyze_text(&document.name, &text, words)?;
    let rendered = render(&report);
    let (report_file, message) = sink::persist(output_dir, &document.name, &rendered)?;

    tracing::info!(
        uncommon = report.uncommon_count(),
        density = report.lexical_density,
        report_file = %report_file,
        "document checked"
    );
    Ok(Checked {
        report,
        report_file,
        message,
    })
}

fn print_checked<W: Write>(
    out: &mut W,
    checked: &Checked,
    json: bool,
    batch: bool,
) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(checked)?)?;
    } else {
        if batch {
            writeln!(out, "{}", checked.report.document.bold())?;
        }
        writeln!(out, "{}", checked.message)?;
    }
    out.flush()?;
    Ok(())
}

/// Read newline-delimited targets, skipping blank lines.
fn read_targets<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    let mut targets = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            targets.push(line.to_string());
        }
    }
    Ok(targets)
}

/// A progress bar for batches; hidden for single documents and when disabled.
fn progress_bar(len: usize, disabled: bool) -> ProgressBar {
    if disabled || len < 2 {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{pos}/{len}] {wide_msg}") {
        bar.set_style(style);
    }
    bar
}
