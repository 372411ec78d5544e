//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// A temp dir holding `name` with `content`.
fn workspace_with(name: &str, content: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(name), content).unwrap();
    tmp
}

/// Names of the report files written into `dir`.
fn reports_in(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .filter(|name| name.contains('_') && name.ends_with(".txt"))
        .collect();
    names.sort();
    names
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("[INFILE]..."));
}

#[test]
fn long_help_lists_environment() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("DRAT_LOG_PATH"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let output = cmd().arg("info").arg("--json").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("info --json should output valid JSON");

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_flag_accepted() {
    cmd().args(["--quiet", "info"]).assert().success();
}

#[test]
fn multiple_verbose_flags_accepted() {
    cmd().args(["-vv", "info"]).assert().success();
}

#[test]
fn color_never_accepted() {
    cmd().args(["--color", "never", "info"]).assert().success();
}

// =============================================================================
// Checking Documents
// =============================================================================

#[test]
fn single_file_writes_report_and_prints_summary() {
    let tmp = workspace_with("story.txt", "The cat is happy. The zaphod!");

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "story.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "There are 1 uncommon words, and the lexical density is",
        ))
        .stdout(predicate::str::contains("For further details, read the story_"));

    let reports = reports_in(tmp.path());
    assert_eq!(reports.len(), 1, "{reports:?}");
    let report = fs::read_to_string(tmp.path().join(&reports[0])).unwrap();
    assert!(report.starts_with("Report for story.txt.\n"));
    assert!(report.contains("There are a total of 5 unique words in the text."));
    assert!(report.contains("The following 1 words are not in the list of common words:\nzaphod"));
}

#[test]
fn wordlist_flag_extends_common_vocabulary() {
    let tmp = workspace_with("story.txt", "The zaphod is happy.");
    fs::write(tmp.path().join("names.txt"), "Zaphod\n").unwrap();

    cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "-w",
            "names.txt",
            "story.txt",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("There are 0 uncommon words"));
}

#[test]
fn missing_wordlist_aborts_before_any_report() {
    let tmp = workspace_with("story.txt", "The cat.");

    cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--wordlist",
            "missing.txt",
            "story.txt",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("supplementary word list"));

    assert!(reports_in(tmp.path()).is_empty());
}

#[test]
fn targets_are_read_from_stdin() {
    let tmp = workspace_with("a.txt", "The cat.");
    fs::write(tmp.path().join("b.md"), "# Happy\n\n```\ncode zaphod\n```\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .write_stdin("a.txt\n\nb.md\n")
        .assert()
        .success();

    let reports = reports_in(tmp.path());
    assert_eq!(reports.len(), 2, "{reports:?}");
    assert!(reports.iter().any(|r| r.starts_with("a_")));
    assert!(reports.iter().any(|r| r.starts_with("b_")));
}

#[test]
fn empty_stdin_is_an_error() {
    let tmp = TempDir::new().unwrap();
    cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no documents to check"));
}

#[test]
fn failures_do_not_stop_the_batch() {
    let tmp = workspace_with("good.txt", "The cat is happy.");
    fs::write(tmp.path().join("empty.txt"), "42 ... !!!").unwrap();

    cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "empty.txt",
            "missing.txt",
            "good.txt",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FAIL:"))
        .stderr(predicate::str::contains("2 of 3 documents failed"))
        .stdout(predicate::str::contains("There are 0 uncommon words"));

    let reports = reports_in(tmp.path());
    assert_eq!(reports.len(), 1, "{reports:?}");
    assert!(reports[0].starts_with("good_"));
}

#[test]
fn json_output_has_report_fields() {
    let tmp = workspace_with("story.txt", "The cat is happy.");

    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "--json", "story.txt"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid JSON");
    assert_eq!(json["document"], "story.txt");
    assert_eq!(json["total_words"], 4);
    assert_eq!(json["lexical_density"], 50.0);
    assert!(json["report_file"].as_str().unwrap().contains("story_"));
}

#[test]
fn output_dir_flag_is_created_and_used() {
    let tmp = workspace_with("story.txt", "The cat.");

    cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--output-dir",
            "out/reports",
            "story.txt",
        ])
        .assert()
        .success();

    assert_eq!(reports_in(&tmp.path().join("out/reports")).len(), 1);
    assert!(reports_in(tmp.path()).is_empty());
}

#[test]
fn html_file_ignores_markup_and_scripts() {
    let tmp = workspace_with(
        "page.html",
        "<html><head><title>zaphod</title></head><body><p>The cat</p><script>zaphod()</script></body></html>",
    );

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "--json", "page.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_words\":2"))
        .stdout(predicate::str::contains("zaphod").not());
}

#[test]
fn format_flag_overrides_detection() {
    let tmp = workspace_with("page.html", "<p>The cat</p>");

    cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--json",
            "--format",
            "plain-text",
            "page.html",
        ])
        .assert()
        .success()
        // tag names survive as words when markup is read as plain text
        .stdout(predicate::str::contains("\"total_words\":4"));
}

#[test]
fn oversized_input_fails() {
    let tmp = workspace_with("big.txt", &"word ".repeat(100));
    fs::write(tmp.path().join(".drat.toml"), "max_input_bytes = 10\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "big.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn invalid_flag_shows_error() {
    cmd()
        .arg("--not-a-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn invalid_format_shows_error() {
    cmd()
        .args(["--format", "pdf", "a.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
