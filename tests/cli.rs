//! End-to-end tests of the bibsearch binary.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Run bibsearch against the fixture archive, returning (stdout, stderr, success)
fn run_bibsearch(args: &[&str]) -> (String, String, bool) {
    run_with_archive(args, &fixture_dir(), None)
}

fn run_with_archive(args: &[&str], archive: &Path, stdin: Option<&str>) -> (String, String, bool) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_bibsearch"))
        .arg("--quiet")
        .arg("--archive-dir")
        .arg(archive)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run bibsearch");

    if let Some(input) = stdin {
        child
            .stdin
            .take()
            .unwrap()
            .write_all(input.as_bytes())
            .unwrap();
    } else {
        drop(child.stdin.take());
    }

    let output = child.wait_with_output().unwrap();
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

#[test]
fn test_text_search() {
    let (stdout, _, ok) = run_bibsearch(&["unsolvable", "problem", "--show-scores"]);
    assert!(ok);
    assert!(stdout.starts_with("Found 1 papers:"));
    assert!(stdout.contains("1. An Unsolvable Problem of Elementary Number Theory (1936)"));
    assert!(stdout.contains("Category: foundations | Access: PD"));
    assert!(stdout.contains("File: papers/foundations/church1936.pdf"));
    assert!(stdout.contains("Score: "));
    assert!(stdout.contains("Matches: title: unsolvable, title: problem"));
}

#[test]
fn test_no_results() {
    let (stdout, _, ok) = run_bibsearch(&["zyzzyva"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "No papers found matching your search criteria.");
}

#[test]
fn test_filters_and_json() {
    let (stdout, _, ok) = run_bibsearch(&[
        "--author",
        "church",
        "--start-year",
        "1930",
        "--end-year",
        "1938",
        "--json",
    ]);
    assert!(ok);

    let results: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["paper_id"], "church1936");
}

#[test]
fn test_access_type_and_category() {
    let (stdout, _, ok) = run_bibsearch(&[
        "--access-type",
        "oa",
        "--access-type",
        "AR",
        "-c",
        "semantics",
        "--json",
    ]);
    assert!(ok);

    let results: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let ids: Vec<&str> = results
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["paper_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["plotkin1975", "scott1970"]);
}

#[test]
fn test_invalid_access_type_is_rejected() {
    let (_, stderr, ok) = run_bibsearch(&["--access-type", "XX"]);
    assert!(!ok);
    assert!(stderr.contains("unknown access type"));
}

#[test]
fn test_max_results_and_operator() {
    let (stdout, _, ok) =
        run_bibsearch(&["lambda", "combinators", "--operator", "or", "-n", "2", "--json"]);
    assert!(ok);
    let results: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(results.as_array().unwrap().len(), 2);

    let (stdout, _, ok) = run_bibsearch(&["lambda", "combinators", "--json"]);
    assert!(ok);
    let results: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(results.as_array().unwrap().is_empty());
}

#[test]
fn test_suggest() {
    let (stdout, _, ok) = run_bibsearch(&["suggest", "chur"]);
    assert!(ok);
    assert!(stdout.starts_with("Search suggestions:"));
    assert!(stdout.contains("Authors:\n  - church\n"));

    let (stdout, _, ok) = run_bibsearch(&["suggest", "sem", "--json"]);
    assert!(ok);
    let suggestions: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(suggestions["categories"][0], "semantics");
}

#[test]
fn test_stats() {
    let (stdout, _, ok) = run_bibsearch(&["stats"]);
    assert!(ok);
    assert!(stdout.contains("Records:          11"));
    assert!(stdout.contains("Years:            1936-1989"));

    let (stdout, _, ok) = run_bibsearch(&["stats", "--json"]);
    assert!(ok);
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["records"], 11);
}

#[test]
fn test_interactive() {
    let (stdout, _, ok) = run_with_archive(
        &["interactive"],
        &fixture_dir(),
        Some("author:\"Alonzo Church\" year:1936\nyear:abc\nquit\n"),
    );
    assert!(ok);
    assert!(stdout.contains("Search> "));
    assert!(stdout.contains("An Unsolvable Problem of Elementary Number Theory"));
    assert!(stdout.contains("Invalid query:"));
}

#[test]
fn test_corpus_file_and_config() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("papers.json");
    fs::write(
        &corpus,
        r#"{"download_sources": {"misc": {
            "a": {"title": "Graph reduction"},
            "b": {"title": "Graph rewriting"},
            "c": {"title": "Graph theory"}
        }}}"#,
    )
    .unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"max_results": 2}"#).unwrap();

    let (stdout, _, ok) = run_with_archive(
        &[
            "--corpus",
            corpus.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "graph",
        ],
        dir.path(),
        None,
    );
    assert!(ok);
    assert!(stdout.starts_with("Found 2 papers:"));
}

#[test]
fn test_missing_archive_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, stderr, ok) = run_with_archive(&["anything"], dir.path(), None);
    assert!(!ok);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("Error: Failed to load archive"));
}
