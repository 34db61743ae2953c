//! End-to-end CLI tests for the parfetch binary.

// `Command::cargo_bin` is deprecated in assert_cmd >=2.0.17 in favor of
// `cargo::cargo_bin_cmd!` macro. Suppressed until migration to the new API.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

fn parfetch() -> Command {
    let mut cmd = Command::cargo_bin("parfetch").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_url_file(dir: &std::path::Path, lines: &[String]) -> std::path::PathBuf {
    let file = dir.join("urls.txt");
    std::fs::write(&file, lines.join("\n")).unwrap();
    file
}

#[test]
fn test_help_lists_options() {
    parfetch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--max-attempts"))
        .stdout(predicate::str::contains("--parallel"))
        .stdout(predicate::str::contains("1 when any URL failed"));
}

#[test]
fn test_version_flag() {
    parfetch()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_input_is_usage_error() {
    parfetch()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file is required"));
}

#[test]
fn test_unreadable_input_file_fails() {
    let tempdir = TempDir::new().unwrap();

    parfetch()
        .arg(tempdir.path().join("nope.txt"))
        .arg(tempdir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot load URLs"));
}

#[test]
fn test_zero_max_attempts_rejected() {
    let tempdir = TempDir::new().unwrap();
    let urls = write_url_file(tempdir.path(), &[]);

    parfetch()
        .arg(&urls)
        .args(["-m", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max-attempts"));
}

#[test]
fn test_large_parallel_and_attempts_accepted() {
    let tempdir = TempDir::new().unwrap();
    let urls = write_url_file(tempdir.path(), &[]);

    parfetch()
        .arg(&urls)
        .arg(tempdir.path().join("out"))
        .args(["-p", "101", "-m", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parallel downloads: 101"))
        .stdout(predicate::str::contains("Max attempts: 500"));
}

#[test]
fn test_empty_url_list_succeeds_and_creates_output_dir() {
    let tempdir = TempDir::new().unwrap();
    let urls = write_url_file(tempdir.path(), &["".to_string(), "   ".to_string()]);
    let output = tempdir.path().join("nested").join("out");

    parfetch()
        .arg(&urls)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Parallel downloads: 8"))
        .stdout(predicate::str::contains("FAILED TO DOWNLOAD").not());

    assert!(output.is_dir());
}

#[test]
fn test_default_output_dir_notice() {
    let tempdir = TempDir::new().unwrap();
    let urls = write_url_file(tempdir.path(), &[]);

    parfetch()
        .current_dir(tempdir.path())
        .arg(&urls)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Using default output directory: pardl-downloads",
        ));

    assert!(tempdir.path().join("pardl-downloads").is_dir());
}

#[tokio::test]
async fn test_all_urls_succeed_exit_zero() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    for name in ["a.txt", "b.txt"] {
        Mock::given(method("GET"))
            .and(path(format!("/{name}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(name))
            .mount(&mock_server)
            .await;
    }

    let tempdir = TempDir::new().unwrap();
    let output = tempdir.path().join("out");
    let urls = write_url_file(
        tempdir.path(),
        &[
            format!("{}/a.txt", mock_server.uri()),
            format!("  {}/b.txt  ", mock_server.uri()),
        ],
    );

    parfetch()
        .arg("-i")
        .arg(&urls)
        .arg("-o")
        .arg(&output)
        .args(["-p", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FAILED TO DOWNLOAD").not());

    assert_eq!(std::fs::read_to_string(output.join("a.txt")).unwrap(), "a.txt");
    assert_eq!(std::fs::read_to_string(output.join("b.txt")).unwrap(), "b.txt");
}

#[tokio::test]
async fn test_partial_failure_lists_urls_and_exits_one() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PDF"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fail"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let tempdir = TempDir::new().unwrap();
    let output = tempdir.path().join("out");
    let failing = format!("{}/fail", mock_server.uri());
    let urls = write_url_file(
        tempdir.path(),
        &[format!("{}/ok", mock_server.uri()), failing.clone()],
    );

    let assert = parfetch()
        .arg(&urls)
        .arg(&output)
        .arg("-q")
        .assert()
        .failure()
        .stdout(predicate::str::contains(" FAILED TO DOWNLOAD:"))
        .stdout(predicate::str::contains(format!(" {failing}")))
        .stdout(predicate::str::contains("URL file:").not());

    assert_eq!(
        assert.get_output().status.code(),
        Some(1),
        "partial success must yield exit code 1"
    );
    assert!(output.join("ok").exists());
    assert!(!output.join("fail").exists());
}
