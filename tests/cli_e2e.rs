//! End-to-end CLI tests for the reqwrap binary.

use assert_cmd::Command;
use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Runs the binary off the async runtime so the mock server keeps serving.
async fn run(args: Vec<String>) -> std::process::Output {
    tokio::task::spawn_blocking(move || {
        Command::cargo_bin("reqwrap")
            .unwrap()
            .args(args)
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let mut cmd = Command::cargo_bin("reqwrap").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("request"))
        .stdout(predicate::str::contains("download"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let mut cmd = Command::cargo_bin("reqwrap").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("reqwrap"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    let mut cmd = Command::cargo_bin("reqwrap").unwrap();
    cmd.arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// An unsupported method fails before any network activity.
#[test]
fn test_binary_unsupported_method_fails() {
    let mut cmd = Command::cargo_bin("reqwrap").unwrap();
    cmd.args(["-q", "request", "options", "http://127.0.0.1:9/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported HTTP method"));
}

/// Verbose logging must not echo the basic-auth password.
#[test]
fn test_binary_verbose_does_not_log_password() {
    let mut cmd = Command::cargo_bin("reqwrap").unwrap();
    cmd.args([
        "-vv",
        "request",
        "get",
        "http://127.0.0.1:9/",
        "--user",
        "alice",
        "--password",
        "hunter2",
        "--timeout-secs",
        "1",
    ])
    .assert()
    .stderr(predicate::str::contains("RequestArgs"))
    .stderr(predicate::str::contains("hunter2").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_request_prints_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hello"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello world"))
        .mount(&mock_server)
        .await;

    let output = run(vec![
        "-q".to_string(),
        "request".to_string(),
        "get".to_string(),
        format!("{}/hello", mock_server.uri()),
    ])
    .await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("200"))
        .stdout(predicate::str::contains("hello world"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_download_writes_file() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/data/report.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"a,b\n1,2\n".to_vec()))
        .mount(&mock_server)
        .await;

    let output = run(vec![
        "-q".to_string(),
        "download".to_string(),
        format!("{}/data/report.csv", mock_server.uri()),
        "--dir".to_string(),
        temp_dir.path().display().to_string(),
    ])
    .await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("report.csv"));
    assert_eq!(
        std::fs::read(temp_dir.path().join("report.csv")).unwrap(),
        b"a,b\n1,2\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_download_404_fails() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let output = run(vec![
        "-q".to_string(),
        "download".to_string(),
        format!("{}/gone.txt", mock_server.uri()),
        "--dir".to_string(),
        temp_dir.path().display().to_string(),
    ])
    .await;

    output
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
