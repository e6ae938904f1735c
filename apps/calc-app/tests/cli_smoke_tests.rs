#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the calc-app binary.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::time::timeout;

async fn run_with_input(input: &str) -> std::process::Output {
    let mut child = tokio::process::Command::new(env!("CARGO_BIN_EXE_calc-app"))
        .args(["--log-level", "error"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to execute calc-app");

    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(input.as_bytes()).await.unwrap();
    drop(stdin);

    timeout(Duration::from_secs(10), child.wait_with_output())
        .await
        .expect("calc-app should exit")
        .unwrap()
}

#[tokio::test]
async fn test_session_prints_results_and_errors() {
    let output = run_with_input("add 5 3\ndivide 10 0\nPOWER 2 3\nmultiply 6 7\nquit\n").await;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Result: 8"), "stdout: {stdout}");
    assert!(stdout.contains("Error: Division by zero"), "stdout: {stdout}");
    assert!(
        stdout.contains("Error: unknown operation: power"),
        "stdout: {stdout}"
    );
    assert!(stdout.contains("Result: 42"), "stdout: {stdout}");
    assert!(stdout.ends_with("Goodbye!\n"), "stdout: {stdout}");
}

#[tokio::test]
async fn test_eof_ends_session() {
    let output = run_with_input("subtract 1 3\n").await;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Result: -2"));
}

#[test]
fn test_rejects_unknown_log_format() {
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_calc-app"))
        .args(["--log-format", "xml"])
        .output()
        .unwrap();

    assert!(!output.status.success());
}
