#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the calc-client binary.

use std::process::{Command, Stdio};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::time::timeout;

fn run_calc_client(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_calc-client"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute calc-client")
}

fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[test]
fn test_cli_help_command() {
    let output = run_calc_client(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--server"));
    assert!(stdout.contains("--timeout"));
    assert!(stdout.contains("http://localhost:8080"), "default server URL");
}

#[tokio::test]
async fn test_unreachable_server_exits_with_failure() {
    let url = closed_port_url();
    let mut cmd = tokio::process::Command::new(env!("CARGO_BIN_EXE_calc-client"));
    cmd.args(["--server", &url, "--timeout", "1"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd.spawn().unwrap();
    // A command that must never be sent.
    let mut stdin = child.stdin.take().unwrap();
    let _ = stdin.write_all(b"add 1 2\n").await;
    drop(stdin);

    let output = timeout(Duration::from_secs(10), child.wait_with_output())
        .await
        .expect("client should give up on its own")
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Error: Calculator service is not available"),
        "stdout: {stdout}"
    );
    assert!(!stdout.contains("Result:"));
}
