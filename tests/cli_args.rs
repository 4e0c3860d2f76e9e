//! Tests for the binary's command line and startup checks.

use std::process::{Command, Stdio};

fn up_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_up"))
}

#[test]
fn help_lists_options() {
    let output = up_cmd().arg("--help").output().expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--unsafe-full-throttle",
        "--output-script",
        "--debug",
        "--buffer-size",
        "--config",
    ] {
        assert!(stdout.contains(flag), "missing {flag} in:\n{stdout}");
    }
}

#[test]
fn version_is_reported() {
    let output = up_cmd().arg("--version").output().expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_shell_exits_with_error() {
    let config = tempfile::TempDir::new().unwrap();
    let output = up_cmd()
        .env("SHELL", "")
        .env("PATH", "")
        .arg("--config")
        .arg(config.path().join("absent.toml"))
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error: cannot find shell: $SHELL is empty"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn invalid_config_exits_with_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[capture]\ncapacity_bytes = 0\n").unwrap();

    let output = up_cmd()
        .arg("--config")
        .arg(&path)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error: "), "unexpected stderr: {stderr}");
    assert!(stderr.contains("capacity_bytes"), "unexpected stderr: {stderr}");
}

#[test]
fn unknown_flag_is_rejected() {
    let output = up_cmd()
        .arg("--definitely-not-a-flag")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}
