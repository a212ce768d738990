//! Invocation checks for the `wss-client` binary.

use std::process::Command;

fn wss_client() -> Command {
    Command::new(env!("CARGO_BIN_EXE_wss-client"))
}

#[test]
fn test_missing_argument_prints_usage() {
    let output = wss_client().args(["example.com", "443"]).output().unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
    assert!(stderr.contains("<TEXT>"), "stderr: {stderr}");
}

#[test]
fn test_extra_argument_rejected() {
    let output = wss_client()
        .args(["example.com", "443", "hi", "extra"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unresolvable_host_still_exits_zero() {
    let output = wss_client()
        .args(["nonexistent.invalid", "443", "hi", "--no-system-roots"])
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "stdout: {stdout}");
    assert!(lines.iter().any(|l| l.starts_with("[sync] Error: ")));
    assert!(lines.iter().any(|l| l.starts_with("[async] Error: ")));
}

#[test]
fn test_help_lists_options() {
    let output = wss_client().arg("--help").output().unwrap();

    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for option in ["--path", "--ca-file", "--no-system-roots", "--mode"] {
        assert!(help.contains(option), "missing {option}");
    }
}
