//! Error scenario integration tests

use std::process::Command;

fn voice_memo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_voice-memo"))
}

#[test]
fn invalid_quality_env_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = voice_memo_bin()
        .env("VOICE_MEMO_QUALITY", "lossless")
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("VOICE_MEMO_QUALITY"),
        "Expected error naming the variable, got: {}",
        stderr
    );
}

#[test]
fn invalid_quality_flag() {
    let output = voice_memo_bin()
        .args(["--quality", "lossless"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value") || stderr.contains("lossless"));
}

#[test]
fn tick_interval_out_of_range() {
    let output = voice_memo_bin()
        .args(["--tick-interval-ms", "5000"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("5000"));
}

#[test]
fn config_get_unknown_key() {
    let output = voice_memo_bin()
        .args(["config", "get", "unknown_key"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown key") || stderr.contains("unknown_key"));
}

#[test]
fn config_set_invalid_quality() {
    let output = voice_memo_bin()
        .args(["config", "set", "quality", "ultra"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid quality"));
}

#[test]
fn config_set_invalid_tick_interval() {
    let output = voice_memo_bin()
        .args(["config", "set", "tick_interval_ms", "0"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("tick_interval_ms"));
}

#[test]
fn config_set_invalid_bool() {
    let output = voice_memo_bin()
        .args(["config", "set", "desktop_alerts", "maybe"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("true") || stderr.contains("false"));
}

#[test]
fn unknown_subcommand() {
    let output = voice_memo_bin()
        .arg("upload")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}
