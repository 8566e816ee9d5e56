//! CLI integration tests

use std::process::Command;

fn voice_memo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_voice-memo"))
}

/// Point the config store at an isolated directory
fn with_config_home(cmd: &mut Command, dir: &std::path::Path) {
    cmd.env("XDG_CONFIG_HOME", dir).env("HOME", dir);
}

#[test]
fn help_output() {
    let output = voice_memo_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("voice memo"));
    assert!(stdout.contains("--quality"));
    assert!(stdout.contains("--tick-interval-ms"));
    assert!(stdout.contains("--desktop-alerts"));
    assert!(stdout.contains("--recordings-dir"));
    assert!(stdout.contains("--verbose"));
}

#[test]
fn version_output() {
    let output = voice_memo_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("voice-memo"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_command() {
    let output = voice_memo_bin()
        .args(["config", "path"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("voice-memo"));
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_help() {
    let output = voice_memo_bin()
        .args(["config", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for action in ["init", "set", "get", "list", "path"] {
        assert!(stdout.contains(action), "missing '{}' in config help", action);
    }
}

#[test]
#[cfg(target_os = "linux")]
fn config_set_then_get() {
    let dir = tempfile::tempdir().unwrap();

    let mut set = voice_memo_bin();
    with_config_home(&mut set, dir.path());
    let output = set
        .args(["config", "set", "quality", "low"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let mut get = voice_memo_bin();
    with_config_home(&mut get, dir.path());
    let output = get
        .args(["config", "get", "quality"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "low");
}

#[test]
#[cfg(target_os = "linux")]
fn config_list_shows_every_key() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = voice_memo_bin();
    with_config_home(&mut cmd, dir.path());
    let output = cmd
        .args(["config", "list"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for key in ["quality", "tick_interval_ms", "desktop_alerts", "recordings_dir"] {
        assert!(stdout.contains(key), "missing '{}' in config list", key);
    }
    assert!(stdout.contains("(not set)"));
}

#[test]
#[cfg(target_os = "linux")]
fn config_init_twice_fails() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = voice_memo_bin();
    with_config_home(&mut first, dir.path());
    assert!(first
        .args(["config", "init"])
        .output()
        .expect("Failed to execute command")
        .status
        .success());

    let mut second = voice_memo_bin();
    with_config_home(&mut second, dir.path());
    let output = second
        .args(["config", "init"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
}
