//! CLI and error scenario integration tests

use std::process::Command;

fn callscribe_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_callscribe"))
}

/// Strip every config source so the binary sees only its own defaults
fn bare_env(command: &mut Command) -> &mut Command {
    command
        .env_remove("OPENAI_API_KEY")
        .env_remove("SUPABASE_URL")
        .env_remove("SUPABASE_KEY")
        .env_remove("RECORDINGS_API_URL")
        .env_remove("RECORDINGS_API_TOKEN")
        .env_remove("CALLBACK_URL")
        .env("HOME", "/nonexistent")
        .env("XDG_CONFIG_HOME", "/nonexistent")
}

#[test]
fn missing_openai_key_fails_fast() {
    let output = bare_env(&mut callscribe_bin())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("OPENAI_API_KEY"),
        "Expected error naming OPENAI_API_KEY, got: {}",
        stderr
    );
}

#[test]
fn missing_supabase_url_fails_fast() {
    let output = bare_env(&mut callscribe_bin())
        .env("OPENAI_API_KEY", "sk-test")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("SUPABASE_URL"),
        "Expected error naming SUPABASE_URL, got: {}",
        stderr
    );
}

#[test]
fn config_get_unknown_key() {
    let output = callscribe_bin()
        .args(["config", "get", "unknown_key"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_unknown_key() {
    let output = callscribe_bin()
        .args(["config", "set", "unknown_key", "value"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_number() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = callscribe_bin()
        .args(["config", "set", "max_records", "plenty"])
        .env("XDG_CONFIG_HOME", temp.path())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("number"),
        "Expected error about invalid number, got: {}",
        stderr
    );
}

#[test]
fn config_list_with_no_file() {
    let output = callscribe_bin()
        .args(["config", "list"])
        .env("HOME", "/nonexistent")
        .env("XDG_CONFIG_HOME", "/nonexistent")
        .output()
        .expect("Failed to execute command");

    // Should succeed with everything shown as "(not set)"
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("not set") && stdout.contains("openai_api_key"),
        "Expected config list output, got: {}",
        stdout
    );
}

#[test]
fn config_set_and_get_round_trip() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = callscribe_bin()
        .args(["config", "set", "table", "propE_transcriber"])
        .env("XDG_CONFIG_HOME", temp.path())
        .output()
        .expect("Failed to execute command");
    assert!(
        output.status.success(),
        "set failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output = callscribe_bin()
        .args(["config", "get", "table"])
        .env("XDG_CONFIG_HOME", temp.path())
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "propE_transcriber");
}

#[test]
fn config_get_masks_secrets() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = callscribe_bin()
        .args(["config", "set", "openai_api_key", "sk-supersecretvalue"])
        .env("XDG_CONFIG_HOME", temp.path())
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let output = callscribe_bin()
        .args(["config", "get", "openai_api_key"])
        .env("XDG_CONFIG_HOME", temp.path())
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        !stdout.contains("supersecret"),
        "Secret should be masked, got: {}",
        stdout
    );
}

#[test]
fn help_mentions_pipeline_flags() {
    use assert_cmd::Command;
    use predicates::prelude::*;

    Command::new(env!("CARGO_BIN_EXE_callscribe"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--limit"))
        .stdout(predicate::str::contains("--dry-run"));
}
