//! CLI tests for the `assembler` binary.
//!
//! Spawns the binary and checks that failures exit with status 1 and name
//! their cause on stderr.

use std::fs;
use std::process::Command;

use assembler::test_support::PlaygroundFixture;

#[test]
fn missing_root_exits_with_failure() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = Command::new(env!("CARGO_BIN_EXE_assembler"))
        .arg("--root")
        .arg(temp.path().join("no-such-playground"))
        .output()
        .expect("run assembler");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("resolve playground root"), "stderr: {stderr}");
}

#[test]
fn unknown_package_manager_exits_with_failure() {
    let fixture = PlaygroundFixture::new().expect("fixture");
    fs::write(
        fixture.playground_root.join("assembler.toml"),
        "package_manager = \"assembler-test-no-such-program\"\n",
    )
    .expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_assembler"))
        .current_dir(&fixture.playground_root)
        .output()
        .expect("run assembler");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("executable 'assembler-test-no-such-program' not found"),
        "stderr: {stderr}"
    );
    assert!(!fixture.playground_root.join("_build").exists());
}

#[test]
fn invalid_config_exits_with_failure() {
    let fixture = PlaygroundFixture::new().expect("fixture");
    let config = fixture.playground_root.join("ci.toml");
    fs::write(&config, "command_timeout_secs = 0\n").expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_assembler"))
        .arg("--root")
        .arg(&fixture.playground_root)
        .arg("--config")
        .arg(&config)
        .output()
        .expect("run assembler");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("command_timeout_secs must be > 0"),
        "stderr: {stderr}"
    );
}
