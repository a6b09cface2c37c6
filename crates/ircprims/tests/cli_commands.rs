#![cfg(feature = "cli")]

use std::process::Command;

fn ircprims() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ircprims"));
    cmd.arg("--log-level").arg("error");
    cmd
}

#[test]
fn parse_emits_structured_json() {
    let output = ircprims()
        .arg("--format")
        .arg("json")
        .arg("parse")
        .arg(":e!foo@bar.com JOIN #test54321")
        .output()
        .expect("parse should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("parse should emit json");
    assert_eq!(payload["origin"], "e");
    assert_eq!(payload["user"], "foo");
    assert_eq!(payload["host"], "bar.com");
    assert_eq!(payload["command"], "JOIN");
    assert_eq!(payload["command_name"], "JOIN");
    assert_eq!(payload["arguments"], serde_json::json!(["#test54321"]));
}

#[test]
fn parse_names_numeric_replies() {
    let output = ircprims()
        .arg("--format")
        .arg("json")
        .arg("parse")
        .arg(":irc.test 433 * e :Nickname is already in use")
        .output()
        .expect("parse should run");

    assert!(output.status.success());
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("parse should emit json");
    assert_eq!(payload["command_name"], "ERR_NICKNAMEINUSE");
    assert_eq!(payload["arguments"][2], "Nickname is already in use");
}

#[test]
fn parse_rejects_empty_line() {
    let output = ircprims()
        .arg("parse")
        .arg("")
        .output()
        .expect("parse should run");

    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let output = ircprims()
        .arg("parse")
        .arg("--bogus")
        .output()
        .expect("parse should run");

    assert!(!output.status.success());
}

#[test]
fn version_reports_package_version() {
    let output = ircprims()
        .arg("version")
        .output()
        .expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("ircprims {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn extended_version_reports_build_target() {
    let output = ircprims()
        .arg("version")
        .arg("--extended")
        .output()
        .expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("name: ircprims"));
    assert!(stdout.contains("target: "));
    assert!(stdout.contains("max_line_length: 512"));
}
