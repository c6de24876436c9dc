//! Error and exit code specs

use crate::prelude::*;

#[test]
fn malformed_address_exits_with_two() {
    let ws = Workspace::empty();
    ws.mg()
        .args(["request", "not-an-address"])
        .exits_with(2)
        .stderr_has("invalid address");
    assert!(ws.outbox().is_empty());
}

#[test]
fn blank_token_exits_with_two() {
    Workspace::empty()
        .mg()
        .args(["confirm", "   "])
        .exits_with(2)
        .stderr_has("token must not be empty");
}

#[test]
fn missing_argument_is_a_usage_error() {
    Workspace::empty()
        .mg()
        .args(["request"])
        .exits_with(2);
}

#[test]
fn json_errors_carry_status_and_kind() {
    let ws = Workspace::empty();
    let run = ws
        .mg()
        .args(["--format", "json", "token", "bob@example.com"])
        .exits_with(5);
    let json = run.json();
    assert_eq!(json["status"], 403);
    assert_eq!(json["error"], "not_verified");
}

#[test]
fn missing_config_file_fails() {
    let ws = Workspace::empty();
    std::fs::remove_file(ws.config_path()).unwrap();
    ws.mg()
        .args(["check", "bob@example.com"])
        .exits_with(1)
        .stderr_has("failed to load configuration");
}

#[test]
fn unknown_config_key_fails() {
    let ws = Workspace::with_config("[policy]\nbogus = 1\n");
    ws.mg()
        .args(["check", "bob@example.com"])
        .exits_with(1)
        .stderr_has("failed to load configuration");
}
