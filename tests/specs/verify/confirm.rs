//! Confirmation specs

use crate::prelude::*;

#[test]
fn unknown_token_is_link_invalid() {
    Workspace::empty()
        .mg()
        .args(["confirm", "ZZZZ9999"])
        .exits_with(4)
        .stderr_has("does not exist or has expired");
}

#[test]
fn confirming_todays_token_verifies_address() {
    let ws = Workspace::empty();
    ws.mg().args(["request", "bob@example.com"]).passes();
    ws.mg()
        .args(["check", "bob@example.com"])
        .passes()
        .stdout_eq("bob@example.com: not verified\n");

    let token = ws.last_token();
    ws.mg()
        .args(["confirm", &token])
        .passes()
        .stdout_has("Address verified");

    ws.mg()
        .args(["check", "bob@example.com"])
        .passes()
        .stdout_eq("bob@example.com: verified\n");
}

#[test]
fn check_json_reports_confirmed_flag() {
    let ws = Workspace::empty();
    let json = ws
        .mg()
        .args(["--format", "json", "check", "bob@example.com"])
        .passes()
        .json();
    assert_eq!(json["status"], 200);
    assert_eq!(json["confirmed"], false);
}

#[test]
fn verified_address_cannot_request_again() {
    let ws = Workspace::empty();
    ws.mg().args(["request", "bob@example.com"]).passes();
    let token = ws.last_token();
    ws.mg().args(["confirm", &token]).passes();

    ws.mg().args(["request", "bob@example.com"]).exits_with(3);
}

#[test]
fn welcome_follows_confirmation_when_enabled() {
    let ws = Workspace::with_config("[workflow]\nwelcome_on_verify = true\n");
    ws.mg().args(["request", "bob@example.com"]).passes();
    let token = ws.last_token();
    ws.mg().args(["confirm", &token]).passes();

    let outbox = ws.outbox();
    assert_eq!(outbox.len(), 2);
    assert_eq!(outbox[1]["subject"], "Welcome to Mailgate");
}
