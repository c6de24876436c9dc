//! Access token and uninstall notice specs

use crate::prelude::*;

fn verified_workspace() -> Workspace {
    let ws = Workspace::empty();
    ws.mg().args(["request", "bob@example.com"]).passes();
    let token = ws.last_token();
    ws.mg().args(["confirm", &token]).passes();
    ws
}

#[test]
fn access_token_requires_verification() {
    let ws = Workspace::empty();
    ws.mg()
        .args(["token", "bob@example.com"])
        .exits_with(5)
        .stderr_has("has to be verified");
    assert!(ws.outbox().is_empty());
}

#[test]
fn access_token_is_printed_and_mailed() {
    let ws = verified_workspace();
    let confirmation = ws.last_token();

    let json = ws
        .mg()
        .args(["--format", "json", "token", "bob@example.com"])
        .passes()
        .json();
    let token = json["result"].as_str().unwrap().to_string();

    assert_eq!(json["status"], 201);
    assert_eq!(token.len(), 8);
    assert_ne!(token, confirmation);

    let outbox = ws.outbox();
    assert_eq!(outbox.len(), 2);
    assert_eq!(outbox[1]["subject"], "Mailgate token");
    assert_eq!(ws.last_token(), token);
}

#[test]
fn uninstall_notice_requires_verification() {
    Workspace::empty()
        .mg()
        .args(["uninstall", "bob@example.com"])
        .exits_with(5);
}

#[test]
fn uninstall_notice_is_mailed() {
    let ws = verified_workspace();
    ws.mg()
        .args(["uninstall", "bob@example.com"])
        .passes()
        .stdout_has("Sent uninstall notice to bob@example.com");

    let outbox = ws.outbox();
    assert_eq!(outbox.len(), 2);
    assert_eq!(outbox[1]["subject"], "Mailgate was uninstalled");
}
