//! Confirmation request specs

use crate::prelude::*;

#[test]
fn request_spools_one_confirmation() {
    let ws = Workspace::empty();
    ws.mg()
        .args(["request", "bob@example.com"])
        .passes()
        .stdout_has("Sent confirmation to bob@example.com");

    let outbox = ws.outbox();
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0]["to"], "bob@example.com");
    assert_eq!(outbox[0]["from"], "noreply@example.com");
    assert_eq!(outbox[0]["subject"], "Confirm your Mailgate token");
    assert_eq!(ws.last_token().len(), 8);
}

#[test]
fn second_request_same_day_is_rate_limited() {
    let ws = Workspace::empty();
    ws.mg().args(["request", "bob@example.com"]).passes();

    ws.mg()
        .args(["request", "bob@example.com"])
        .exits_with(3)
        .stderr_has("too many confirmation emails");
    assert_eq!(ws.outbox().len(), 1);
}

#[test]
fn request_trims_address() {
    let ws = Workspace::empty();
    ws.mg().args(["request", "  bob@example.com  "]).passes();
    assert_eq!(ws.outbox()[0]["to"], "bob@example.com");
}

#[test]
fn request_json_reports_created() {
    let ws = Workspace::empty();
    let run = ws
        .mg()
        .args(["--format", "json", "request", "bob@example.com"])
        .passes();
    let json = run.json();
    assert_eq!(json["status"], 201);
    assert_eq!(json["address"], "bob@example.com");
}
