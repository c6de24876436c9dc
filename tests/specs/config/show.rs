//! Config display specs

use crate::prelude::*;

#[test]
fn config_shows_effective_settings() {
    let ws = Workspace::empty();
    ws.mg()
        .args(["config"])
        .passes()
        .stdout_has("app_name = \"Mailgate\"")
        .stdout_has("transport = \"outbox\"")
        .stdout_has("[timeouts]");
}

#[test]
fn config_redacts_relay_token() {
    let ws = Workspace::with_config("");
    std::fs::write(
        ws.config_path(),
        r#"
[mail]
transport = "relay"
relay_url = "http://127.0.0.1:9/send"
"#,
    )
    .unwrap();

    let json = ws
        .mg()
        .env("MAILGATE_RELAY_TOKEN", "super-secret")
        .args(["--format", "json", "config"])
        .passes()
        .json();
    assert_eq!(json["mail"]["relay_token"], "<redacted>");
}

#[test]
fn relay_without_token_is_rejected() {
    let ws = Workspace::empty();
    std::fs::write(
        ws.config_path(),
        "[mail]\ntransport = \"relay\"\nrelay_url = \"http://127.0.0.1:9/send\"\n",
    )
    .unwrap();

    ws.mg()
        .args(["config"])
        .exits_with(1)
        .stderr_has("relay_token");
}
