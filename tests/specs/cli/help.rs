//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    let ws = Workspace::empty();
    let run = ws.mg().args(["--help"]).passes();
    for sub in ["request", "confirm", "check", "token", "uninstall", "config"] {
        run.stdout_has(sub);
    }
}

#[test]
fn version_is_reported() {
    Workspace::empty()
        .mg()
        .args(["--version"])
        .passes()
        .stdout_has("mg ");
}
