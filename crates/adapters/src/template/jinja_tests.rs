// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[parameterized(
    confirmation = { "confirmation" },
    access_token = { "access_token" },
)]
fn builtin_token_templates_include_token(name: &str) {
    let renderer = MiniJinjaRenderer::builtin().unwrap();
    let body = renderer
        .render(name, &params(&[("app_name", "Mailgate"), ("token", "Ab3xY9qZ")]))
        .unwrap();
    assert!(body.contains("Ab3xY9qZ"), "body: {}", body);
    assert!(body.contains("Mailgate"), "body: {}", body);
}

#[test]
fn uninstall_template_needs_no_token() {
    let renderer = MiniJinjaRenderer::builtin().unwrap();
    let body = renderer
        .render("uninstall", &params(&[("app_name", "Mailgate")]))
        .unwrap();
    assert!(body.contains("Mailgate was uninstalled"));
}

#[test]
fn missing_variable_is_an_error() {
    let renderer = MiniJinjaRenderer::builtin().unwrap();
    let err = renderer
        .render("confirmation", &params(&[("app_name", "Mailgate")]))
        .unwrap_err();
    assert!(
        matches!(err, TemplateError::UndefinedVariable { .. }),
        "got {:?}",
        err
    );
}

#[test]
fn unknown_template_is_not_found() {
    let renderer = MiniJinjaRenderer::builtin().unwrap();
    let err = renderer.render("nope", &Params::new()).unwrap_err();
    assert!(matches!(err, TemplateError::NotFound(ref n) if n == "nope"));
}

#[test]
fn params_are_html_escaped() {
    let renderer = MiniJinjaRenderer::builtin().unwrap();
    let body = renderer
        .render(
            "welcome",
            &params(&[("app_name", "<b>App</b>"), ("address", "bob@example.com")]),
        )
        .unwrap();
    assert!(body.contains("&lt;b&gt;App"), "body: {}", body);
    assert!(!body.contains("<b>"), "body: {}", body);
}

#[test]
fn directory_overrides_builtin_and_adds_extra() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("confirmation.html"), "code={{ token }}").unwrap();
    std::fs::write(dir.path().join("digest.html"), "digest for {{ address }}").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored {{").unwrap();

    let renderer = MiniJinjaRenderer::with_dir(dir.path()).unwrap();

    let body = renderer
        .render("confirmation", &params(&[("token", "T0k3n")]))
        .unwrap();
    assert_eq!(body, "code=T0k3n");

    let body = renderer
        .render("digest", &params(&[("address", "bob@example.com")]))
        .unwrap();
    assert_eq!(body, "digest for bob@example.com");

    // Untouched built-ins remain
    assert!(renderer
        .render("uninstall", &params(&[("app_name", "Mailgate")]))
        .is_ok());
}

#[test]
fn directory_syntax_error_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("welcome.html"), "{% if %}").unwrap();

    let err = MiniJinjaRenderer::with_dir(dir.path()).err().unwrap();
    assert!(matches!(err, TemplateError::Syntax { ref name, .. } if name == "welcome"));
}

#[test]
fn missing_directory_is_io_error() {
    let err = MiniJinjaRenderer::load(Some(Path::new("/nonexistent/templates")))
        .err()
        .unwrap();
    assert!(matches!(err, TemplateError::Io { .. }));
}
