// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message body rendering

mod jinja;

pub use jinja::{MiniJinjaRenderer, BUILTIN_TEMPLATES};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTemplateRenderer, RenderCall};

use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Named string parameters passed to a template
pub type Params = BTreeMap<String, String>;

/// Errors from template rendering
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template not found: {0}")]
    NotFound(String),
    #[error("template {name} has a syntax error: {message}")]
    Syntax { name: String, message: String },
    #[error("template {name} uses an undefined variable: {message}")]
    UndefinedVariable { name: String, message: String },
    #[error("failed to render {name}: {message}")]
    Render { name: String, message: String },
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Renders a named template with parameters into a message body
pub trait TemplateRenderer: Clone + Send + Sync + 'static {
    fn render(&self, name: &str, params: &Params) -> Result<String, TemplateError>;
}
