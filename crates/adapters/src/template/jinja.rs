// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! minijinja-backed renderer
//!
//! Built-in templates can be replaced by `<name>.html` files in a directory.
//! Extra `.html` files in the directory are registered under their stem.

use super::{Params, TemplateError, TemplateRenderer};
use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};
use std::path::Path;
use std::sync::Arc;

/// Built-in templates as (name, source) pairs
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        "confirmation",
        r#"<p>Thanks for installing {{ app_name }}.</p>
<p>Your confirmation code is <strong>{{ token }}</strong>.</p>
<p>The code is valid until the end of today.</p>
"#,
    ),
    (
        "access_token",
        r#"<p>Your {{ app_name }} access code is <strong>{{ token }}</strong>.</p>
"#,
    ),
    (
        "uninstall",
        r#"<p>{{ app_name }} was uninstalled from your browser.</p>
<p>If you did not do this, someone else may have access to your device.</p>
"#,
    ),
    (
        "welcome",
        r#"<p>Welcome to {{ app_name }}. Your address {{ address }} is confirmed.</p>
"#,
    ),
];

/// Template renderer backed by a minijinja environment
#[derive(Clone)]
pub struct MiniJinjaRenderer {
    env: Arc<Environment<'static>>,
}

impl MiniJinjaRenderer {
    /// Renderer with only the built-in templates
    pub fn builtin() -> Result<Self, TemplateError> {
        let mut env = base_environment();
        for &(name, source) in BUILTIN_TEMPLATES {
            env.add_template(name, source)
                .map_err(|e| map_error(name, e))?;
        }
        Ok(Self { env: Arc::new(env) })
    }

    /// Built-in templates overlaid with `*.html` files from `dir`
    pub fn with_dir(dir: &Path) -> Result<Self, TemplateError> {
        let mut env = base_environment();
        for &(name, source) in BUILTIN_TEMPLATES {
            env.add_template(name, source)
                .map_err(|e| map_error(name, e))?;
        }

        let read_err = |source| TemplateError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if path.extension().is_some_and(|ext| ext == "html") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let source = std::fs::read_to_string(&path).map_err(|source| TemplateError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(name, path = %path.display(), "loaded template override");
            env.add_template_owned(name.to_string(), source)
                .map_err(|e| map_error(name, e))?;
        }

        Ok(Self { env: Arc::new(env) })
    }

    /// Load from an optional override directory
    pub fn load(dir: Option<&Path>) -> Result<Self, TemplateError> {
        match dir {
            Some(dir) => Self::with_dir(dir),
            None => Self::builtin(),
        }
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, name: &str, params: &Params) -> Result<String, TemplateError> {
        let template = self.env.get_template(name).map_err(|e| map_error(name, e))?;
        template.render(params).map_err(|e| map_error(name, e))
    }
}

fn base_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env
}

fn map_error(name: &str, err: minijinja::Error) -> TemplateError {
    let name = name.to_string();
    let message = err.to_string();
    match err.kind() {
        ErrorKind::TemplateNotFound => TemplateError::NotFound(name),
        ErrorKind::SyntaxError => TemplateError::Syntax { name, message },
        ErrorKind::UndefinedError => TemplateError::UndefinedVariable { name, message },
        _ => TemplateError::Render { name, message },
    }
}

#[cfg(test)]
#[path = "jinja_tests.rs"]
mod tests;
