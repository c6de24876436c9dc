// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake template renderer for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Params, TemplateError, TemplateRenderer};
use std::sync::{Arc, Mutex};

/// Recorded render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCall {
    pub name: String,
    pub params: Params,
}

#[derive(Default)]
struct FakeTemplateState {
    calls: Vec<RenderCall>,
    fail: bool,
}

/// Renders `name` followed by `key=value` pairs, one per line
#[derive(Clone, Default)]
pub struct FakeTemplateRenderer {
    inner: Arc<Mutex<FakeTemplateState>>,
}

impl FakeTemplateRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Make subsequent renders fail
    pub fn set_fails(&self, fail: bool) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).fail = fail;
    }
}

impl TemplateRenderer for FakeTemplateRenderer {
    fn render(&self, name: &str, params: &Params) -> Result<String, TemplateError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.fail {
            return Err(TemplateError::Render {
                name: name.to_string(),
                message: "injected failure".to_string(),
            });
        }
        inner.calls.push(RenderCall {
            name: name.to_string(),
            params: params.clone(),
        });

        let mut body = name.to_string();
        for (key, value) in params {
            body.push('\n');
            body.push_str(key);
            body.push('=');
            body.push_str(value);
        }
        Ok(body)
    }
}
