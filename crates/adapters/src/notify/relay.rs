// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP mail relay
//!
//! Posts each message as JSON to a relay endpoint with a bearer token.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use mg_core::Address;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Delivers mail through an HTTP relay
#[derive(Clone)]
pub struct RelayNotifier {
    url: String,
    token: String,
    sender: String,
    agent: ureq::Agent,
}

impl RelayNotifier {
    pub fn new(
        url: impl Into<String>,
        token: impl Into<String>,
        sender: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            url: url.into(),
            token: token.into(),
            sender: sender.into(),
            agent,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn post(&self, payload: String) -> Result<(), NotifyError> {
        let response = self
            .agent
            .post(&self.url)
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
            .send(payload)
            .map_err(|e| NotifyError::Transport(format!("relay request failed: {}", e)))?;

        let status = response.status().as_u16();
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(NotifyError::Rejected(status))
        }
    }
}

#[async_trait]
impl NotifyAdapter for RelayNotifier {
    async fn send(&self, to: &Address, subject: &str, body: &str) -> Result<(), NotifyError> {
        let payload = serde_json::to_string(&RelayMessage {
            from: &self.sender,
            to: to.as_str(),
            subject,
            html: body,
        })?;

        // ureq is blocking
        let relay = self.clone();
        tokio::task::spawn_blocking(move || relay.post(payload))
            .await
            .map_err(|e| NotifyError::Transport(format!("relay task failed: {}", e)))?
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
