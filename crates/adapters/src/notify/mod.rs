// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound mail adapters

mod outbox;
mod relay;

pub use outbox::{OutboxMessage, OutboxNotifier};
pub use relay::RelayNotifier;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifyAdapter, NotifyCall};

use async_trait::async_trait;
use mg_core::Address;
use thiserror::Error;

/// Errors from notification delivery
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("relay rejected message with status {0}")]
    Rejected(u16),
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Adapter for sending a message to an address
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    /// Send a message; fails only on transport faults
    async fn send(&self, to: &Address, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// Transport selected by configuration
#[derive(Clone)]
pub enum MailTransport {
    Outbox(OutboxNotifier),
    Relay(RelayNotifier),
}

impl MailTransport {
    pub fn name(&self) -> &'static str {
        match self {
            MailTransport::Outbox(_) => "outbox",
            MailTransport::Relay(_) => "relay",
        }
    }
}

#[async_trait]
impl NotifyAdapter for MailTransport {
    async fn send(&self, to: &Address, subject: &str, body: &str) -> Result<(), NotifyError> {
        match self {
            MailTransport::Outbox(outbox) => outbox.send(to, subject, body).await,
            MailTransport::Relay(relay) => relay.send(to, subject, body).await,
        }
    }
}
