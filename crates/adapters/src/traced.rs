// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::notify::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use mg_core::Address;
use tracing::Instrument;

/// Wrapper that adds tracing to any NotifyAdapter
#[derive(Clone)]
pub struct TracedNotifyAdapter<N> {
    inner: N,
}

impl<N> TracedNotifyAdapter<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &N {
        &self.inner
    }
}

#[async_trait]
impl<N: NotifyAdapter> NotifyAdapter for TracedNotifyAdapter<N> {
    async fn send(&self, to: &Address, subject: &str, body: &str) -> Result<(), NotifyError> {
        let span = tracing::info_span!("notify.send", %to);

        async {
            tracing::info!(subject, body_len = body.len(), "sending");

            let start = std::time::Instant::now();
            let result = self.inner.send(to, subject, body).await;
            let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "sent"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "send failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
