// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for command dispatch

use mg_adapters::{NotifyError, TemplateError};
use mg_core::Rejection;
use mg_storage::StoreError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can end a dispatch
///
/// `Rejected` carries the expected refusals; every other variant is an
/// unclassified collaborator failure.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("notify error: {0}")]
    Notify(#[from] NotifyError),
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

impl DispatchError {
    /// The rejection, if this is an expected refusal
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            DispatchError::Rejected(r) => Some(*r),
            _ => None,
        }
    }
}

/// Run a collaborator call under a deadline
pub(crate) async fn bounded<T, E, F>(
    operation: &'static str,
    after: Duration,
    fut: F,
) -> Result<T, DispatchError>
where
    F: std::future::Future<Output = Result<T, E>>,
    E: Into<DispatchError>,
{
    match tokio::time::timeout(after, fut).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => {
            tracing::warn!(operation, after_ms = millis(after), "timed out");
            Err(DispatchError::Timeout { operation, after })
        }
    }
}

/// Whole milliseconds for log fields, saturating at `u64::MAX`
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
