// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence contract for the ledger and the verified-address set

use crate::wal::WalError;
use async_trait::async_trait;
use mg_core::{Address, HistoryEntry, Token};
use thiserror::Error;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("wal error: {0}")]
    Wal(#[from] WalError),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Set of addresses that completed verification
#[async_trait]
pub trait VerifiedSet: Clone + Send + Sync + 'static {
    /// Check whether an address is verified
    async fn contains(&self, address: &Address) -> Result<bool, StoreError>;

    /// Mark an address verified (idempotent)
    async fn add(&self, address: &Address) -> Result<(), StoreError>;
}

/// One history record per address: the latest issued token and when
#[async_trait]
pub trait HistoryLedger: Clone + Send + Sync + 'static {
    /// Record an issuance, replacing any prior record for the address
    async fn upsert(&self, entry: &HistoryEntry) -> Result<(), StoreError>;

    /// Look up the current record for an address
    async fn find_by_address(&self, address: &Address)
        -> Result<Option<HistoryEntry>, StoreError>;

    /// Look up the record whose current token matches
    async fn find_by_token(&self, token: &Token) -> Result<Option<HistoryEntry>, StoreError>;
}

/// A store backing both repositories
pub trait Store: VerifiedSet + HistoryLedger {}

impl<T: VerifiedSet + HistoryLedger> Store for T {}
