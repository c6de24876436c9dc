// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::operation::Operation;
use crate::repository::{HistoryLedger, StoreError, VerifiedSet};
use crate::state::MaterializedState;
use async_trait::async_trait;
use mg_core::{Address, HistoryEntry, Token};
use std::sync::{Arc, Mutex};

/// Recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Contains { address: Address },
    Add { address: Address },
    Upsert { entry: HistoryEntry },
    FindByAddress { address: Address },
    FindByToken { token: Token },
}

#[derive(Default)]
struct MemoryState {
    data: MaterializedState,
    calls: Vec<StoreCall>,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-memory store with the same semantics as the WAL store
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Number of recorded write calls
    pub fn write_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, StoreCall::Add { .. } | StoreCall::Upsert { .. }))
            .count()
    }

    /// Seed a record directly, bypassing call recording
    pub fn seed(&self, op: Operation) {
        self.lock().data.apply(&op);
    }

    /// Snapshot of the stored data
    pub fn snapshot(&self) -> MaterializedState {
        self.lock().data.clone()
    }

    /// Configure reads to fail for testing error paths
    pub fn set_fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    /// Configure writes to fail for testing error paths
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn read<T>(
        &self,
        call: StoreCall,
        f: impl FnOnce(&MaterializedState) -> T,
    ) -> Result<T, StoreError> {
        let mut inner = self.lock();
        inner.calls.push(call);
        if inner.fail_reads {
            return Err(StoreError::Unavailable("injected read failure".to_string()));
        }
        Ok(f(&inner.data))
    }

    fn write(&self, call: StoreCall, op: Operation) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.calls.push(call);
        if inner.fail_writes {
            return Err(StoreError::Unavailable("injected write failure".to_string()));
        }
        inner.data.apply(&op);
        Ok(())
    }
}

#[async_trait]
impl VerifiedSet for MemoryStore {
    async fn contains(&self, address: &Address) -> Result<bool, StoreError> {
        self.read(
            StoreCall::Contains {
                address: address.clone(),
            },
            |data| data.is_verified(address),
        )
    }

    async fn add(&self, address: &Address) -> Result<(), StoreError> {
        self.write(
            StoreCall::Add {
                address: address.clone(),
            },
            Operation::MarkVerified {
                address: address.clone(),
            },
        )
    }
}

#[async_trait]
impl HistoryLedger for MemoryStore {
    async fn upsert(&self, entry: &HistoryEntry) -> Result<(), StoreError> {
        self.write(
            StoreCall::Upsert {
                entry: entry.clone(),
            },
            Operation::RecordIssuance {
                entry: entry.clone(),
            },
        )
    }

    async fn find_by_address(
        &self,
        address: &Address,
    ) -> Result<Option<HistoryEntry>, StoreError> {
        self.read(
            StoreCall::FindByAddress {
                address: address.clone(),
            },
            |data| data.history_for(address).cloned(),
        )
    }

    async fn find_by_token(&self, token: &Token) -> Result<Option<HistoryEntry>, StoreError> {
        self.read(
            StoreCall::FindByToken {
                token: token.clone(),
            },
            |data| data.history_for_token(token).cloned(),
        )
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
