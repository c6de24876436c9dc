// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! WAL-backed store

use crate::operation::Operation;
use crate::repository::{HistoryLedger, StoreError, VerifiedSet};
use crate::state::MaterializedState;
use crate::wal::{Wal, WalError};
use async_trait::async_trait;
use fs2::FileExt;
use mg_core::{Address, HistoryEntry, Token};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const LOCK_POLL: Duration = Duration::from_millis(20);

/// Durable store: every write is appended to the WAL, then applied to the
/// in-memory state that serves reads.
#[derive(Clone)]
pub struct WalStore {
    wal: Arc<Mutex<Wal>>,
    state: Arc<Mutex<MaterializedState>>,
    path: PathBuf,
    // Held to keep the exclusive lock; released on drop of the last clone
    _lock: Arc<File>,
}

impl WalStore {
    /// Open the ledger at `path`, waiting up to `lock_wait` for another
    /// process to release it.
    ///
    /// Blocks the calling thread; inside a runtime call it from
    /// `spawn_blocking`.
    pub fn open(path: &Path, lock_wait: Duration) -> Result<Self, StoreError> {
        let lock = acquire_lock(&lock_path(path), lock_wait)?;
        let (wal, operations) = Wal::open(path)?;
        let state = MaterializedState::from_operations(&operations);

        tracing::debug!(
            path = %path.display(),
            operations = operations.len(),
            verified = state.verified_count(),
            history = state.history_count(),
            "ledger opened"
        );

        Ok(Self {
            wal: Arc::new(Mutex::new(wal)),
            state: Arc::new(Mutex::new(state)),
            path: path.to_path_buf(),
            _lock: Arc::new(lock),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the current state
    pub fn state(&self) -> MaterializedState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Append and apply on the blocking pool
    async fn persist(&self, op: Operation) -> Result<(), StoreError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.persist_blocking(op))
            .await
            .map_err(|e| StoreError::Unavailable(format!("persist task failed: {e}")))?
    }

    fn persist_blocking(&self, op: Operation) -> Result<(), StoreError> {
        let seq = {
            let mut wal = self.wal.lock().unwrap_or_else(|e| e.into_inner());
            wal.append(&op)?
        };
        tracing::trace!(seq, op = op.name(), address = %op.address(), "persisted");
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .apply(&op);
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&MaterializedState) -> T) -> T {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&state)
    }
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".lock");
    path.with_file_name(name)
}

fn acquire_lock(path: &Path, wait: Duration) -> Result<File, StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(WalError::from)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)
        .map_err(WalError::from)?;

    let deadline = Instant::now() + wait;
    loop {
        match file.try_lock_exclusive() {
            Ok(()) => return Ok(file),
            Err(_) if Instant::now() < deadline => std::thread::sleep(LOCK_POLL),
            Err(_) => return Err(WalError::Locked(path.to_path_buf()).into()),
        }
    }
}

#[async_trait]
impl VerifiedSet for WalStore {
    async fn contains(&self, address: &Address) -> Result<bool, StoreError> {
        Ok(self.read(|state| state.is_verified(address)))
    }

    async fn add(&self, address: &Address) -> Result<(), StoreError> {
        if self.read(|state| state.is_verified(address)) {
            return Ok(());
        }
        self.persist(Operation::MarkVerified {
            address: address.clone(),
        })
        .await
    }
}

#[async_trait]
impl HistoryLedger for WalStore {
    async fn upsert(&self, entry: &HistoryEntry) -> Result<(), StoreError> {
        self.persist(Operation::RecordIssuance {
            entry: entry.clone(),
        })
        .await
    }

    async fn find_by_address(
        &self,
        address: &Address,
    ) -> Result<Option<HistoryEntry>, StoreError> {
        Ok(self.read(|state| state.history_for(address).cloned()))
    }

    async fn find_by_token(&self, token: &Token) -> Result<Option<HistoryEntry>, StoreError> {
        Ok(self.read(|state| state.history_for_token(token).cloned()))
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
