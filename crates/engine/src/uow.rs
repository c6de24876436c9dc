// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-dispatch unit of work
//!
//! Handlers stage writes and follow-up commands here. Reads observe staged
//! writes before falling through to the store. The dispatcher commits after
//! each handler succeeds and rolls back when one fails.

use crate::error::{bounded, DispatchError};
use mg_core::{Address, Command, HistoryEntry, Token};
use mg_storage::{Operation, Store};
use std::collections::VecDeque;
use std::time::Duration;

pub struct UnitOfWork<S> {
    store: S,
    store_timeout: Duration,
    staged: Vec<Operation>,
    pending: Vec<Command>,
    queue: VecDeque<Command>,
}

impl<S: Store> UnitOfWork<S> {
    pub fn new(store: S, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
            staged: Vec::new(),
            pending: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    pub async fn is_verified(&self, address: &Address) -> Result<bool, DispatchError> {
        let staged = self.staged.iter().any(
            |op| matches!(op, Operation::MarkVerified { address: a } if a == address),
        );
        if staged {
            return Ok(true);
        }
        bounded("store.contains", self.store_timeout, self.store.contains(address)).await
    }

    pub async fn history_for(
        &self,
        address: &Address,
    ) -> Result<Option<HistoryEntry>, DispatchError> {
        if let Some(entry) = self.staged_issuance(address) {
            return Ok(Some(entry.clone()));
        }
        bounded(
            "store.find_by_address",
            self.store_timeout,
            self.store.find_by_address(address),
        )
        .await
    }

    pub async fn history_for_token(
        &self,
        token: &Token,
    ) -> Result<Option<HistoryEntry>, DispatchError> {
        let staged = self.staged.iter().rev().find_map(|op| match op {
            Operation::RecordIssuance { entry } if &entry.token == token => Some(entry),
            _ => None,
        });
        if let Some(entry) = staged {
            // Only current if no later issuance replaced it
            let current = self.staged_issuance(&entry.address);
            return Ok(current.filter(|c| &c.token == token).cloned());
        }

        let found = bounded(
            "store.find_by_token",
            self.store_timeout,
            self.store.find_by_token(token),
        )
        .await?;
        Ok(found.filter(|entry| match self.staged_issuance(&entry.address) {
            Some(newer) => &newer.token == token,
            None => true,
        }))
    }

    pub fn mark_verified(&mut self, address: &Address) {
        self.staged.push(Operation::MarkVerified {
            address: address.clone(),
        });
    }

    pub fn record_issuance(&mut self, entry: HistoryEntry) {
        self.staged.push(Operation::RecordIssuance { entry });
    }

    /// Queue a command to run after the current one commits
    pub fn enqueue(&mut self, command: Command) {
        self.pending.push(command);
    }

    pub fn staged(&self) -> &[Operation] {
        &self.staged
    }

    /// Apply staged writes in order and release pending follow-ups
    pub async fn commit(&mut self) -> Result<usize, DispatchError> {
        let ops = std::mem::take(&mut self.staged);
        let count = ops.len();
        for op in ops {
            match &op {
                Operation::MarkVerified { address } => {
                    bounded("store.add", self.store_timeout, self.store.add(address)).await?
                }
                Operation::RecordIssuance { entry } => {
                    bounded("store.upsert", self.store_timeout, self.store.upsert(entry)).await?
                }
            }
        }
        self.queue.extend(self.pending.drain(..));
        Ok(count)
    }

    /// Discard staged writes and pending follow-ups
    pub fn rollback(&mut self) {
        if !self.staged.is_empty() || !self.pending.is_empty() {
            tracing::debug!(
                writes = self.staged.len(),
                follow_ups = self.pending.len(),
                "discarding staged work"
            );
        }
        self.staged.clear();
        self.pending.clear();
    }

    /// Next committed follow-up, in FIFO order
    pub fn next_follow_up(&mut self) -> Option<Command> {
        self.queue.pop_front()
    }

    fn staged_issuance(&self, address: &Address) -> Option<&HistoryEntry> {
        self.staged.iter().rev().find_map(|op| match op {
            Operation::RecordIssuance { entry } if &entry.address == address => Some(entry),
            _ => None,
        })
    }
}

#[cfg(test)]
#[path = "uow_tests.rs"]
mod tests;
