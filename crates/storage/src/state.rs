// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized state from WAL replay

use crate::operation::Operation;
use mg_core::{Address, HistoryEntry, Token};
use std::collections::{BTreeSet, HashMap};

/// Ledger and verified set built from WAL operations
#[derive(Debug, Default, Clone)]
pub struct MaterializedState {
    verified: BTreeSet<Address>,
    history: HashMap<Address, HistoryEntry>,
    /// Current token -> owning address
    tokens: HashMap<Token, Address>,
}

impl MaterializedState {
    /// Rebuild state by applying operations in order
    pub fn from_operations<'a>(ops: impl IntoIterator<Item = &'a Operation>) -> Self {
        let mut state = Self::default();
        for op in ops {
            state.apply(op);
        }
        state
    }

    pub fn is_verified(&self, address: &Address) -> bool {
        self.verified.contains(address)
    }

    pub fn history_for(&self, address: &Address) -> Option<&HistoryEntry> {
        self.history.get(address)
    }

    /// Record whose current token is `token`.
    ///
    /// Superseded tokens do not resolve.
    pub fn history_for_token(&self, token: &Token) -> Option<&HistoryEntry> {
        let address = self.tokens.get(token)?;
        self.history
            .get(address)
            .filter(|entry| &entry.token == token)
    }

    pub fn verified_count(&self) -> usize {
        self.verified.len()
    }

    pub fn history_count(&self) -> usize {
        self.history.len()
    }

    /// Apply an operation to update the state
    pub fn apply(&mut self, op: &Operation) {
        match op {
            Operation::MarkVerified { address } => {
                self.verified.insert(address.clone());
            }

            Operation::RecordIssuance { entry } => {
                if let Some(previous) = self.history.insert(entry.address.clone(), entry.clone()) {
                    // Drop the superseded token unless another address now owns it
                    if self.tokens.get(&previous.token) == Some(&previous.address) {
                        self.tokens.remove(&previous.token);
                    }
                }
                // On a collision the newest issuance owns the token
                self.tokens
                    .insert(entry.token.clone(), entry.address.clone());
            }
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
