// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-address issuance locks
//!
//! Serializes the throttle check and the ledger write for one address so two
//! concurrent requests cannot both pass the check.

use mg_core::Address;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;

type Slots = Arc<Mutex<HashMap<Address, Arc<tokio::sync::Mutex<()>>>>>;

#[derive(Clone, Default)]
pub struct IssuanceLocks {
    slots: Slots,
}

impl IssuanceLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive issuance rights on `address`
    pub async fn acquire(&self, address: &Address) -> IssuanceGuard {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(slots.entry(address.clone()).or_default())
        };
        let guard = slot.lock_owned().await;
        IssuanceGuard {
            address: address.clone(),
            slots: Arc::clone(&self.slots),
            guard: Some(guard),
        }
    }

    /// Number of addresses with a live slot
    pub fn active(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Held from the throttle check through commit; frees the slot when unused
pub struct IssuanceGuard {
    address: Address,
    slots: Slots,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for IssuanceGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        if slots
            .get(&self.address)
            .is_some_and(|slot| Arc::strong_count(slot) == 1)
        {
            slots.remove(&self.address);
        }
    }
}

#[cfg(test)]
#[path = "locks_tests.rs"]
mod tests;
