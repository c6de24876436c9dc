// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Durable storage for the verification ledger and verified-address set

mod operation;
mod repository;
mod state;
mod store;
mod wal;

#[cfg(any(test, feature = "test-support"))]
mod memory;

pub use operation::Operation;
pub use repository::{HistoryLedger, Store, StoreError, VerifiedSet};
pub use state::MaterializedState;
pub use store::WalStore;
pub use wal::{Replay, Wal, WalError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use memory::{MemoryStore, StoreCall};
