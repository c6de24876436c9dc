// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write operations recorded in the WAL

use mg_core::{Address, HistoryEntry};
use serde::{Deserialize, Serialize};

/// A single durable state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Address completed verification
    MarkVerified { address: Address },
    /// Token issued to an address, superseding any earlier one
    RecordIssuance { entry: HistoryEntry },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::MarkVerified { .. } => "mark_verified",
            Operation::RecordIssuance { .. } => "record_issuance",
        }
    }

    pub fn address(&self) -> &Address {
        match self {
            Operation::MarkVerified { address } => address,
            Operation::RecordIssuance { entry } => &entry.address,
        }
    }
}
