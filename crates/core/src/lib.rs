// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mg-core: Core types for the mailgate address verification service
//!
//! This crate provides:
//! - Address, token, and ledger record types
//! - Commands, outcomes, and the rejection taxonomy
//! - Clock and day-boundary abstractions for date-based expiry
//! - Token generation
//! - Service configuration

pub mod clock;
pub mod config;
pub mod token;

pub mod command;
pub mod model;

// Re-exports
pub use clock::{Clock, DayBoundary, FakeClock, SystemClock};
pub use command::{Command, CommandKind, Outcome, Rejection};
pub use config::{Config, ConfigError, MailConfig, TransportKind};
pub use model::{Address, AddressError, HistoryEntry, Token, VerifiedEntry};
pub use token::{RandomTokenGenerator, SequentialTokenGenerator, TokenGenerator, TOKEN_LEN};
