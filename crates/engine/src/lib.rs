// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Mailgate dispatch engine

mod bootstrap;
mod dispatcher;
mod error;
mod handlers;
mod locks;
mod uow;

pub use bootstrap::{bootstrap, mail_transport, AppDispatcher, BootstrapError};
pub use dispatcher::{Dispatcher, EngineDeps};
pub use error::DispatchError;
pub use handlers::HandlerSettings;
pub use locks::{IssuanceGuard, IssuanceLocks};
pub use uow::UnitOfWork;
