// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command dispatcher

use crate::error::{millis, DispatchError};
use crate::handlers::{HandlerSettings, Handlers};
use crate::locks::IssuanceLocks;
use crate::uow::UnitOfWork;
use mg_adapters::{NotifyAdapter, TemplateRenderer};
use mg_core::{Clock, Command, Outcome, TokenGenerator};
use mg_storage::Store;
use std::time::Duration;
use tracing::Instrument;

/// Collaborators a dispatcher is built from
pub struct EngineDeps<S, N, R, G, C> {
    pub store: S,
    pub notify: N,
    pub templates: R,
    pub tokens: G,
    pub clock: C,
}

/// Runs commands and their follow-ups to completion
pub struct Dispatcher<S, N, R, G, C> {
    store: S,
    store_timeout: Duration,
    handlers: Handlers<N, R, G, C>,
    locks: IssuanceLocks,
}

impl<S, N, R, G, C> Dispatcher<S, N, R, G, C>
where
    S: Store,
    N: NotifyAdapter,
    R: TemplateRenderer,
    G: TokenGenerator,
    C: Clock,
{
    pub fn new(
        deps: EngineDeps<S, N, R, G, C>,
        settings: HandlerSettings,
        store_timeout: Duration,
    ) -> Self {
        Self {
            store: deps.store,
            store_timeout,
            handlers: Handlers {
                notify: deps.notify,
                templates: deps.templates,
                tokens: deps.tokens,
                clock: deps.clock,
                settings,
            },
            locks: IssuanceLocks::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &HandlerSettings {
        &self.handlers.settings
    }

    /// Handle a command and any follow-ups it queues
    ///
    /// Returns the outcome of `command` itself. Follow-ups run in FIFO order
    /// after it commits; their outcomes are dropped. The first failure ends the
    /// dispatch, discarding that handler's staged writes.
    pub async fn dispatch(&self, command: Command) -> Result<Outcome, DispatchError> {
        let span = tracing::info_span!("dispatch", kind = %command.kind());

        async {
            let start = std::time::Instant::now();
            let mut uow = UnitOfWork::new(self.store.clone(), self.store_timeout);

            let result: Result<Outcome, DispatchError> = async {
                let outcome = self.run(&mut uow, command).await?;
                while let Some(next) = uow.next_follow_up() {
                    self.run(&mut uow, next).await?;
                }
                Ok(outcome)
            }
            .await;

            let elapsed_ms = millis(start.elapsed());
            match &result {
                Ok(_) => tracing::info!(elapsed_ms, "completed"),
                Err(DispatchError::Rejected(rejection)) => {
                    tracing::info!(elapsed_ms, rejection = rejection.name(), "rejected")
                }
                Err(e) => tracing::error!(elapsed_ms, error = %e, "failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        uow: &mut UnitOfWork<S>,
        command: Command,
    ) -> Result<Outcome, DispatchError> {
        let kind = command.kind();
        // Issuance holds its address lock from the throttle check through commit
        let _issuance = match &command {
            Command::RequestVerification { address } => Some(self.locks.acquire(address).await),
            _ => None,
        };

        let outcome = match self.route(uow, &command).await {
            Ok(outcome) => outcome,
            Err(e) => {
                uow.rollback();
                return Err(e);
            }
        };

        let writes = match uow.commit().await {
            Ok(writes) => writes,
            Err(e) => {
                if let Command::RequestVerification { address } = &command {
                    tracing::warn!(%address, error = %e, "confirmation sent but issuance not recorded");
                }
                return Err(e);
            }
        };
        tracing::debug!(%kind, writes, "committed");
        Ok(outcome)
    }

    async fn route(
        &self,
        uow: &mut UnitOfWork<S>,
        command: &Command,
    ) -> Result<Outcome, DispatchError> {
        let h = &self.handlers;
        match command {
            Command::RequestVerification { address } => h.request_verification(uow, address).await,
            Command::ConfirmVerification { token } => h.confirm_verification(uow, token).await,
            Command::CheckVerification { address } => h.check_verification(uow, address).await,
            Command::IssueAccessToken { address } => h.issue_access_token(uow, address).await,
            Command::SendUninstallNotice { address } => {
                h.send_uninstall_notice(uow, address).await
            }
            Command::SendWelcome { address } => h.send_welcome(uow, address).await,
        }
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
