// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command handlers
//!
//! Each handler reads through the unit of work, sends its notification, and
//! then stages its writes. A failed send therefore leaves nothing to commit.

use crate::error::{bounded, DispatchError};
use crate::uow::UnitOfWork;
use mg_adapters::{NotifyAdapter, Params, TemplateRenderer};
use mg_core::{
    Address, Clock, Command, DayBoundary, HistoryEntry, Outcome, Rejection, Token, TokenGenerator,
};
use mg_storage::Store;
use std::time::Duration;

/// Settings the handlers need from configuration
#[derive(Debug, Clone)]
pub struct HandlerSettings {
    pub app_name: String,
    pub day_boundary: DayBoundary,
    pub welcome_on_verify: bool,
    pub notify_timeout: Duration,
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self {
            app_name: "Mailgate".to_string(),
            day_boundary: DayBoundary::utc(),
            welcome_on_verify: false,
            notify_timeout: Duration::from_secs(30),
        }
    }
}

pub(crate) struct Handlers<N, R, G, C> {
    pub notify: N,
    pub templates: R,
    pub tokens: G,
    pub clock: C,
    pub settings: HandlerSettings,
}

impl<N, R, G, C> Handlers<N, R, G, C>
where
    N: NotifyAdapter,
    R: TemplateRenderer,
    G: TokenGenerator,
    C: Clock,
{
    pub async fn request_verification<S: Store>(
        &self,
        uow: &mut UnitOfWork<S>,
        address: &Address,
    ) -> Result<Outcome, DispatchError> {
        if uow.is_verified(address).await? {
            tracing::info!(%address, "already verified");
            return Err(Rejection::RateExceeded.into());
        }

        let now = self.clock.now();
        if let Some(previous) = uow.history_for(address).await? {
            if self.settings.day_boundary.same_day(previous.issued_at, now) {
                tracing::info!(%address, issued_at = %previous.issued_at, "already issued today");
                return Err(Rejection::RateExceeded.into());
            }
        }

        let token = self.tokens.generate();
        let body = self
            .templates
            .render("confirmation", &self.params_with_token(&token))?;
        let subject = format!("Confirm your {} token", self.settings.app_name);
        self.send(address, &subject, &body).await?;

        uow.record_issuance(HistoryEntry::new(address.clone(), now, token));
        tracing::info!(%address, "confirmation issued");
        Ok(Outcome::Done)
    }

    pub async fn confirm_verification<S: Store>(
        &self,
        uow: &mut UnitOfWork<S>,
        token: &Token,
    ) -> Result<Outcome, DispatchError> {
        let now = self.clock.now();
        let entry = match uow.history_for_token(token).await? {
            Some(entry) if self.settings.day_boundary.same_day(entry.issued_at, now) => entry,
            Some(entry) => {
                tracing::info!(address = %entry.address, issued_at = %entry.issued_at, "token expired");
                return Err(Rejection::LinkInvalid.into());
            }
            None => {
                tracing::info!("token not found");
                return Err(Rejection::LinkInvalid.into());
            }
        };

        let newly_verified = !uow.is_verified(&entry.address).await?;
        uow.mark_verified(&entry.address);
        tracing::info!(address = %entry.address, newly_verified, "address verified");

        if newly_verified && self.settings.welcome_on_verify {
            uow.enqueue(Command::SendWelcome {
                address: entry.address,
            });
        }
        Ok(Outcome::Done)
    }

    pub async fn check_verification<S: Store>(
        &self,
        uow: &mut UnitOfWork<S>,
        address: &Address,
    ) -> Result<Outcome, DispatchError> {
        let verified = uow.is_verified(address).await?;
        tracing::debug!(%address, verified, "checked");
        Ok(Outcome::Verified(verified))
    }

    pub async fn issue_access_token<S: Store>(
        &self,
        uow: &mut UnitOfWork<S>,
        address: &Address,
    ) -> Result<Outcome, DispatchError> {
        self.require_verified(uow, address).await?;

        let token = self.tokens.generate();
        let body = self
            .templates
            .render("access_token", &self.params_with_token(&token))?;
        let subject = format!("{} token", self.settings.app_name);
        self.send(address, &subject, &body).await?;

        tracing::info!(%address, "access token issued");
        Ok(Outcome::AccessToken(token))
    }

    pub async fn send_uninstall_notice<S: Store>(
        &self,
        uow: &mut UnitOfWork<S>,
        address: &Address,
    ) -> Result<Outcome, DispatchError> {
        self.require_verified(uow, address).await?;

        let body = self.templates.render("uninstall", &self.params())?;
        let subject = format!("{} was uninstalled", self.settings.app_name);
        self.send(address, &subject, &body).await?;
        Ok(Outcome::Done)
    }

    pub async fn send_welcome<S: Store>(
        &self,
        uow: &mut UnitOfWork<S>,
        address: &Address,
    ) -> Result<Outcome, DispatchError> {
        self.require_verified(uow, address).await?;

        let mut params = self.params();
        params.insert("address".to_string(), address.to_string());
        let body = self.templates.render("welcome", &params)?;
        let subject = format!("Welcome to {}", self.settings.app_name);
        self.send(address, &subject, &body).await?;
        Ok(Outcome::Done)
    }

    async fn require_verified<S: Store>(
        &self,
        uow: &UnitOfWork<S>,
        address: &Address,
    ) -> Result<(), DispatchError> {
        if uow.is_verified(address).await? {
            Ok(())
        } else {
            tracing::info!(%address, "not verified");
            Err(Rejection::NotVerified.into())
        }
    }

    async fn send(&self, to: &Address, subject: &str, body: &str) -> Result<(), DispatchError> {
        bounded(
            "notify.send",
            self.settings.notify_timeout,
            self.notify.send(to, subject, body),
        )
        .await
    }

    fn params(&self) -> Params {
        let mut params = Params::new();
        params.insert("app_name".to_string(), self.settings.app_name.clone());
        params
    }

    fn params_with_token(&self, token: &Token) -> Params {
        let mut params = self.params();
        params.insert("token".to_string(), token.to_string());
        params
    }
}
