// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Composition root: builds a dispatcher from configuration

use crate::dispatcher::{Dispatcher, EngineDeps};
use crate::handlers::HandlerSettings;
use mg_adapters::{
    MailTransport, MiniJinjaRenderer, OutboxNotifier, RelayNotifier, TemplateError,
    TracedNotifyAdapter,
};
use mg_core::{Config, ConfigError, RandomTokenGenerator, SystemClock, TransportKind};
use mg_storage::{StoreError, WalStore};
use thiserror::Error;

/// Dispatcher wired to production collaborators
pub type AppDispatcher = Dispatcher<
    WalStore,
    TracedNotifyAdapter<MailTransport>,
    MiniJinjaRenderer,
    RandomTokenGenerator,
    SystemClock,
>;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to open store: {0}")]
    Store(#[from] StoreError),
    #[error("failed to load templates: {0}")]
    Template(#[from] TemplateError),
}

impl HandlerSettings {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            app_name: config.app_name.clone(),
            day_boundary: config.day_boundary()?,
            welcome_on_verify: config.workflow.welcome_on_verify,
            notify_timeout: config.timeouts.notify,
        })
    }
}

/// Build the mail transport selected by `mail.transport`
pub fn mail_transport(config: &Config) -> Result<MailTransport, ConfigError> {
    let mail = &config.mail;
    match mail.transport {
        TransportKind::Outbox => Ok(MailTransport::Outbox(OutboxNotifier::new(
            &mail.outbox_path,
            &mail.sender,
        ))),
        TransportKind::Relay => {
            let url = mail.relay_url.as_deref().ok_or(ConfigError::MissingRelayUrl)?;
            let token = mail
                .relay_token
                .as_deref()
                .ok_or(ConfigError::MissingRelayToken)?;
            Ok(MailTransport::Relay(RelayNotifier::new(
                url,
                token,
                &mail.sender,
                config.timeouts.notify,
            )))
        }
    }
}

/// Open the store and wire every collaborator from `config`
pub fn bootstrap(config: &Config) -> Result<AppDispatcher, BootstrapError> {
    config.validate()?;
    let settings = HandlerSettings::from_config(config)?;

    let store = WalStore::open(&config.store.path, config.timeouts.store)?;
    let transport = mail_transport(config)?;
    let templates = MiniJinjaRenderer::load(config.templates.dir.as_deref())?;

    tracing::debug!(
        store = %config.store.path.display(),
        transport = transport.name(),
        "bootstrapped"
    );

    Ok(Dispatcher::new(
        EngineDeps {
            store,
            notify: TracedNotifyAdapter::new(transport),
            templates,
            tokens: RandomTokenGenerator,
            clock: SystemClock,
        },
        settings,
        config.timeouts.store,
    ))
}

#[cfg(test)]
#[path = "bootstrap_tests.rs"]
mod tests;
