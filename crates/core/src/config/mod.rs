// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service configuration
//!
//! Loaded once at startup from a TOML file, with secrets optionally supplied
//! through the environment, and handed to the composition root.

use crate::clock::DayBoundary;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "MAILGATE_CONFIG";
/// Environment variable overriding the relay bearer token
pub const RELAY_TOKEN_ENV: &str = "MAILGATE_RELAY_TOKEN";
/// Environment variable overriding the ledger path
pub const STORE_PATH_ENV: &str = "MAILGATE_STORE";

const REDACTED: &str = "<redacted>";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
    #[error("utc_offset_minutes out of range: {0}")]
    InvalidOffset(i32),
    #[error("mail.relay_url is required for the relay transport")]
    MissingRelayUrl,
    #[error("mail.relay_token (or {RELAY_TOKEN_ENV}) is required for the relay transport")]
    MissingRelayToken,
    #[error("mail.sender must not be empty")]
    MissingSender,
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Product name used in notification subjects
    pub app_name: String,
    /// Write logs here instead of stderr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
    pub store: StoreConfig,
    pub mail: MailConfig,
    pub templates: TemplateConfig,
    pub policy: PolicyConfig,
    pub workflow: WorkflowConfig,
    pub timeouts: TimeoutConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Write-ahead log holding the ledger and verified set
    pub path: PathBuf,
}

/// How outbound mail leaves the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Append to a JSON-lines spool picked up by a separate mailer
    Outbox,
    /// POST to an HTTP mail relay
    Relay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MailConfig {
    pub sender: String,
    pub transport: TransportKind,
    pub outbox_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relay_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relay_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateConfig {
    /// Directory of `<name>.html` overrides for the built-in templates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// Offset east of UTC at which calendar days roll over
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkflowConfig {
    /// Queue a welcome notice after an address is verified
    pub welcome_on_verify: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeoutConfig {
    #[serde(with = "humantime_serde")]
    pub store: Duration,
    #[serde(with = "humantime_serde")]
    pub notify: Duration,
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mailgate")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Mailgate".to_string(),
            log_path: None,
            store: StoreConfig::default(),
            mail: MailConfig::default(),
            templates: TemplateConfig::default(),
            policy: PolicyConfig::default(),
            workflow: WorkflowConfig::default(),
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: data_dir().join("ledger.wal"),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            sender: "noreply@localhost".to_string(),
            transport: TransportKind::Outbox,
            outbox_path: data_dir().join("outbox.jsonl"),
            relay_url: None,
            relay_token: None,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            store: Duration::from_secs(5),
            notify: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Resolve the effective configuration.
    ///
    /// Uses `explicit` if given, else the file named by `MAILGATE_CONFIG`,
    /// else built-in defaults; then applies environment overrides and validates.
    pub fn resolve<F>(explicit: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => match env(CONFIG_ENV) {
                Some(path) => Self::load(Path::new(&path))?,
                None => Self::default(),
            },
        };
        config.apply_env(env);
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides
    pub fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = env(RELAY_TOKEN_ENV).filter(|t| !t.is_empty()) {
            self.mail.relay_token = Some(token);
        }
        if let Some(path) = env(STORE_PATH_ENV).filter(|p| !p.is_empty()) {
            self.store.path = PathBuf::from(path);
        }
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.day_boundary()?;
        if self.mail.sender.trim().is_empty() {
            return Err(ConfigError::MissingSender);
        }
        if self.mail.transport == TransportKind::Relay {
            if self.mail.relay_url.is_none() {
                return Err(ConfigError::MissingRelayUrl);
            }
            if self.mail.relay_token.is_none() {
                return Err(ConfigError::MissingRelayToken);
            }
        }
        Ok(())
    }

    /// Day boundary derived from the configured offset
    pub fn day_boundary(&self) -> Result<DayBoundary, ConfigError> {
        let minutes = self.policy.utc_offset_minutes;
        DayBoundary::with_offset_minutes(minutes).ok_or(ConfigError::InvalidOffset(minutes))
    }

    /// Copy with secrets masked, for display
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.mail.relay_token.is_some() {
            config.mail.relay_token = Some(REDACTED.to_string());
        }
        config
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
