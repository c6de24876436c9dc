// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON-lines mail spool
//!
//! Messages are appended to a file for a separate mailer process to deliver.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mg_core::Address;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// A spooled message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxMessage {
    pub id: String,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub queued_at: DateTime<Utc>,
}

/// Appends outbound messages to a spool file
#[derive(Clone, Debug)]
pub struct OutboxNotifier {
    path: PathBuf,
    sender: String,
    write_lock: Arc<Mutex<()>>,
}

impl OutboxNotifier {
    pub fn new(path: impl Into<PathBuf>, sender: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sender: sender.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every message in a spool file
    pub fn read_all(path: &Path) -> Result<Vec<OutboxMessage>, NotifyError> {
        let file = match std::fs::File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut messages = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            messages.push(serde_json::from_str(&line)?);
        }
        Ok(messages)
    }

    fn append(&self, message: &OutboxMessage) -> Result<(), NotifyError> {
        let mut line = serde_json::to_string(message)?;
        line.push('\n');

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.sync_data()?;
        Ok(())
    }
}

#[async_trait]
impl NotifyAdapter for OutboxNotifier {
    async fn send(&self, to: &Address, subject: &str, body: &str) -> Result<(), NotifyError> {
        let message = OutboxMessage {
            id: uuid::Uuid::new_v4().to_string(),
            from: self.sender.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            queued_at: Utc::now(),
        };
        let outbox = self.clone();
        tokio::task::spawn_blocking(move || outbox.append(&message))
            .await
            .map_err(|e| NotifyError::Transport(format!("outbox task failed: {}", e)))?
    }
}

#[cfg(test)]
#[path = "outbox_tests.rs"]
mod tests;
