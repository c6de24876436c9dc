// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-ahead log for durable storage
//!
//! One JSON object per line, each carrying a sequence number and a CRC32 of
//! its operation. Replay stops at the first line that fails to parse or
//! verify; that line and everything after it is a torn write and gets
//! truncated when the log is reopened for appending.

use crate::operation::Operation;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur in WAL operations
#[derive(Debug, Error)]
pub enum WalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("ledger is locked by another process: {0}")]
    Locked(PathBuf),
}

#[derive(Debug, Serialize, Deserialize)]
struct WalEntry {
    seq: u64,
    op: Operation,
    crc: u32,
}

impl WalEntry {
    fn new(seq: u64, op: Operation) -> Result<Self, WalError> {
        let crc = checksum(&op)?;
        Ok(Self { seq, op, crc })
    }

    fn verify(&self) -> bool {
        checksum(&self.op).map(|crc| crc == self.crc).unwrap_or(false)
    }
}

fn checksum(op: &Operation) -> Result<u32, WalError> {
    let json = serde_json::to_string(op)?;
    Ok(crc32fast::hash(json.as_bytes()))
}

/// Result of scanning a log file
#[derive(Debug, Default)]
pub struct Replay {
    pub operations: Vec<Operation>,
    /// Sequence number of the last valid entry
    pub last_sequence: u64,
    /// Byte length of the valid prefix
    pub valid_len: u64,
    /// Bytes past the valid prefix
    pub discarded_len: u64,
}

/// Write-ahead log for durable operation storage
pub struct Wal {
    file: File,
    sequence: u64,
}

impl Wal {
    /// Open or create a WAL at the given path.
    ///
    /// Returns the log positioned for appending along with the operations it
    /// already holds. A torn tail is truncated.
    pub fn open(path: &Path) -> Result<(Self, Vec<Operation>), WalError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let replay = Self::replay(path)?;
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)?;

        if replay.discarded_len > 0 {
            tracing::warn!(
                path = %path.display(),
                discarded_bytes = replay.discarded_len,
                last_sequence = replay.last_sequence,
                "truncating torn WAL tail"
            );
            file.set_len(replay.valid_len)?;
        }

        let wal = Self {
            file,
            sequence: replay.last_sequence,
        };
        Ok((wal, replay.operations))
    }

    /// Append an operation to the log
    pub fn append(&mut self, op: &Operation) -> Result<u64, WalError> {
        let entry = WalEntry::new(self.sequence + 1, op.clone())?;
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');
        self.file.write_all(line.as_bytes())?;
        self.file.sync_data()?;
        self.sequence = entry.seq;
        Ok(self.sequence)
    }

    /// Get the current sequence number
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Replay all valid operations from the log
    pub fn replay(path: &Path) -> Result<Replay, WalError> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Replay::default()),
            Err(e) => return Err(e.into()),
        };
        let total_len = file.metadata()?.len();

        let mut reader = BufReader::new(file);
        let mut replay = Replay::default();
        let mut line = Vec::new();

        loop {
            line.clear();
            let read = reader.read_until(b'\n', &mut line)?;
            if read == 0 {
                break;
            }
            // A final line without its newline was never fully written
            if line.last() != Some(&b'\n') {
                break;
            }
            // A write torn inside a multi-byte character
            let Ok(text) = std::str::from_utf8(&line) else {
                break;
            };
            let trimmed = text.trim_end();
            if trimmed.is_empty() {
                replay.valid_len += read as u64;
                continue;
            }
            let entry = match serde_json::from_str::<WalEntry>(trimmed) {
                Ok(entry) if entry.verify() && entry.seq > replay.last_sequence => entry,
                _ => break,
            };
            replay.last_sequence = entry.seq;
            replay.operations.push(entry.op);
            replay.valid_len += read as u64;
        }

        replay.discarded_len = total_len.saturating_sub(replay.valid_len);
        Ok(replay)
    }
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
