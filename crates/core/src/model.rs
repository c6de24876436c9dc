// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Address, token, and ledger record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing an address at the boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("no email address included")]
    Empty,
    #[error("address contains whitespace: {0:?}")]
    Whitespace(String),
    #[error("address is missing a local part or domain: {0:?}")]
    Malformed(String),
}

/// An email address whose ownership is being verified
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Parse a caller-supplied address.
    ///
    /// This is a shape check only; deliverability is the transport's concern.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(AddressError::Whitespace(trimmed.to_string()));
        }
        match trimmed.rsplit_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(trimmed.to_string()))
            }
            _ => Err(AddressError::Malformed(trimmed.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque token used as a verification or access code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(pub String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Durable proof that an address completed the challenge-response flow
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerifiedEntry {
    pub address: Address,
}

/// The most recent verification token issued to an address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub address: Address,
    pub issued_at: DateTime<Utc>,
    pub token: Token,
}

impl HistoryEntry {
    pub fn new(address: Address, issued_at: DateTime<Utc>, token: Token) -> Self {
        Self {
            address,
            issued_at,
            token,
        }
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
