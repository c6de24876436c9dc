// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token generation abstractions

use crate::model::Token;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Number of characters in a generated token
pub const TOKEN_LEN: usize = 8;

/// Size of the token alphabet (a-z, A-Z, 0-9)
pub const TOKEN_ALPHABET: usize = 62;

/// Generates opaque tokens
pub trait TokenGenerator: Clone + Send + Sync + 'static {
    fn generate(&self) -> Token;
}

/// Random alphanumeric tokens for production use.
///
/// Draws from the thread-local CSPRNG. The keyspace is 62^8 (about 2^47),
/// enough for codes that live a single day, not for long-lived secrets.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> Token {
        let value: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();
        Token(value)
    }
}

/// Sequential token generator for testing
#[derive(Clone, Debug)]
pub struct SequentialTokenGenerator {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialTokenGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialTokenGenerator {
    fn default() -> Self {
        Self::new("TOKEN")
    }
}

impl TokenGenerator for SequentialTokenGenerator {
    fn generate(&self) -> Token {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Token(format!("{}{}", self.prefix, n))
    }
}
