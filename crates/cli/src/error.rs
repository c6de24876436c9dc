// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Input validation and error-to-exit-code mapping

use crate::output::ErrorReport;
use mg_core::{Address, AddressError, Rejection, Token};
use mg_engine::DispatchError;
use thiserror::Error;

/// Malformed command-line input, rejected before dispatch
#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid address: {0}")]
    Address(#[from] AddressError),
    #[error("token must not be empty")]
    EmptyToken,
    #[error("token must not contain whitespace")]
    TokenWhitespace,
}

pub fn parse_address(input: &str) -> Result<Address, InputError> {
    Ok(Address::parse(input)?)
}

pub fn parse_token(input: &str) -> Result<Token, InputError> {
    let token = input.trim();
    if token.is_empty() {
        return Err(InputError::EmptyToken);
    }
    if token.chars().any(char::is_whitespace) {
        return Err(InputError::TokenWhitespace);
    }
    Ok(Token::new(token))
}

fn rejection(err: &anyhow::Error) -> Option<Rejection> {
    err.downcast_ref::<DispatchError>()
        .and_then(DispatchError::rejection)
}

/// Process exit code for a failed command
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(rejection) = rejection(err) {
        return match rejection {
            Rejection::RateExceeded => 3,
            Rejection::LinkInvalid => 4,
            Rejection::NotVerified => 5,
        };
    }
    if err.downcast_ref::<InputError>().is_some() {
        return 2;
    }
    1
}

/// Machine-readable description of a failed command
pub fn error_report(err: &anyhow::Error) -> ErrorReport {
    let (status, error) = match rejection(err) {
        Some(r) => (r.status_code(), r.name().to_string()),
        None if err.downcast_ref::<InputError>().is_some() => (400, "bad_request".to_string()),
        None => (500, "internal".to_string()),
    };
    ErrorReport {
        status,
        error,
        message: format!("{:#}", err),
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
