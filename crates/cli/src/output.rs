// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use mg_core::{Address, Token};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => print_json(value),
    }
}

/// Result of a verification command, shaped like the HTTP responses
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Sent {
        status: u16,
        address: Address,
        sent: &'static str,
    },
    Verified {
        status: u16,
        verified: bool,
    },
    Confirmed {
        status: u16,
        address: Address,
        confirmed: bool,
    },
    AccessToken {
        status: u16,
        address: Address,
        result: Token,
    },
}

impl Report {
    pub fn sent(address: Address, sent: &'static str) -> Self {
        Report::Sent {
            status: 201,
            address,
            sent,
        }
    }

    pub fn verified() -> Self {
        Report::Verified {
            status: 201,
            verified: true,
        }
    }

    pub fn confirmed(address: Address, confirmed: bool) -> Self {
        Report::Confirmed {
            status: 200,
            address,
            confirmed,
        }
    }

    pub fn access_token(address: Address, result: Token) -> Self {
        Report::AccessToken {
            status: 201,
            address,
            result,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Sent { address, sent, .. } => write!(f, "Sent {} to {}", sent, address),
            Report::Verified { .. } => write!(f, "Address verified"),
            Report::Confirmed {
                address, confirmed, ..
            } => {
                let state = if *confirmed { "verified" } else { "not verified" };
                write!(f, "{}: {}", address, state)
            }
            Report::AccessToken { result, .. } => write!(f, "{}", result),
        }
    }
}

/// Failure report for `--format json`
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub status: u16,
    pub error: String,
    pub message: String,
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) {
    if let Ok(json) = serde_json::to_string_pretty(value) {
        println!("{}", json);
    }
}
