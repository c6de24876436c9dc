// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Commands accepted by the dispatcher, their outcomes, and rejections

use crate::model::{Address, Token};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A request to change or inspect verification state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Issue a verification token to an address
    RequestVerification { address: Address },
    /// Redeem a verification token
    ConfirmVerification { token: Token },
    /// Report whether an address is verified
    CheckVerification { address: Address },
    /// Send a one-time access token to a verified address
    IssueAccessToken { address: Address },
    /// Tell a verified address the client was uninstalled
    SendUninstallNotice { address: Address },
    /// Greet a newly verified address
    SendWelcome { address: Address },
}

/// Discriminant of a [`Command`], used for routing and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    RequestVerification,
    ConfirmVerification,
    CheckVerification,
    IssueAccessToken,
    SendUninstallNotice,
    SendWelcome,
}

impl CommandKind {
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::RequestVerification => "request_verification",
            CommandKind::ConfirmVerification => "confirm_verification",
            CommandKind::CheckVerification => "check_verification",
            CommandKind::IssueAccessToken => "issue_access_token",
            CommandKind::SendUninstallNotice => "send_uninstall_notice",
            CommandKind::SendWelcome => "send_welcome",
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::RequestVerification { .. } => CommandKind::RequestVerification,
            Command::ConfirmVerification { .. } => CommandKind::ConfirmVerification,
            Command::CheckVerification { .. } => CommandKind::CheckVerification,
            Command::IssueAccessToken { .. } => CommandKind::IssueAccessToken,
            Command::SendUninstallNotice { .. } => CommandKind::SendUninstallNotice,
            Command::SendWelcome { .. } => CommandKind::SendWelcome,
        }
    }

    /// The address the command targets, if it names one directly
    pub fn address(&self) -> Option<&Address> {
        match self {
            Command::RequestVerification { address }
            | Command::CheckVerification { address }
            | Command::IssueAccessToken { address }
            | Command::SendUninstallNotice { address }
            | Command::SendWelcome { address } => Some(address),
            Command::ConfirmVerification { .. } => None,
        }
    }
}

/// Successful result of handling a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    /// The command ran for its side effects
    Done,
    /// Verification status of the queried address
    Verified(bool),
    /// Access token that was sent to the address
    AccessToken(Token),
}

/// Expected, caller-recoverable refusals.
///
/// Each kind maps to its own status so the boundary can tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Address already verified, or already issued a token today
    #[error("too many confirmation emails have been sent to this address, try again later")]
    RateExceeded,
    /// Token unknown, superseded, or issued on an earlier day
    #[error("confirmation token does not exist or has expired")]
    LinkInvalid,
    /// Address has not completed verification
    #[error("the given email has to be verified before being used")]
    NotVerified,
}

impl Rejection {
    /// HTTP status the boundary layer reports for this rejection
    pub fn status_code(&self) -> u16 {
        match self {
            Rejection::RateExceeded => 429,
            Rejection::LinkInvalid => 404,
            Rejection::NotVerified => 403,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rejection::RateExceeded => "rate_exceeded",
            Rejection::LinkInvalid => "link_invalid",
            Rejection::NotVerified => "not_verified",
        }
    }
}
