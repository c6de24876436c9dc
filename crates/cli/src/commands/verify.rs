// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mg request|confirm|check|token|uninstall` - verification commands

use crate::error::{parse_address, parse_token};
use crate::output::Report;
use anyhow::Result;
use clap::Args;
use mg_core::{Command, Outcome};
use mg_engine::AppDispatcher;

#[derive(Args)]
pub struct AddressArgs {
    /// Email address
    pub address: String,
}

#[derive(Args)]
pub struct TokenArgs {
    /// Token from the confirmation email
    pub token: String,
}

/// Send a confirmation token to an address
pub async fn request(dispatcher: &AppDispatcher, args: AddressArgs) -> Result<Report> {
    let address = parse_address(&args.address)?;
    dispatcher
        .dispatch(Command::RequestVerification {
            address: address.clone(),
        })
        .await?;
    Ok(Report::sent(address, "confirmation"))
}

/// Verify the address a token was issued to
pub async fn confirm(dispatcher: &AppDispatcher, args: TokenArgs) -> Result<Report> {
    let token = parse_token(&args.token)?;
    dispatcher
        .dispatch(Command::ConfirmVerification { token })
        .await?;
    Ok(Report::verified())
}

pub async fn check(dispatcher: &AppDispatcher, args: AddressArgs) -> Result<Report> {
    let address = parse_address(&args.address)?;
    let outcome = dispatcher
        .dispatch(Command::CheckVerification {
            address: address.clone(),
        })
        .await?;
    let confirmed = matches!(outcome, Outcome::Verified(true));
    Ok(Report::confirmed(address, confirmed))
}

/// Send an access token to a verified address
pub async fn token(dispatcher: &AppDispatcher, args: AddressArgs) -> Result<Report> {
    let address = parse_address(&args.address)?;
    let outcome = dispatcher
        .dispatch(Command::IssueAccessToken {
            address: address.clone(),
        })
        .await?;
    match outcome {
        Outcome::AccessToken(token) => Ok(Report::access_token(address, token)),
        other => anyhow::bail!("unexpected outcome: {:?}", other),
    }
}

pub async fn uninstall(dispatcher: &AppDispatcher, args: AddressArgs) -> Result<Report> {
    let address = parse_address(&args.address)?;
    dispatcher
        .dispatch(Command::SendUninstallNotice {
            address: address.clone(),
        })
        .await?;
    Ok(Report::sent(address, "uninstall notice"))
}
