// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mg - Mailgate email verification CLI

mod commands;
mod error;
mod logging;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::verify::{AddressArgs, TokenArgs};
use mg_core::Config;
use output::{OutputFormat, Report};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "mg", version, about = "Mailgate - email address verification")]
struct Cli {
    /// Configuration file (default: $MAILGATE_CONFIG, else built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Email a confirmation token to an address
    Request(AddressArgs),
    /// Confirm an address with the token it received
    Confirm(TokenArgs),
    /// Report whether an address is verified
    Check(AddressArgs),
    /// Email an access token to a verified address
    Token(AddressArgs),
    /// Email an uninstallation notice to a verified address
    Uninstall(AddressArgs),
    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = cli.format;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match format {
                OutputFormat::Text => eprintln!("error: {:#}", e),
                OutputFormat::Json => output::print_json(&error::error_report(&e)),
            }
            ExitCode::from(error::exit_code(&e))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.config.as_deref(), |key| std::env::var(key).ok())
        .context("failed to load configuration")?;
    let _log_guard = logging::setup_logging(&config).context("failed to set up logging")?;
    tracing::debug!(store = %config.store.path.display(), "configuration loaded");

    if let Commands::Config = cli.command {
        return commands::config::show(&config, cli.format);
    }

    // Opening the ledger may wait on another process's lock
    let dispatcher = {
        let config = config.clone();
        tokio::task::spawn_blocking(move || mg_engine::bootstrap(&config))
            .await
            .context("bootstrap task failed")??
    };
    let report: Report = match cli.command {
        Commands::Request(args) => commands::verify::request(&dispatcher, args).await?,
        Commands::Confirm(args) => commands::verify::confirm(&dispatcher, args).await?,
        Commands::Check(args) => commands::verify::check(&dispatcher, args).await?,
        Commands::Token(args) => commands::verify::token(&dispatcher, args).await?,
        Commands::Uninstall(args) => commands::verify::uninstall(&dispatcher, args).await?,
        Commands::Config => return Ok(()),
    };

    output::print(&report, cli.format);
    Ok(())
}
