// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mg config` - show the effective configuration

use crate::output::OutputFormat;
use anyhow::Result;
use mg_core::Config;

/// Print the configuration with secrets redacted
pub fn show(config: &Config, format: OutputFormat) -> Result<()> {
    let redacted = config.redacted();
    match format {
        OutputFormat::Text => print!("{}", redacted.to_toml()?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&redacted)?),
    }
    Ok(())
}
