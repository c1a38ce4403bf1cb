//! Shared command utilities
//!
//! This module contains:
//! - `load_config` - Resolve the analytics config
//! - `load_transactions` - Read a transaction file
//! - `print_json` - Verbatim JSON output

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tally_core::{load_file, AnalyticsConfig, Transaction};

/// Load the analytics config (explicit path, data-dir override, built-in)
pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    AnalyticsConfig::load(path).context("Failed to load analytics config")
}

/// Load a transaction file (.csv or .json)
pub fn load_transactions(file: &Path) -> Result<Vec<Transaction>> {
    let transactions = load_file(file)
        .with_context(|| format!("Failed to load transactions from {}", file.display()))?;
    tracing::debug!(
        file = %file.display(),
        count = transactions.len(),
        "Loaded transactions"
    );
    Ok(transactions)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
