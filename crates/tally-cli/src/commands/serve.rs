//! Server command implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tally_core::{AnalyticsConfig, Ledger, TransactionSource};
use tracing::warn;

pub async fn cmd_serve(data_dir: &Path, host: &str, port: u16, config: AnalyticsConfig) -> Result<()> {
    let ledger = Ledger::load_dir(data_dir)
        .with_context(|| format!("Failed to load accounts from {}", data_dir.display()))?;

    if ledger.is_empty() {
        warn!(dir = %data_dir.display(), "No .csv or .json transaction files found");
    }

    println!("🚀 Starting Tally web server...");
    println!("   Data: {}", data_dir.display());
    println!("   Accounts: {}", ledger.accounts().join(", "));
    println!("   Listening: http://{}:{}", host, port);
    println!();
    println!("   Press Ctrl+C to stop");

    let server_config = tally_server::ServerConfig {
        allowed_origins: vec![],
        analytics: config,
    };
    tally_server::serve(Arc::new(ledger), host, port, server_config).await?;

    Ok(())
}
