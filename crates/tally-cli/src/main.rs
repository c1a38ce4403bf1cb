//! Tally CLI - Budget analytics for a transaction history
//!
//! Usage:
//!   tally spending --file tx.csv          Totals by category and month
//!   tally forecast --file tx.csv -m 3     Predict the next three months
//!   tally anomalies --file tx.csv         Flag unusual transactions
//!   tally categorize "Uber to airport"    Suggest a category
//!   tally serve --data ./accounts         Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let json = cli.json;

    match cli.command {
        Commands::Spending { file } => commands::cmd_spending(&file, &config, json),
        Commands::Forecast { file, months } => {
            commands::cmd_forecast(&file, &config, months, json)
        }
        Commands::Recommend { file } => commands::cmd_recommend(&file, &config, json),
        Commands::Anomalies { file, threshold } => {
            commands::cmd_anomalies(&file, &config, threshold, json)
        }
        Commands::Categorize { description } => commands::cmd_categorize(&description, json),
        Commands::Report { file } => commands::cmd_report(&file, &config, json),
        Commands::Serve { data, port, host } => {
            commands::cmd_serve(&data, &host, port, config).await
        }
    }
}
