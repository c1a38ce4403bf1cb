//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Budget analytics for your transaction history
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Spending analysis, forecasts and anomaly detection", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Analytics config file (defaults to the data-dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the raw JSON result instead of a summary
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Totals by category and month
    Spending {
        /// Transaction file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Predict upcoming monthly income and expenses
    Forecast {
        /// Transaction file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Months to predict (defaults to the configured horizon)
        #[arg(short, long)]
        months: Option<u32>,
    },

    /// Budget recommendations
    Recommend {
        /// Transaction file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Flag unusual transactions
    Anomalies {
        /// Transaction file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Standard deviations from the category mean (defaults to config)
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Suggest a category for a transaction description
    Categorize {
        /// Free-text description, e.g. "Starbucks coffee downtown"
        description: String,
    },

    /// Spending, forecast, recommendations and anomalies in one report
    Report {
        /// Transaction file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Start the web server
    Serve {
        /// Directory of transaction files, one account per file
        #[arg(short, long)]
        data: PathBuf,

        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}
