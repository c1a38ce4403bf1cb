//! Tally Core Library
//!
//! Budget analytics for the Tally personal finance tracker:
//! - Spending aggregation by category and month
//! - Linear-trend income/expense forecasting
//! - Rule-based budget recommendations
//! - Per-category z-score anomaly detection
//! - Keyword-based transaction categorization
//! - Transaction sources and CSV/JSON import

pub mod analytics;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod source;

/// Shared transaction fixtures
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analytics::{
    AnalysisResult, AnomalyReport, BudgetEngine, CategorizationResult, ForecastResult,
    RecommendationReport, TransactionCategorizer,
};
pub use config::AnalyticsConfig;
pub use error::{Error, Result};
pub use import::{load_file, parse_csv, parse_json, FileFormat};
pub use models::{Transaction, TransactionType, UNCATEGORIZED};
pub use source::{Ledger, TransactionSource};
