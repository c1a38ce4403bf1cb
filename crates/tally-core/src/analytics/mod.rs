//! Budget Analytics Engine
//!
//! Turns a transaction snapshot into structured results. Every operation is a
//! pure function of its input; nothing is cached between calls.
//!
//! ## Operations
//!
//! - **Aggregator** - totals by category and calendar month
//! - **Forecaster** - linear-trend projection of monthly income and expenses
//! - **Recommender** - rule-based budget tips from the aggregate
//! - **Anomaly Detector** - per-category z-score outliers
//! - **Categorizer** - keyword-based category suggestion for a description
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::analytics::BudgetEngine;
//!
//! let snapshot = source.snapshot("household")?;
//! let engine = BudgetEngine::new(&snapshot, &config);
//! let forecast = engine.predict_monthly_expenses(3)?;
//! ```

pub mod aggregator;
pub mod anomaly;
pub mod categorizer;
pub mod engine;
pub mod forecaster;
pub mod recommender;
pub mod types;

pub use aggregator::{group_by_month, SpendingAggregator};
pub use anomaly::AnomalyDetector;
pub use categorizer::TransactionCategorizer;
pub use engine::BudgetEngine;
pub use forecaster::{ExpenseForecaster, LinearFit};
pub use recommender::BudgetRecommender;
pub use types::{
    AnalysisResult, AnomalyRecord, AnomalyReport, CategorizationResult, CategorySuggestion,
    CategoryTotal, ForecastResult, MonthBucket, Priority, Recommendation, RecommendationKind,
    RecommendationReport, Severity,
};
