//! Budget engine - the five analytics operations over one snapshot

use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::error::{Error, Result};
use crate::models::Transaction;

use super::aggregator::SpendingAggregator;
use super::anomaly::AnomalyDetector;
use super::categorizer::TransactionCategorizer;
use super::forecaster::{ExpenseForecaster, NOTE_SUCCESS};
use super::recommender::BudgetRecommender;
use super::types::{
    AnalysisResult, AnomalyReport, CategorizationResult, ForecastResult, RecommendationReport,
};

/// Analytics over a point-in-time transaction snapshot.
///
/// Holds no state beyond the borrowed snapshot and config; every call
/// recomputes from scratch.
#[derive(Debug, Clone, Copy)]
pub struct BudgetEngine<'a> {
    transactions: &'a [Transaction],
    config: &'a AnalyticsConfig,
}

impl<'a> BudgetEngine<'a> {
    pub fn new(transactions: &'a [Transaction], config: &'a AnalyticsConfig) -> Self {
        Self {
            transactions,
            config,
        }
    }

    pub fn analyze_spending(&self) -> AnalysisResult {
        debug!(
            operation = "analyze_spending",
            transactions = self.transactions.len()
        );
        SpendingAggregator::with_top_categories(self.config.spending.top_categories)
            .analyze(self.transactions)
    }

    /// Forecast `months_ahead` months (0 yields empty prediction arrays)
    pub fn predict_monthly_expenses(&self, months_ahead: u32) -> Result<ForecastResult> {
        let max = self.config.forecast.max_months_ahead;
        if months_ahead > max {
            return Err(Error::InvalidData(format!(
                "months_ahead must be at most {}, got {}",
                max, months_ahead
            )));
        }

        debug!(
            operation = "predict_monthly_expenses",
            transactions = self.transactions.len(),
            months_ahead
        );

        let result = ExpenseForecaster::with_config(&self.config.forecast)
            .predict(self.transactions, months_ahead);
        if result.note != NOTE_SUCCESS {
            debug!(note = %result.note, "Forecast degraded");
        }
        Ok(result)
    }

    pub fn get_budget_recommendations(&self) -> RecommendationReport {
        debug!(
            operation = "get_budget_recommendations",
            transactions = self.transactions.len()
        );
        BudgetRecommender::new().recommend(&self.analyze_spending())
    }

    /// Flag amounts at least `threshold` standard deviations from their
    /// category mean
    pub fn detect_anomalies(&self, threshold: f64) -> Result<AnomalyReport> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(Error::InvalidData(format!(
                "threshold must be a positive number, got {}",
                threshold
            )));
        }

        debug!(
            operation = "detect_anomalies",
            transactions = self.transactions.len(),
            threshold
        );

        let report = AnomalyDetector::with_config(&self.config.anomalies)
            .detect(self.transactions, threshold);
        if let Some(note) = &report.note {
            debug!(note = %note, "Anomaly detection degraded");
        }
        Ok(report)
    }

    /// Independent of the snapshot; see `TransactionCategorizer`
    pub fn categorize_transaction(&self, description: &str) -> CategorizationResult {
        debug!(operation = "categorize_transaction", length = description.len());
        TransactionCategorizer::new().categorize(description)
    }
}
