//! Result types produced by the analytics engine
//!
//! All of these are plain values recomputed on every call. Monetary amounts
//! stay exact (`Decimal`) and serialize as plain JSON numbers.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income and expense totals for one calendar month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub income: Decimal,
    pub expenses: Decimal,
    /// income - expenses
    pub net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// Aggregated spending statistics for one account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_expenses: Decimal,
    pub total_income: Decimal,
    pub net_balance: Decimal,
    /// Expense totals per category name
    pub by_category: BTreeMap<String, Decimal>,
    /// Buckets keyed by "YYYY-MM", iterated chronologically
    pub by_month: BTreeMap<String, MonthBucket>,
    pub avg_monthly_expense: Decimal,
    /// Largest expense categories, descending
    pub top_categories: Vec<CategoryTotal>,
    pub transaction_count: usize,
    pub analysis_period_days: i64,
}

/// Short-horizon income/expense forecast
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub predicted_expenses: Vec<f64>,
    pub predicted_income: Vec<f64>,
    pub predicted_net: Vec<f64>,
    /// "YYYY-MM" label for each predicted value
    pub prediction_months: Vec<String>,
    pub confidence_score: f64,
    /// Mean R² of the income and expense fits
    pub model_accuracy: f64,
    pub historical_months: usize,
    pub note: String,
}

impl ForecastResult {
    /// A result with no predictions, explained by `note`
    pub fn insufficient(historical_months: usize, note: impl Into<String>) -> Self {
        Self {
            historical_months,
            note: note.into(),
            ..Default::default()
        }
    }

    pub fn has_predictions(&self) -> bool {
        !self.prediction_months.is_empty()
    }
}

/// Kind of budget recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    CategoryAlert,
    BudgetTip,
    SavingOpportunity,
    IncomeInsight,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CategoryAlert => "category_alert",
            Self::BudgetTip => "budget_tip",
            Self::SavingOpportunity => "saving_opportunity",
            Self::IncomeInsight => "income_insight",
        }
    }
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How urgently a recommendation should be acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    /// Never negative
    pub potential_savings: Decimal,
    pub priority: Priority,
}

impl Recommendation {
    pub fn new(
        kind: RecommendationKind,
        priority: Priority,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            potential_savings: Decimal::ZERO,
            priority,
        }
    }

    pub fn with_savings(mut self, savings: Decimal) -> Self {
        self.potential_savings = savings.max(Decimal::ZERO);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub recommendations: Vec<Recommendation>,
    pub total_potential_savings: Decimal,
}

/// Severity band of a flagged transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Sort rank (lower = reported first)
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    /// Fixed z-score bands, independent of the detection threshold
    pub fn from_zscore(zscore: f64) -> Self {
        let magnitude = zscore.abs();
        if magnitude >= 3.0 {
            Self::High
        } else if magnitude >= 2.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction whose amount is unusual for its category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub transaction_id: i64,
    pub date: NaiveDateTime,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub reason: String,
    pub severity: Severity,
    pub zscore: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub anomalies: Vec<AnomalyRecord>,
    pub detection_method: String,
    /// Number flagged before truncation to the top results
    pub anomaly_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySuggestion {
    pub name: String,
    /// Fraction of the category's keywords found, in [0, 1]
    pub confidence: f64,
    pub keywords_matched: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizationResult {
    pub suggested_category: String,
    pub confidence: f64,
    pub all_categories: Vec<CategorySuggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_severity_bands() {
        assert_eq!(Severity::from_zscore(3.0), Severity::High);
        assert_eq!(Severity::from_zscore(-3.4), Severity::High);
        assert_eq!(Severity::from_zscore(2.0), Severity::Medium);
        assert_eq!(Severity::from_zscore(2.99), Severity::Medium);
        assert_eq!(Severity::from_zscore(1.5), Severity::Low);
    }

    #[test]
    fn test_severity_rank() {
        assert!(Severity::High.rank() < Severity::Medium.rank());
        assert!(Severity::Medium.rank() < Severity::Low.rank());
    }

    #[test]
    fn test_recommendation_serialization() {
        let rec = Recommendation::new(
            RecommendationKind::CategoryAlert,
            Priority::High,
            "High Spending in Food",
            "Consider reducing by 10%.",
        )
        .with_savings(dec!(12.345));

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["type"], "category_alert");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["potential_savings"], 12.345);
    }

    #[test]
    fn test_negative_savings_clamped() {
        let rec = Recommendation::new(
            RecommendationKind::BudgetTip,
            Priority::Low,
            "t",
            "d",
        )
        .with_savings(dec!(-3));
        assert_eq!(rec.potential_savings, Decimal::ZERO);
    }

    #[test]
    fn test_anomaly_report_note_omitted_when_absent() {
        let report = AnomalyReport {
            detection_method: "statistical (z-score)".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("note").is_none());
        assert_eq!(json["anomaly_count"], 0);
    }
}
