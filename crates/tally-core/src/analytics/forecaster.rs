//! Monthly expense/income forecasting
//!
//! Fits an ordinary least-squares line (month index -> amount) to the monthly
//! income and expense series and extrapolates it a few months ahead.
//! Predictions are clamped at zero and come with an R² based confidence.

use chrono::{Duration, NaiveDate};
use rust_decimal::prelude::ToPrimitive;

use crate::config::ForecastConfig;
use crate::models::Transaction;

use super::aggregator::group_by_month;
use super::types::ForecastResult;

pub const NOTE_SUCCESS: &str = "Based on linear trend analysis of historical data";

/// A fitted line y = intercept + slope * x over x = 0..n
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination, clamped to [0, 1]
    pub r_squared: f64,
}

impl LinearFit {
    /// Fit against the index of each value
    pub fn fit(values: &[f64]) -> Result<Self, String> {
        let n = values.len();
        if n < 2 {
            return Err(format!("need at least 2 points to fit a line, got {}", n));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err("series contains non-finite values".to_string());
        }

        let count = n as f64;
        let x_mean = (count - 1.0) / 2.0;
        let y_mean = values.iter().sum::<f64>() / count;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (i, y) in values.iter().enumerate() {
            let dx = i as f64 - x_mean;
            sxx += dx * dx;
            sxy += dx * (y - y_mean);
        }

        if sxx == 0.0 {
            return Err("singular design matrix".to_string());
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err("non-finite regression coefficients".to_string());
        }

        let mut ss_res = 0.0;
        let mut ss_tot = 0.0;
        for (i, y) in values.iter().enumerate() {
            let predicted = intercept + slope * i as f64;
            ss_res += (y - predicted).powi(2);
            ss_tot += (y - y_mean).powi(2);
        }

        // A flat series is fitted exactly by a flat line
        let tolerance = 1e-12 * count * (1.0 + y_mean * y_mean);
        let r_squared = if ss_tot <= tolerance {
            if ss_res <= tolerance {
                1.0
            } else {
                0.0
            }
        } else {
            1.0 - ss_res / ss_tot
        };

        Ok(Self {
            slope,
            intercept,
            r_squared: r_squared.clamp(0.0, 1.0),
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Forecasts monthly income and expenses from a transaction history
#[derive(Debug, Clone)]
pub struct ExpenseForecaster {
    min_transactions: usize,
    min_months: usize,
}

impl ExpenseForecaster {
    pub fn new() -> Self {
        Self::with_config(&ForecastConfig::default())
    }

    pub fn with_config(config: &ForecastConfig) -> Self {
        Self {
            min_transactions: config.min_transactions,
            min_months: config.min_months,
        }
    }

    /// Predict the next `months_ahead` months.
    ///
    /// Insufficient history and numerical failures produce an empty forecast
    /// with an explanatory note instead of an error.
    pub fn predict(&self, transactions: &[Transaction], months_ahead: u32) -> ForecastResult {
        if transactions.len() < self.min_transactions {
            return ForecastResult::insufficient(
                0,
                format!(
                    "Insufficient transaction history (need at least {} transactions)",
                    self.min_transactions
                ),
            );
        }

        let months = group_by_month(transactions);
        if months.len() < self.min_months {
            return ForecastResult::insufficient(
                months.len(),
                format!(
                    "Need at least {} months of data for prediction",
                    self.min_months
                ),
            );
        }

        let mut labels = Vec::with_capacity(months.len());
        let mut expenses = Vec::with_capacity(months.len());
        let mut income = Vec::with_capacity(months.len());
        for (key, bucket) in &months {
            labels.push(key.as_str());
            expenses.push(bucket.expenses.to_f64());
            income.push(bucket.income.to_f64());
        }

        let (Some(expenses), Some(income)) = (
            expenses.into_iter().collect::<Option<Vec<f64>>>(),
            income.into_iter().collect::<Option<Vec<f64>>>(),
        ) else {
            return failed(months.len(), "monthly total out of floating-point range");
        };

        match forecast_series(&labels, &expenses, &income, months_ahead) {
            Ok(result) => result,
            Err(reason) => failed(months.len(), &reason),
        }
    }
}

impl Default for ExpenseForecaster {
    fn default() -> Self {
        Self::new()
    }
}

fn failed(historical_months: usize, reason: &str) -> ForecastResult {
    tracing::warn!(reason, "Forecast fit failed");
    ForecastResult::insufficient(historical_months, format!("Prediction failed: {}", reason))
}

fn forecast_series(
    labels: &[&str],
    expenses: &[f64],
    income: &[f64],
    months_ahead: u32,
) -> Result<ForecastResult, String> {
    let expense_fit = LinearFit::fit(expenses)?;
    let income_fit = LinearFit::fit(income)?;

    let history = expenses.len();
    let horizon = months_ahead as usize;

    let mut predicted_expenses = Vec::with_capacity(horizon);
    let mut predicted_income = Vec::with_capacity(horizon);
    for step in 0..horizon {
        let x = (history + step) as f64;
        predicted_expenses.push(expense_fit.predict(x).max(0.0));
        predicted_income.push(income_fit.predict(x).max(0.0));
    }

    let predicted_net = predicted_income
        .iter()
        .zip(&predicted_expenses)
        .map(|(inc, exp)| inc - exp)
        .collect();

    let accuracy = (expense_fit.r_squared + income_fit.r_squared) / 2.0;
    let expense_mean = expenses.iter().sum::<f64>() / history as f64;
    let confidence = if expense_mean > 0.0 {
        accuracy.min(1.0)
    } else {
        0.5
    };

    let last = labels
        .last()
        .ok_or_else(|| "no historical months".to_string())?;

    Ok(ForecastResult {
        predicted_expenses,
        predicted_income,
        predicted_net,
        prediction_months: future_month_labels(last, months_ahead)?,
        confidence_score: confidence,
        model_accuracy: accuracy,
        historical_months: history,
        note: NOTE_SUCCESS.to_string(),
    })
}

/// Labels for upcoming months, stepping 30 days at a time from the first day
/// of `last_month`. This drifts from calendar months (e.g. "2024-01" is
/// followed by "2024-01" again, then "2024-03").
pub fn future_month_labels(last_month: &str, months_ahead: u32) -> Result<Vec<String>, String> {
    let start = NaiveDate::parse_from_str(&format!("{}-01", last_month), "%Y-%m-%d")
        .map_err(|e| format!("invalid month key {:?}: {}", last_month, e))?;

    Ok((1..=i64::from(months_ahead))
        .map(|i| (start + Duration::days(30 * i)).format("%Y-%m").to_string())
        .collect())
}
