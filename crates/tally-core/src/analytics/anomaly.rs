//! Per-category z-score anomaly detection
//!
//! Transactions are partitioned by category name. Inside every category with
//! enough members the population mean and standard deviation of the amounts
//! are computed, and any transaction at least `threshold` deviations away is
//! flagged. Severity bands are fixed (2 and 3 deviations) and do not move with
//! the threshold, so thresholds below 2.0 produce "low" flags.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::config::AnomalyConfig;
use crate::models::Transaction;

use super::types::{AnomalyRecord, AnomalyReport, Severity};

pub const DETECTION_METHOD: &str = "statistical (z-score)";
const DETECTION_METHOD_SHORT: &str = "statistical";

/// Flags statistically unusual amounts within each category
#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    max_results: usize,
    min_transactions: usize,
    min_group_size: usize,
}

impl AnomalyDetector {
    pub fn new() -> Self {
        Self::with_config(&AnomalyConfig::default())
    }

    pub fn with_config(config: &AnomalyConfig) -> Self {
        Self {
            max_results: config.max_results,
            min_transactions: config.min_transactions,
            min_group_size: config.min_group_size,
        }
    }

    /// Detect anomalies at `threshold` standard deviations.
    ///
    /// `threshold` is expected to be positive and finite; callers validate it.
    pub fn detect(&self, transactions: &[Transaction], threshold: f64) -> AnomalyReport {
        if transactions.len() < self.min_transactions {
            return AnomalyReport {
                anomalies: Vec::new(),
                detection_method: DETECTION_METHOD_SHORT.to_string(),
                anomaly_count: 0,
                note: Some(format!(
                    "Need at least {} transactions to detect anomalies",
                    self.min_transactions
                )),
            };
        }

        let mut anomalies = Vec::new();
        for (category, members) in partition_by_category(transactions) {
            if members.len() < self.min_group_size {
                continue;
            }
            anomalies.extend(flag_group(category, &members, threshold));
        }

        anomalies.sort_by(|a, b| {
            a.severity
                .rank()
                .cmp(&b.severity.rank())
                .then_with(|| b.zscore.abs().total_cmp(&a.zscore.abs()))
        });

        let anomaly_count = anomalies.len();
        anomalies.truncate(self.max_results);

        tracing::debug!(
            threshold,
            flagged = anomaly_count,
            reported = anomalies.len(),
            "Anomaly detection complete"
        );

        AnomalyReport {
            anomalies,
            detection_method: DETECTION_METHOD.to_string(),
            anomaly_count,
            note: None,
        }
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Group transactions by category name, keeping first-encounter order
fn partition_by_category(transactions: &[Transaction]) -> Vec<(&str, Vec<&Transaction>)> {
    let mut groups: Vec<(&str, Vec<&Transaction>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for tx in transactions {
        let name = tx.category_name();
        match index.get(name) {
            Some(&i) => groups[i].1.push(tx),
            None => {
                index.insert(name, groups.len());
                groups.push((name, vec![tx]));
            }
        }
    }

    groups
}

fn flag_group(category: &str, members: &[&Transaction], threshold: f64) -> Vec<AnomalyRecord> {
    // Mean and deviations stay exact so a constant group has exactly zero spread
    let Some(total) = members
        .iter()
        .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(t.amount))
    else {
        tracing::warn!(category, "Category total out of range, skipping");
        return Vec::new();
    };
    let mean = total / Decimal::from(members.len());

    let deviations: Vec<f64> = members
        .iter()
        .map(|t| (t.amount - mean).to_f64().unwrap_or(0.0))
        .collect();

    let count = deviations.len() as f64;
    let variance = deviations.iter().map(|d| d.powi(2)).sum::<f64>() / count;
    let std_dev = variance.sqrt();

    if std_dev == 0.0 || !std_dev.is_finite() {
        return Vec::new();
    }

    members
        .iter()
        .zip(&deviations)
        .filter_map(|(tx, deviation)| {
            let zscore = deviation / std_dev;
            if zscore.abs() < threshold {
                return None;
            }

            Some(AnomalyRecord {
                transaction_id: tx.id,
                date: tx.date,
                amount: tx.amount,
                category: category.to_string(),
                description: tx.description.clone(),
                reason: format!(
                    "Amount ${:.2} is {:.1}x standard deviations from average (${:.2}) in {}",
                    tx.amount.round_dp(2),
                    zscore.abs(),
                    mean.round_dp(2),
                    category
                ),
                severity: Severity::from_zscore(zscore),
                zscore,
            })
        })
        .collect()
}
