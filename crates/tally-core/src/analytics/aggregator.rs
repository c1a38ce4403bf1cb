//! Spending aggregation
//!
//! Groups a transaction history by category and by calendar month. All sums
//! are exact decimals; nothing is rounded here. Sums saturate at
//! `Decimal::MAX` instead of overflowing.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::models::Transaction;

use super::types::{AnalysisResult, CategoryTotal, MonthBucket};

/// Add `amount` to `total`, saturating at `Decimal::MAX`
pub(crate) fn accumulate(total: &mut Decimal, amount: Decimal) {
    *total = total.checked_add(amount).unwrap_or(Decimal::MAX);
}

/// Running per-category totals that remember first-encounter order
#[derive(Debug, Default)]
struct CategoryTotals {
    totals: Vec<CategoryTotal>,
    index: HashMap<String, usize>,
}

impl CategoryTotals {
    fn add(&mut self, category: &str, amount: Decimal) {
        match self.index.get(category) {
            Some(&i) => accumulate(&mut self.totals[i].amount, amount),
            None => {
                self.index.insert(category.to_string(), self.totals.len());
                self.totals.push(CategoryTotal {
                    category: category.to_string(),
                    amount,
                });
            }
        }
    }

    /// Up to `n` categories by descending amount; ties keep encounter order
    fn top(&self, n: usize) -> Vec<CategoryTotal> {
        let mut ranked = self.totals.clone();
        ranked.sort_by(|a, b| b.amount.cmp(&a.amount));
        ranked.truncate(n);
        ranked
    }

    fn into_map(self) -> BTreeMap<String, Decimal> {
        self.totals
            .into_iter()
            .map(|t| (t.category, t.amount))
            .collect()
    }
}

/// Bucket transactions by "YYYY-MM"; the map iterates chronologically
pub fn group_by_month(transactions: &[Transaction]) -> BTreeMap<String, MonthBucket> {
    let mut months: BTreeMap<String, MonthBucket> = BTreeMap::new();

    for tx in transactions {
        let bucket = months.entry(tx.month_key()).or_default();
        if tx.is_income() {
            accumulate(&mut bucket.income, tx.amount);
        } else {
            accumulate(&mut bucket.expenses, tx.amount);
        }
    }

    for bucket in months.values_mut() {
        bucket.net = bucket.income - bucket.expenses;
    }

    months
}

/// Turns a transaction list into an `AnalysisResult`
#[derive(Debug, Clone)]
pub struct SpendingAggregator {
    top_categories: usize,
}

impl SpendingAggregator {
    pub fn new() -> Self {
        Self { top_categories: 5 }
    }

    pub fn with_top_categories(top_categories: usize) -> Self {
        Self { top_categories }
    }

    /// Aggregate the whole history. Never fails; empty input gives a zeroed result.
    pub fn analyze(&self, transactions: &[Transaction]) -> AnalysisResult {
        if transactions.is_empty() {
            return AnalysisResult::default();
        }

        let mut total_expenses = Decimal::ZERO;
        let mut total_income = Decimal::ZERO;
        let mut categories = CategoryTotals::default();

        for tx in transactions {
            if tx.is_income() {
                accumulate(&mut total_income, tx.amount);
            } else {
                accumulate(&mut total_expenses, tx.amount);
                categories.add(tx.category_name(), tx.amount);
            }
        }

        if total_income == Decimal::MAX || total_expenses == Decimal::MAX {
            tracing::warn!("Transaction totals saturated at the decimal maximum");
        }

        let by_month = group_by_month(transactions);
        let avg_monthly_expense = if by_month.is_empty() {
            Decimal::ZERO
        } else {
            total_expenses / Decimal::from(by_month.len())
        };

        let top_categories = categories.top(self.top_categories);

        AnalysisResult {
            total_expenses,
            total_income,
            net_balance: total_income - total_expenses,
            by_category: categories.into_map(),
            by_month,
            avg_monthly_expense,
            top_categories,
            transaction_count: transactions.len(),
            analysis_period_days: analysis_period_days(transactions),
        }
    }
}

impl Default for SpendingAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole days between the oldest and newest transaction
fn analysis_period_days(transactions: &[Transaction]) -> i64 {
    let oldest = transactions.iter().map(|t| t.date).min();
    let newest = transactions.iter().map(|t| t.date).max();

    match (oldest, newest) {
        (Some(oldest), Some(newest)) => (newest - oldest).num_days(),
        _ => 0,
    }
}
