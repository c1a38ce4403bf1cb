//! Rule-based budget recommendations
//!
//! A fixed sequence of heuristics over an `AnalysisResult`. Every applicable
//! rule contributes one recommendation, in rule order.

use rust_decimal::Decimal;

use super::types::{AnalysisResult, Priority, Recommendation, RecommendationKind, RecommendationReport};

/// Categories above this many trigger the "consolidate" tip
const MAX_COMFORTABLE_CATEGORIES: usize = 8;

fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

fn whole_percent(fraction: Decimal) -> String {
    fraction
        .checked_mul(Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::MAX)
        .round_dp(0)
        .to_string()
}

/// Produces budget recommendations from aggregated spending
#[derive(Debug, Clone, Default)]
pub struct BudgetRecommender;

impl BudgetRecommender {
    pub fn new() -> Self {
        Self
    }

    /// Run every rule against `analysis`. Pure: same input, same output.
    pub fn recommend(&self, analysis: &AnalysisResult) -> RecommendationReport {
        if analysis.by_category.is_empty() {
            return RecommendationReport {
                recommendations: vec![Recommendation::new(
                    RecommendationKind::BudgetTip,
                    Priority::Low,
                    "Start Tracking Expenses",
                    "No expense data found. Start tracking your expenses to get personalized recommendations.",
                )],
                total_potential_savings: Decimal::ZERO,
            };
        }

        let recommendations: Vec<Recommendation> = [
            top_category_alert(analysis),
            expense_ratio(analysis),
            category_count(analysis),
            emergency_fund(analysis),
        ]
        .into_iter()
        .flatten()
        .collect();

        let total_potential_savings = recommendations.iter().fold(Decimal::ZERO, |total, r| {
            total
                .checked_add(r.potential_savings)
                .unwrap_or(Decimal::MAX)
        });

        RecommendationReport {
            recommendations,
            total_potential_savings,
        }
    }
}

/// Largest category above 30% of the average month: suggest a 10% cut
fn top_category_alert(analysis: &AnalysisResult) -> Option<Recommendation> {
    let top = analysis.top_categories.first()?;
    let avg_monthly = analysis.avg_monthly_expense;

    if top.amount <= avg_monthly * Decimal::new(3, 1) || avg_monthly.is_zero() {
        return None;
    }

    let above_average = top.amount.checked_div(avg_monthly)? - Decimal::ONE;
    Some(
        Recommendation::new(
            RecommendationKind::CategoryAlert,
            Priority::High,
            format!("High Spending in {}", top.category),
            format!(
                "${} on {} is {}% above average. Consider reducing by 10%.",
                money(top.amount),
                top.category,
                whole_percent(above_average)
            ),
        )
        .with_savings(top.amount * Decimal::new(1, 1)),
    )
}

/// Expense-to-income ratio above 90% warns, below 60% praises
fn expense_ratio(analysis: &AnalysisResult) -> Option<Recommendation> {
    if analysis.total_income <= Decimal::ZERO {
        return None;
    }

    // Income too small to divide by still means spending far above it
    let ratio = analysis
        .total_expenses
        .checked_div(analysis.total_income)
        .unwrap_or(Decimal::MAX);
    if ratio > Decimal::new(9, 1) {
        Some(
            Recommendation::new(
                RecommendationKind::BudgetTip,
                Priority::High,
                "High Expense-to-Income Ratio",
                format!(
                    "You spend {}% of your income. Try to keep it below 80%.",
                    whole_percent(ratio)
                ),
            )
            .with_savings(analysis.total_expenses * Decimal::new(1, 1)),
        )
    } else if ratio < Decimal::new(6, 1) {
        Some(Recommendation::new(
            RecommendationKind::IncomeInsight,
            Priority::Low,
            "Great Savings Rate!",
            format!(
                "You save {}% of your income. Keep it up!",
                whole_percent(Decimal::ONE - ratio)
            ),
        ))
    } else {
        None
    }
}

/// One category is too coarse, more than eight too fragmented
fn category_count(analysis: &AnalysisResult) -> Option<Recommendation> {
    let count = analysis.by_category.len();
    if count == 1 {
        Some(Recommendation::new(
            RecommendationKind::BudgetTip,
            Priority::Medium,
            "Diversify Your Spending",
            "All expenses are in one category. Consider categorizing transactions more granularly for better insights.",
        ))
    } else if count > MAX_COMFORTABLE_CATEGORIES {
        Some(Recommendation::new(
            RecommendationKind::BudgetTip,
            Priority::Low,
            "Consolidate Categories",
            format!(
                "You have {} expense categories. Consider grouping related ones for clearer analysis.",
                count
            ),
        ))
    } else {
        None
    }
}

/// Three months of (implied) monthly income
fn emergency_fund(analysis: &AnalysisResult) -> Option<Recommendation> {
    if analysis.total_income <= Decimal::ZERO {
        return None;
    }

    // Short histories count as one month
    let months = (Decimal::from(analysis.analysis_period_days) / Decimal::from(30)).max(Decimal::ONE);
    let target = (analysis.total_income / months)
        .checked_mul(Decimal::from(3))
        .unwrap_or(Decimal::MAX);

    Some(Recommendation::new(
        RecommendationKind::SavingOpportunity,
        Priority::Medium,
        format!("Build Emergency Fund (${})", money(target)),
        format!(
            "Aim to save 3 months of income (${}). Start with 5-10% of monthly income.",
            money(target)
        ),
    ))
}
