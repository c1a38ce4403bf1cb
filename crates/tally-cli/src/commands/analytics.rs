//! Analytics command implementations
//!
//! Each command loads a transaction file, runs one engine operation and prints
//! either a summary table or the verbatim JSON result.

use std::path::Path;

use anyhow::Result;
use chrono::Timelike;
use rust_decimal::Decimal;
use tally_core::analytics::{AnomalyRecord, Priority};
use tally_core::{
    AnalysisResult, AnalyticsConfig, AnomalyReport, BudgetEngine, CategorizationResult,
    ForecastResult, RecommendationReport, TransactionCategorizer,
};

use super::{load_transactions, print_json, truncate};

const RULE: &str = "   ─────────────────────────────────────────────────────────────";

pub fn cmd_spending(file: &Path, config: &AnalyticsConfig, json: bool) -> Result<()> {
    let transactions = load_transactions(file)?;
    let analysis = BudgetEngine::new(&transactions, config).analyze_spending();

    if json {
        return print_json(&analysis);
    }
    print_spending(&analysis);
    Ok(())
}

pub fn cmd_forecast(
    file: &Path,
    config: &AnalyticsConfig,
    months: Option<u32>,
    json: bool,
) -> Result<()> {
    let transactions = load_transactions(file)?;
    let months = months.unwrap_or(config.forecast.default_months_ahead);
    let forecast = BudgetEngine::new(&transactions, config).predict_monthly_expenses(months)?;

    if json {
        return print_json(&forecast);
    }
    print_forecast(&forecast);
    Ok(())
}

pub fn cmd_recommend(file: &Path, config: &AnalyticsConfig, json: bool) -> Result<()> {
    let transactions = load_transactions(file)?;
    let report = BudgetEngine::new(&transactions, config).get_budget_recommendations();

    if json {
        return print_json(&report);
    }
    print_recommendations(&report);
    Ok(())
}

pub fn cmd_anomalies(
    file: &Path,
    config: &AnalyticsConfig,
    threshold: Option<f64>,
    json: bool,
) -> Result<()> {
    let transactions = load_transactions(file)?;
    let threshold = threshold.unwrap_or(config.anomalies.default_threshold);
    let report = BudgetEngine::new(&transactions, config).detect_anomalies(threshold)?;

    if json {
        return print_json(&report);
    }
    print_anomalies(&report, threshold);
    Ok(())
}

pub fn cmd_categorize(description: &str, json: bool) -> Result<()> {
    let categorizer = TransactionCategorizer::new();
    let result = categorizer.categorize(description);

    if json {
        return print_json(&result);
    }
    print_categorization(description, &result);
    println!();
    println!(
        "   Known categories: {}",
        categorizer.categories().collect::<Vec<_>>().join(", ")
    );
    Ok(())
}

pub fn print_spending(analysis: &AnalysisResult) {
    println!();
    println!("📊 Spending Summary");
    println!(
        "   {} transactions over {} days",
        analysis.transaction_count, analysis.analysis_period_days
    );
    println!("{}", RULE);

    if analysis.transaction_count == 0 {
        println!("   No transactions found.");
        return;
    }

    println!("   Income:        ${:>12.2}", analysis.total_income);
    println!("   Expenses:      ${:>12.2}", analysis.total_expenses);
    println!("   Net:           ${:>12.2}", analysis.net_balance);
    println!("   Avg / month:   ${:>12.2}", analysis.avg_monthly_expense);

    if !analysis.top_categories.is_empty() {
        println!();
        println!("   {:25} │ {:>10} │ {:>6}", "Top Category", "Amount", "%");
        println!("   ──────────────────────────┼────────────┼────────");
        for top in &analysis.top_categories {
            let share = if analysis.total_expenses.is_zero() {
                Decimal::ZERO
            } else {
                (top.amount / analysis.total_expenses * Decimal::ONE_HUNDRED).round_dp(1)
            };
            println!(
                "   {:25} │ {:>10.2} │ {:>5.1}%",
                truncate(&top.category, 25),
                top.amount,
                share
            );
        }
    }

    println!();
    println!(
        "   {:8} │ {:>10} │ {:>10} │ {:>10}",
        "Month", "Income", "Expenses", "Net"
    );
    println!("   ─────────┼────────────┼────────────┼────────────");
    for (month, bucket) in &analysis.by_month {
        println!(
            "   {:8} │ {:>10.2} │ {:>10.2} │ {:>10.2}",
            month, bucket.income, bucket.expenses, bucket.net
        );
    }
}

pub fn print_forecast(forecast: &ForecastResult) {
    println!();
    println!(
        "📈 Forecast ({} months of history)",
        forecast.historical_months
    );
    println!("{}", RULE);

    if !forecast.has_predictions() {
        println!("   {}", forecast.note);
        return;
    }

    println!(
        "   {:8} │ {:>10} │ {:>10} │ {:>10}",
        "Month", "Income", "Expenses", "Net"
    );
    println!("   ─────────┼────────────┼────────────┼────────────");
    for (i, month) in forecast.prediction_months.iter().enumerate() {
        println!(
            "   {:8} │ {:>10.2} │ {:>10.2} │ {:>10.2}",
            month,
            forecast.predicted_income[i],
            forecast.predicted_expenses[i],
            forecast.predicted_net[i]
        );
    }
    println!();
    println!(
        "   Confidence: {:.0}%   (model R² {:.2})",
        forecast.confidence_score * 100.0,
        forecast.model_accuracy
    );
    println!("   {}", forecast.note);
}

pub fn print_recommendations(report: &RecommendationReport) {
    println!();
    println!("💡 Budget Recommendations");
    println!("{}", RULE);

    for rec in &report.recommendations {
        let marker = match rec.priority {
            Priority::High => "🔴",
            Priority::Medium => "🟡",
            Priority::Low => "🟢",
        };
        println!("   {} {} ({})", marker, rec.title, rec.kind);
        println!("      {}", rec.description);
        if !rec.potential_savings.is_zero() {
            println!("      Potential savings: ${:.2}", rec.potential_savings);
        }
    }

    if !report.total_potential_savings.is_zero() {
        println!();
        println!(
            "   Total potential savings: ${:.2}",
            report.total_potential_savings
        );
    }
}

pub fn print_anomalies(report: &AnomalyReport, threshold: f64) {
    println!();
    println!("🔍 Anomalies (threshold {:.1}σ)", threshold);
    println!("{}", RULE);

    if let Some(note) = &report.note {
        println!("   {}", note);
        return;
    }
    if report.anomalies.is_empty() {
        println!("   Nothing unusual found.");
        return;
    }

    println!(
        "   {} flagged, showing {}",
        report.anomaly_count,
        report.anomalies.len()
    );
    println!();
    println!(
        "   {:16} │ {:>10} │ {:18} │ {:6} │ {:>5} │ {:20}",
        "Date", "Amount", "Category", "Level", "z", "Description"
    );
    println!(
        "   ─────────────────┼────────────┼────────────────────┼────────┼───────┼──────────────────────"
    );
    for anomaly in &report.anomalies {
        println!(
            "   {:16} │ {:>10.2} │ {:18} │ {:6} │ {:>5.2} │ {:20}",
            format_date(anomaly),
            anomaly.amount,
            truncate(&anomaly.category, 18),
            anomaly.severity.as_str(),
            anomaly.zscore,
            truncate(&anomaly.description, 20)
        );
    }
}

fn format_date(anomaly: &AnomalyRecord) -> String {
    if anomaly.date.num_seconds_from_midnight() == 0 {
        anomaly.date.format("%Y-%m-%d").to_string()
    } else {
        anomaly.date.format("%Y-%m-%d %H:%M").to_string()
    }
}

pub fn print_categorization(description: &str, result: &CategorizationResult) {
    println!();
    println!("🏷️  \"{}\"", description);
    println!(
        "   Suggested: {} ({:.1}% confidence)",
        result.suggested_category,
        result.confidence * 100.0
    );
    println!();
    println!("   {:16} │ {:>10} │ Keywords", "Category", "Confidence");
    println!("   ─────────────────┼────────────┼──────────────────────");
    for suggestion in &result.all_categories {
        println!(
            "   {:16} │ {:>9.1}% │ {}",
            suggestion.name,
            suggestion.confidence * 100.0,
            suggestion.keywords_matched.join(", ")
        );
    }
}
