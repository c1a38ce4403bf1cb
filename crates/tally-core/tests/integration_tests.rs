//! Integration tests for tally-core
//!
//! These tests exercise the full import → ledger → analytics workflow.

use std::fs;

use rust_decimal_macros::dec;
use tally_core::{
    analytics::{Priority, RecommendationKind, Severity},
    import::parse_csv,
    AnalyticsConfig, BudgetEngine, Ledger, TransactionSource,
};

/// One salary and nineteen expenses in June 2024. Small amounts everywhere
/// except a 500 Black Friday purchase and a 1200 flight.
fn june_csv() -> &'static str {
    r#"id,date,type,amount,category,description
1,2024-06-30,income,2500.00,,Salary
2,2024-06-29,expense,30.50,Food & Dining,Coffee and breakfast
3,2024-06-28,expense,45.00,Food & Dining,Lunch at restaurant
4,2024-06-27,expense,55.75,Food & Dining,Dinner
5,2024-06-26,expense,120.00,Food & Dining,Groceries
6,2024-06-25,expense,200.00,Food & Dining,Weekly groceries
7,2024-06-24,expense,15.00,Transportation,Gas
8,2024-06-23,expense,12.50,Transportation,Parking
9,2024-06-22,expense,35.00,Transportation,Uber ride
10,2024-06-21,expense,50.00,Transportation,Gas fill-up
11,2024-06-20,expense,15.99,Entertainment,Netflix subscription
12,2024-06-19,expense,20.00,Entertainment,Movie tickets
13,2024-06-18,expense,50.00,Entertainment,Concert ticket
14,2024-06-17,expense,75.00,Shopping,Clothes shopping
15,2024-06-16,expense,40.00,Shopping,Books
16,2024-06-15,expense,150.00,Shopping,Electronics
17,2024-06-14,expense,500.00,Shopping,Black Friday purchase
18,2024-06-13,expense,80.00,Utilities,Internet bill
19,2024-06-12,expense,45.00,Utilities,Electricity
20,2024-06-11,expense,1200.00,Transportation,Flight ticket"#
}

/// Three months of steadily rising grocery bills against a flat salary
fn quarter_csv() -> &'static str {
    r#"id,date,type,amount,category,description
1,2024-01-01,income,2000,,Salary
2,2024-01-10,expense,400,Food & Dining,Groceries
3,2024-02-01,income,2000,,Salary
4,2024-02-10,expense,500,Food & Dining,Groceries
5,2024-03-01,income,2000,,Salary
6,2024-03-10,expense,600,Food & Dining,Groceries"#
}

// =============================================================================
// June scenario
// =============================================================================

#[test]
fn test_june_spending() {
    let txs = parse_csv(june_csv().as_bytes()).expect("Failed to parse CSV");
    let config = AnalyticsConfig::default();
    let analysis = BudgetEngine::new(&txs, &config).analyze_spending();

    assert_eq!(analysis.transaction_count, 20);
    assert_eq!(analysis.total_income, dec!(2500.00));
    assert_eq!(analysis.total_expenses, dec!(2739.74));
    assert_eq!(analysis.net_balance, dec!(-239.74));
    assert_eq!(analysis.by_month.len(), 1);
    assert_eq!(analysis.avg_monthly_expense, dec!(2739.74));
    assert_eq!(analysis.analysis_period_days, 19);

    let top: Vec<_> = analysis
        .top_categories
        .iter()
        .map(|c| c.category.as_str())
        .collect();
    assert_eq!(
        top,
        vec![
            "Transportation",
            "Shopping",
            "Food & Dining",
            "Utilities",
            "Entertainment"
        ]
    );
    assert_eq!(analysis.by_category["Transportation"], dec!(1312.50));
}

#[test]
fn test_june_forecast_needs_more_months() {
    let txs = parse_csv(june_csv().as_bytes()).unwrap();
    let config = AnalyticsConfig::default();
    let forecast = BudgetEngine::new(&txs, &config)
        .predict_monthly_expenses(3)
        .unwrap();

    assert!(forecast.predicted_expenses.is_empty());
    assert_eq!(forecast.historical_months, 1);
    assert_eq!(forecast.note, "Need at least 2 months of data for prediction");
}

#[test]
fn test_june_recommendations() {
    let txs = parse_csv(june_csv().as_bytes()).unwrap();
    let config = AnalyticsConfig::default();
    let report = BudgetEngine::new(&txs, &config).get_budget_recommendations();

    let kinds: Vec<_> = report.recommendations.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            RecommendationKind::CategoryAlert,
            RecommendationKind::BudgetTip,
            RecommendationKind::SavingOpportunity,
        ]
    );

    let alert = &report.recommendations[0];
    assert_eq!(alert.title, "High Spending in Transportation");
    assert_eq!(alert.potential_savings, dec!(131.25));
    // A single month makes the "average" the whole total
    assert_eq!(
        alert.description,
        "$1312.50 on Transportation is -52% above average. Consider reducing by 10%."
    );

    let ratio = &report.recommendations[1];
    assert_eq!(ratio.priority, Priority::High);
    assert_eq!(
        ratio.description,
        "You spend 110% of your income. Try to keep it below 80%."
    );

    assert_eq!(
        report.recommendations[2].title,
        "Build Emergency Fund ($7500.00)"
    );
    assert_eq!(report.total_potential_savings, dec!(405.224));
}

#[test]
fn test_june_anomalies() {
    let txs = parse_csv(june_csv().as_bytes()).unwrap();
    let config = AnalyticsConfig::default();
    let engine = BudgetEngine::new(&txs, &config);

    // Five Transportation amounts cap |z| at 2; the flight sits just below
    let strict = engine.detect_anomalies(2.0).unwrap();
    assert_eq!(strict.anomaly_count, 0);
    assert_eq!(strict.detection_method, "statistical (z-score)");

    let loose = engine.detect_anomalies(1.9).unwrap();
    assert_eq!(loose.anomalies.len(), 1);
    let flight = &loose.anomalies[0];
    assert_eq!(flight.transaction_id, 20);
    assert_eq!(flight.category, "Transportation");
    assert_eq!(flight.severity, Severity::Low);
}

#[test]
fn test_june_anomalies_with_more_fares() {
    let mut csv = june_csv().to_string();
    for (i, fare) in ["18.00", "22.40", "27.00", "31.50", "40.00", "19.99", "25.00", "44.00", "16.75", "29.00", "33.00", "21.00"]
        .iter()
        .enumerate()
    {
        csv.push_str(&format!(
            "\n{},2024-06-{:02},expense,{},Transportation,Bus fare",
            100 + i,
            i + 1,
            fare
        ));
    }

    let txs = parse_csv(csv.as_bytes()).unwrap();
    let config = AnalyticsConfig::default();
    let report = BudgetEngine::new(&txs, &config).detect_anomalies(2.0).unwrap();

    assert_eq!(report.anomalies.len(), 1);
    let flight = &report.anomalies[0];
    assert_eq!(flight.transaction_id, 20);
    assert_eq!(flight.severity, Severity::High);
    assert!(flight.zscore >= 3.0);
}

#[test]
fn test_categorize_independent_of_history() {
    let config = AnalyticsConfig::default();
    let result = BudgetEngine::new(&[], &config).categorize_transaction("Starbucks coffee downtown");

    assert_eq!(result.suggested_category, "Food & Dining");
    assert_eq!(
        result.all_categories.last().map(|c| c.name.as_str()),
        Some("Other")
    );
}

// =============================================================================
// Ledger workflow
// =============================================================================

#[test]
fn test_ledger_to_forecast() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("june.csv"), june_csv()).unwrap();
    fs::write(dir.path().join("quarter.csv"), quarter_csv()).unwrap();

    let ledger = Ledger::load_dir(dir.path()).expect("Failed to load ledger");
    assert_eq!(ledger.accounts(), vec!["june", "quarter"]);

    let snapshot = ledger.snapshot("quarter").unwrap();
    let config = AnalyticsConfig::default();
    let forecast = BudgetEngine::new(&snapshot, &config)
        .predict_monthly_expenses(2)
        .unwrap();

    assert_eq!(forecast.historical_months, 3);
    assert_eq!(forecast.prediction_months, vec!["2024-03", "2024-04"]);
    assert!((forecast.predicted_expenses[0] - 700.0).abs() < 1e-9);
    assert!((forecast.predicted_expenses[1] - 800.0).abs() < 1e-9);
    assert!((forecast.predicted_income[0] - 2000.0).abs() < 1e-9);
    assert!((forecast.predicted_net[0] - 1300.0).abs() < 1e-9);
    assert!((forecast.confidence_score - 1.0).abs() < 1e-9);
}

#[test]
fn test_results_serialize_as_plain_json() {
    let txs = parse_csv(june_csv().as_bytes()).unwrap();
    let config = AnalyticsConfig::default();
    let engine = BudgetEngine::new(&txs, &config);

    let analysis = serde_json::to_value(engine.analyze_spending()).unwrap();
    assert_eq!(analysis["total_income"], 2500.0);
    assert_eq!(analysis["by_month"]["2024-06"]["income"], 2500.0);

    let anomalies = serde_json::to_value(engine.detect_anomalies(1.9).unwrap()).unwrap();
    assert_eq!(anomalies["anomalies"][0]["severity"], "low");
    assert_eq!(anomalies["anomalies"][0]["date"], "2024-06-11T00:00:00");
    assert!(anomalies.get("note").is_none());
}
