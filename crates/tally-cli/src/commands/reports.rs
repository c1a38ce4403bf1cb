//! Combined report command

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tally_core::{
    AnalysisResult, AnalyticsConfig, AnomalyReport, BudgetEngine, ForecastResult,
    RecommendationReport,
};

use super::{
    load_transactions, print_anomalies, print_forecast, print_json, print_recommendations,
    print_spending,
};

/// Every history-based operation over one snapshot
#[derive(Debug, Serialize)]
pub struct FullReport {
    pub spending: AnalysisResult,
    pub forecast: ForecastResult,
    pub recommendations: RecommendationReport,
    pub anomalies: AnomalyReport,
}

/// Run spending, forecast, recommendations and anomalies with config defaults
pub fn build_report(
    engine: &BudgetEngine<'_>,
    config: &AnalyticsConfig,
) -> tally_core::Result<FullReport> {
    Ok(FullReport {
        spending: engine.analyze_spending(),
        forecast: engine.predict_monthly_expenses(config.forecast.default_months_ahead)?,
        recommendations: engine.get_budget_recommendations(),
        anomalies: engine.detect_anomalies(config.anomalies.default_threshold)?,
    })
}

pub fn cmd_report(file: &Path, config: &AnalyticsConfig, json: bool) -> Result<()> {
    let transactions = load_transactions(file)?;
    let engine = BudgetEngine::new(&transactions, config);
    let report = build_report(&engine, config)?;

    if json {
        return print_json(&report);
    }

    print_spending(&report.spending);
    print_forecast(&report.forecast);
    print_recommendations(&report.recommendations);
    print_anomalies(&report.anomalies, config.anomalies.default_threshold);
    Ok(())
}
