//! Analytics handlers
//!
//! One endpoint per engine operation. Account endpoints snapshot the account
//! first, so a concurrent replacement never mixes old and new data.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use tally_core::{
    AnalysisResult, AnomalyReport, BudgetEngine, CategorizationResult, ForecastResult,
    RecommendationReport, Transaction, TransactionCategorizer,
};

use crate::{AppError, AppState};

/// Query parameters for forecasting
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// Months to predict (defaults to the configured horizon)
    pub months: Option<u32>,
}

/// Query parameters for anomaly detection
#[derive(Debug, Deserialize)]
pub struct AnomalyQuery {
    /// Standard deviations from the category mean
    pub threshold: Option<f64>,
}

/// Request body for categorization
#[derive(Debug, Deserialize)]
pub struct CategorizeRequest {
    pub description: String,
}

fn snapshot(state: &AppState, account: &str) -> Result<Vec<Transaction>, AppError> {
    let transactions = state.source.snapshot(account)?;
    debug!(account, count = transactions.len(), "Took account snapshot");
    Ok(transactions)
}

/// GET /api/accounts/:account/spending
pub async fn get_spending(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
) -> Result<Json<AnalysisResult>, AppError> {
    let transactions = snapshot(&state, &account)?;
    let engine = BudgetEngine::new(&transactions, &state.config.analytics);
    Ok(Json(engine.analyze_spending()))
}

/// GET /api/accounts/:account/forecast?months=N
pub async fn get_forecast(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
    Query(params): Query<ForecastQuery>,
) -> Result<Json<ForecastResult>, AppError> {
    let transactions = snapshot(&state, &account)?;
    let months = params
        .months
        .unwrap_or(state.config.analytics.forecast.default_months_ahead);

    let engine = BudgetEngine::new(&transactions, &state.config.analytics);
    Ok(Json(engine.predict_monthly_expenses(months)?))
}

/// GET /api/accounts/:account/recommendations
pub async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
) -> Result<Json<RecommendationReport>, AppError> {
    let transactions = snapshot(&state, &account)?;
    let engine = BudgetEngine::new(&transactions, &state.config.analytics);
    Ok(Json(engine.get_budget_recommendations()))
}

/// GET /api/accounts/:account/anomalies?threshold=T
pub async fn get_anomalies(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
    Query(params): Query<AnomalyQuery>,
) -> Result<Json<AnomalyReport>, AppError> {
    let transactions = snapshot(&state, &account)?;
    let threshold = params
        .threshold
        .unwrap_or(state.config.analytics.anomalies.default_threshold);

    let engine = BudgetEngine::new(&transactions, &state.config.analytics);
    Ok(Json(engine.detect_anomalies(threshold)?))
}

/// POST /api/categorize - Suggest a category for a description
pub async fn categorize(Json(req): Json<CategorizeRequest>) -> Json<CategorizationResult> {
    Json(TransactionCategorizer::new().categorize(&req.description))
}
