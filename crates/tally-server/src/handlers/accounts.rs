//! Account and health handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /api/health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /api/accounts - List account names
pub async fn list_accounts(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.source.accounts())
}
