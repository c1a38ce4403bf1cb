//! Tally Web Server
//!
//! Axum-based REST API exposing the budget analytics engine.
//!
//! Every account endpoint takes a fresh snapshot from the transaction source
//! and runs one engine operation on it. Results are returned verbatim as JSON.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use tally_core::{AnalyticsConfig, TransactionSource};

mod handlers;

/// Server configuration
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// Engine settings (defaults, limits)
    pub analytics: AnalyticsConfig,
}

/// Shared application state
pub struct AppState {
    pub source: Arc<dyn TransactionSource>,
    pub config: ServerConfig,
}

/// Create the application router
pub fn create_router(source: Arc<dyn TransactionSource>, config: ServerConfig) -> Router {
    let cors = build_cors(&config.allowed_origins);
    let state = Arc::new(AppState { source, config });

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/accounts", get(handlers::list_accounts))
        .route("/accounts/:account/spending", get(handlers::get_spending))
        .route("/accounts/:account/forecast", get(handlers::get_forecast))
        .route(
            "/accounts/:account/recommendations",
            get(handlers::get_recommendations),
        )
        .route("/accounts/:account/anomalies", get(handlers::get_anomalies))
        .route("/categorize", post(handlers::categorize));

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        cors
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Start the server
pub async fn serve(
    source: Arc<dyn TransactionSource>,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let accounts = source.accounts().len();
    let app = create_router(source, config);
    let addr = format!("{}:{}", host, port);

    info!(accounts, "Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        // Caller mistakes are reported as-is
        match err.downcast_ref::<tally_core::Error>() {
            Some(tally_core::Error::NotFound(what)) => {
                return Self::not_found(&format!("Not found: {}", what))
            }
            Some(tally_core::Error::InvalidData(msg)) => return Self::bad_request(msg),
            _ => {}
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
