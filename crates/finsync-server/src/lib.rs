//! FinSync Web Server
//!
//! Axum-based JSON API behind the FinSync dashboard:
//! - Cash-flow forecast with scenario knobs in the query string
//! - Monthly summary, budgets, category and daily reports
//! - Transaction listing and editing
//!
//! There is no authentication; bind to localhost or put it behind a proxy.
//! Internal errors are logged in full and returned to clients as a generic
//! message.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use finsync_core::{FinsyncConfig, ForecastCache, TransactionWriter};

mod handlers;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn TransactionWriter + Send + Sync>,
    /// Forecast defaults and budget limits
    pub settings: FinsyncConfig,
    pub forecast_cache: ForecastCache,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn TransactionWriter + Send + Sync>,
        settings: FinsyncConfig,
        config: ServerConfig,
    ) -> Self {
        Self {
            store,
            settings,
            forecast_cache: ForecastCache::new(),
            config,
        }
    }
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Parse an optional `as_of` date, defaulting to today (local time)
pub(crate) fn resolve_as_of(as_of: Option<&str>) -> Result<NaiveDate, AppError> {
    match as_of {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| AppError::bad_request("Invalid as_of date format (use YYYY-MM-DD)")),
        None => Ok(Local::now().date_naive()),
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();
    let state = Arc::new(state);

    let api_routes = Router::new()
        // Forecast
        .route("/forecast", get(handlers::get_forecast))
        // Dashboard and reports
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/budgets", get(handlers::get_budgets))
        .route("/reports/categories", get(handlers::report_categories))
        .route("/reports/daily", get(handlers::report_daily))
        // Transactions
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route(
            "/transactions/:id",
            get(handlers::get_transaction).delete(handlers::delete_transaction),
        )
        .route("/transactions/:id/paid", post(handlers::mark_transaction_paid));

    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];
    let cors = if config.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server
pub async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
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

    pub fn conflict(msg: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core error to a client error where the caller is at fault
    pub fn from_core(err: finsync_core::Error) -> Self {
        use finsync_core::Error;
        match err {
            Error::NotFound(msg) => Self::not_found(&format!("Not found: {}", msg)),
            Error::InvalidData(msg) | Error::Import(msg) => Self::bad_request(&msg),
            Error::Duplicate(msg) => Self::conflict(&format!("Duplicate transaction: {}", msg)),
            other => Self::from(other),
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
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
