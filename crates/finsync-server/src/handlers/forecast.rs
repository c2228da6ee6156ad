//! Forecast handler

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::{resolve_as_of, AppError, AppState};
use finsync_core::forecast::{ForecastResult, ScenarioParameters};

/// Scenario knobs; anything left out falls back to the configured defaults
#[derive(Debug, Default, Deserialize)]
pub struct ForecastQuery {
    pub horizon_months: Option<u32>,
    pub income_percent: Option<i32>,
    pub expense_percent: Option<i32>,
    pub extra_expense: Option<f64>,
    pub extra_expense_month: Option<u32>,
    /// Reference date (YYYY-MM-DD), defaults to today
    pub as_of: Option<String>,
}

impl ForecastQuery {
    fn scenario(&self, defaults: ScenarioParameters) -> ScenarioParameters {
        ScenarioParameters {
            horizon_months: self.horizon_months.unwrap_or(defaults.horizon_months),
            income_multiplier_percent: self
                .income_percent
                .unwrap_or(defaults.income_multiplier_percent),
            expense_multiplier_percent: self
                .expense_percent
                .unwrap_or(defaults.expense_multiplier_percent),
            extra_expense_amount: self.extra_expense.unwrap_or(defaults.extra_expense_amount),
            extra_expense_month_index: self
                .extra_expense_month
                .unwrap_or(defaults.extra_expense_month_index),
        }
        .clamped()
    }
}

/// GET /api/forecast - Project future months from history
pub async fn get_forecast(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ForecastQuery>,
) -> Result<Json<ForecastResult>, AppError> {
    let as_of = resolve_as_of(params.as_of.as_deref())?;
    let scenario = params.scenario(state.settings.forecast);
    debug!(?scenario, as_of = %as_of, "Forecast requested");

    let transactions = state.store.list().map_err(AppError::from_core)?;
    let result = state
        .forecast_cache
        .project(&transactions, as_of, &scenario)
        .map_err(AppError::from_core)?;

    Ok(Json(result))
}
