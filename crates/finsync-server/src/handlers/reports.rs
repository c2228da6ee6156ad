//! Dashboard and report handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{resolve_as_of, AppError, AppState};
use finsync_core::models::YearMonth;
use finsync_core::reports::{
    budget_report, category_breakdown, daily_breakdown, monthly_summary, BudgetReport,
    CategoryBreakdown, DailyTotals, MonthlySummary,
};

#[derive(Debug, Deserialize)]
pub struct AsOfQuery {
    /// Reference date (YYYY-MM-DD), defaults to today
    pub as_of: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    /// Calendar month (YYYY-MM), defaults to the current month
    pub month: Option<String>,
}

impl MonthQuery {
    fn resolve(&self) -> Result<YearMonth, AppError> {
        match self.month.as_deref() {
            Some(s) => s.parse().map_err(|e: String| AppError::bad_request(&e)),
            None => Ok(YearMonth::from_date(resolve_as_of(None)?)),
        }
    }
}

/// GET /api/dashboard - Current month summary with trends
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AsOfQuery>,
) -> Result<Json<MonthlySummary>, AppError> {
    let today = resolve_as_of(params.as_of.as_deref())?;
    let transactions = state.store.list().map_err(AppError::from_core)?;
    Ok(Json(monthly_summary(&transactions, today)))
}

/// GET /api/budgets - Current month spending against configured limits
pub async fn get_budgets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AsOfQuery>,
) -> Result<Json<BudgetReport>, AppError> {
    let today = resolve_as_of(params.as_of.as_deref())?;
    let transactions = state.store.list().map_err(AppError::from_core)?;
    Ok(Json(budget_report(
        &transactions,
        &state.settings.budgets,
        today,
    )))
}

/// GET /api/reports/categories - Income and expense totals by category
pub async fn report_categories(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<CategoryBreakdown>, AppError> {
    let month = params.resolve()?;
    let transactions = state.store.list().map_err(AppError::from_core)?;
    Ok(Json(category_breakdown(&transactions, month)))
}

/// GET /api/reports/daily - One row per day of the month
pub async fn report_daily(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<Vec<DailyTotals>>, AppError> {
    let month = params.resolve()?;
    let transactions = state.store.list().map_err(AppError::from_core)?;
    Ok(Json(daily_breakdown(&transactions, month)))
}
