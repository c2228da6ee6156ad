//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppError, AppState, SuccessResponse};
use finsync_core::models::{Category, NewTransaction, Transaction, TransactionFilter, TransactionType};

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: usize = 1000;

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    /// income or expense
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Option<String>,
    pub paid: Option<bool>,
    /// Custom start date (YYYY-MM-DD)
    pub from: Option<String>,
    /// Custom end date (YYYY-MM-DD)
    pub to: Option<String>,
    pub source: Option<String>,
    pub variable: Option<bool>,
}

fn default_limit() -> usize {
    50
}

#[derive(Serialize)]
pub struct TransactionResponse {
    pub transactions: Vec<Transaction>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

fn parse_date_param(value: Option<&str>, name: &str) -> Result<Option<NaiveDate>, AppError> {
    value
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .map_err(|_| AppError::bad_request(&format!("Invalid {} date format (use YYYY-MM-DD)", name)))
}

impl TransactionQuery {
    fn filter(&self) -> Result<TransactionFilter, AppError> {
        let kind = self
            .kind
            .as_deref()
            .map(str::parse::<TransactionType>)
            .transpose()
            .map_err(|e| AppError::bad_request(&e))?;
        let category = self
            .category
            .as_deref()
            .map(str::parse::<Category>)
            .transpose()
            .map_err(|e| AppError::bad_request(&e))?;

        Ok(TransactionFilter {
            kind,
            category,
            is_paid: self.paid,
            start_date: parse_date_param(self.from.as_deref(), "from")?,
            end_date: parse_date_param(self.to.as_deref(), "to")?,
            source: self.source.clone(),
            is_variable: self.variable,
        })
    }
}

/// GET /api/transactions - List transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionQuery>,
) -> Result<Json<TransactionResponse>, AppError> {
    let limit = params.limit.min(MAX_PAGE_LIMIT);
    let filter = params.filter()?;

    let all = state.store.list().map_err(AppError::from_core)?;
    let mut matching: Vec<Transaction> = filter.apply(&all).into_iter().cloned().collect();
    matching.sort_by(|a, b| b.date.cmp(&a.date));

    let total = matching.len();
    let transactions = matching
        .into_iter()
        .skip(params.offset)
        .take(limit)
        .collect();

    Ok(Json(TransactionResponse {
        transactions,
        total,
        limit,
        offset: params.offset,
    }))
}

/// GET /api/transactions/:id - Get a single transaction
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, AppError> {
    let tx = state
        .store
        .get(&id)
        .map_err(AppError::from_core)?
        .ok_or_else(|| AppError::not_found("Transaction not found"))?;
    Ok(Json(tx))
}

/// Request body for creating a transaction
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Caller-chosen id; generated from the content when absent
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub transaction: NewTransaction,
}

/// POST /api/transactions - Add a transaction (409 if a supplied id exists)
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let tx = match request.id {
        Some(id) if id.trim().is_empty() => {
            return Err(AppError::bad_request("Transaction id must not be empty"))
        }
        Some(id) => state.store.insert(request.transaction.with_id(id)),
        None => state.store.add(request.transaction),
    }
    .map_err(AppError::from_core)?;
    info!(id = %tx.id, kind = tx.kind.as_str(), "Transaction created");
    Ok((StatusCode::CREATED, Json(tx)))
}

/// DELETE /api/transactions/:id - Delete a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.store.delete(&id).map_err(AppError::from_core)?;
    info!(id = %id, "Transaction deleted");
    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/transactions/:id/paid - Mark a transaction as paid
pub async fn mark_transaction_paid(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, AppError> {
    let tx = state.store.mark_paid(&id).map_err(AppError::from_core)?;
    Ok(Json(tx))
}
