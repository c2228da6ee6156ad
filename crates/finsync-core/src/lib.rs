//! FinSync Core Library
//!
//! Shared functionality for the FinSync personal finance tool:
//! - Transaction models and storage backends (memory, JSON file)
//! - CSV import with duplicate detection
//! - Cash-flow forecast engine with scenario knobs and health assessment
//! - Dashboard reports (monthly summary, categories, daily, budgets)
//! - TOML configuration with embedded defaults

pub mod config;
pub mod error;
pub mod forecast;
pub mod import;
pub mod models;
pub mod reports;
pub mod sample;
pub mod store;

/// Test utilities: transaction builders
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::FinsyncConfig;
pub use error::{Error, Result};
pub use forecast::{
    ForecastCache, ForecastResult, ForecastSummary, Forecaster, HealthAssessment, HealthStatus,
    MonthProjection, ScenarioParameters, Tip, TipKind,
};
pub use import::{import_csv, parse_csv, ImportStats};
pub use models::{
    Category, NewTransaction, Transaction, TransactionFilter, TransactionType, YearMonth,
};
pub use reports::{
    budget_report, category_breakdown, daily_breakdown, monthly_summary, BudgetReport,
    BudgetStatus, CategoryBreakdown, DailyTotals, MonthlySummary,
};
pub use store::{JsonFileStore, MemoryStore, TransactionStore, TransactionWriter};
