//! Cash-flow forecast engine
//!
//! Projects future months from transaction history:
//!
//! - **Historical averages** - mean monthly income/expense over the trailing
//!   six months
//! - **Recurring totals** - recurring items repeat every projected month
//! - **Projection** - per-month income, expense, balance and running totals,
//!   shaped by [`ScenarioParameters`]
//! - **Health** - summary metrics, a categorical verdict and tips
//!
//! Everything here is a pure function of (transactions, now, scenario) and is
//! recomputed from scratch on every call.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use finsync_core::forecast::{Forecaster, ScenarioParameters};
//! use finsync_core::store::JsonFileStore;
//!
//! let store = JsonFileStore::new("finsync.json");
//! let result = Forecaster::new(&store).run(today, &ScenarioParameters::default())?;
//! println!("{}", result.health.title);
//! ```

pub mod averages;
pub mod cache;
pub mod health;
pub mod projection;
pub mod recurring;
pub mod tips;
pub mod types;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::Result;
use crate::models::Transaction;
use crate::store::TransactionStore;

pub use averages::{current_month_balance, historical_averages, window_start};
pub use cache::ForecastCache;
pub use health::{assess_health, average_monthly_expense, summarize};
pub use projection::generate_projection;
pub use recurring::recurring_totals;
pub use tips::forecast_tips;
pub use types::{
    ForecastResult, ForecastSummary, HealthAssessment, HealthStatus, HistoricalAverages,
    MonthProjection, ProjectionInputs, RecurringTotals, ScenarioParameters, Tip, TipKind,
    MAX_HORIZON_MONTHS,
};

/// Derive the generator inputs from raw transactions
pub fn projection_inputs(transactions: &[Transaction], now: NaiveDate) -> ProjectionInputs {
    ProjectionInputs {
        averages: historical_averages(transactions, now),
        recurring: recurring_totals(transactions),
        anchor_balance: current_month_balance(transactions, now),
    }
}

/// Run the whole pipeline: inputs, series, summary, health and tips.
///
/// The scenario is used as given; clamp it first with
/// [`ScenarioParameters::clamped`] if it comes from user input.
pub fn project(
    transactions: &[Transaction],
    now: NaiveDate,
    scenario: &ScenarioParameters,
) -> ForecastResult {
    let inputs = projection_inputs(transactions, now);
    let months = generate_projection(now, &inputs, scenario);
    let summary = summarize(&months);
    let health = assess_health(&summary, &months, scenario.horizon_months);
    let tips = forecast_tips(&summary, scenario);

    debug!(
        horizon = scenario.horizon_months,
        end_balance = summary.end_balance,
        total_savings = summary.total_savings,
        months_negative = summary.months_negative,
        health = health.status.as_str(),
        "Forecast complete"
    );

    ForecastResult {
        as_of: now,
        scenario: *scenario,
        averages: inputs.averages,
        recurring: inputs.recurring,
        anchor_balance: inputs.anchor_balance,
        months,
        summary,
        health,
        tips,
    }
}

/// Runs forecasts against a transaction store
pub struct Forecaster<'a, S: TransactionStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: TransactionStore + ?Sized> Forecaster<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Read the store and project with the scenario clamped to valid ranges
    pub fn run(&self, now: NaiveDate, scenario: &ScenarioParameters) -> Result<ForecastResult> {
        let transactions = self.store.list()?;
        Ok(project(&transactions, now, &scenario.clamped()))
    }
}
