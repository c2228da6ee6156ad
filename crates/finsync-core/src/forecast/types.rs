//! Core types for the forecast engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest horizon a caller may request
pub const MAX_HORIZON_MONTHS: u32 = 36;

/// User-adjustable knobs for one projection run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioParameters {
    /// Number of future months to project
    pub horizon_months: u32,
    /// Applied to the historical income average (100 = unchanged)
    pub income_multiplier_percent: i32,
    /// Applied to the historical expense average (100 = unchanged)
    pub expense_multiplier_percent: i32,
    /// One-time additional expense
    pub extra_expense_amount: f64,
    /// 1-based projected month that receives the extra expense
    pub extra_expense_month_index: u32,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            horizon_months: 12,
            income_multiplier_percent: 100,
            expense_multiplier_percent: 100,
            extra_expense_amount: 0.0,
            extra_expense_month_index: 6,
        }
    }
}

impl ScenarioParameters {
    /// Bring user input into the range the generator expects.
    ///
    /// The horizon is held to `1..=MAX_HORIZON_MONTHS`; negative percents and
    /// negative or non-finite extra amounts become zero. The extra expense
    /// month is left alone: an index outside the horizon simply never applies.
    pub fn clamped(self) -> Self {
        let extra = if self.extra_expense_amount.is_finite() {
            self.extra_expense_amount.max(0.0)
        } else {
            0.0
        };
        Self {
            horizon_months: self.horizon_months.clamp(1, MAX_HORIZON_MONTHS),
            income_multiplier_percent: self.income_multiplier_percent.max(0),
            expense_multiplier_percent: self.expense_multiplier_percent.max(0),
            extra_expense_amount: extra,
            extra_expense_month_index: self.extra_expense_month_index,
        }
    }
}

/// Trailing-window monthly averages
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalAverages {
    pub avg_income: f64,
    pub avg_expense: f64,
    /// Distinct months in the window that had at least one transaction
    pub months_counted: usize,
}

/// Monthly totals of recurring transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTotals {
    pub income: f64,
    pub expense: f64,
}

/// Everything the generator needs besides the scenario
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionInputs {
    pub averages: HistoricalAverages,
    pub recurring: RecurringTotals,
    /// Current month's actual income minus expense; seeds the accumulated balance
    pub anchor_balance: f64,
}

/// One projected month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthProjection {
    /// 1-based position in the series
    pub month_index: u32,
    pub year: i32,
    /// 1-12
    pub month: u32,
    /// e.g. "October 2026"
    pub month_label: String,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub accumulated_balance: f64,
    pub accumulated_savings: f64,
}

/// Scalar metrics derived from the series
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub end_balance: f64,
    pub total_savings: f64,
    pub months_negative: usize,
}

/// Overall financial health verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Projected to end in the red
    Critical,
    /// Too many months with a negative balance
    Warning,
    /// Savings won't reach a three-month expense buffer
    Caution,
    Good,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Critical => "critical",
            HealthStatus::Warning => "warning",
            HealthStatus::Caution => "caution",
            HealthStatus::Good => "good",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HealthStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(HealthStatus::Critical),
            "warning" => Ok(HealthStatus::Warning),
            "caution" => Ok(HealthStatus::Caution),
            "good" => Ok(HealthStatus::Good),
            _ => Err(format!("Unknown health status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAssessment {
    pub status: HealthStatus,
    pub title: String,
    pub message: String,
}

/// Kinds of advice attached to a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipKind {
    ReduceSpending,
    EmergencyFund,
    InvestSavings,
    PlanLargeExpenses,
    ExpenseIncrease,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tip {
    pub kind: TipKind,
    pub title: String,
    pub message: String,
}

/// Full output of one projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    /// The "now" the run was computed against
    pub as_of: NaiveDate,
    pub scenario: ScenarioParameters,
    pub averages: HistoricalAverages,
    pub recurring: RecurringTotals,
    pub anchor_balance: f64,
    pub months: Vec<MonthProjection>,
    pub summary: ForecastSummary,
    pub health: HealthAssessment,
    pub tips: Vec<Tip>,
}
