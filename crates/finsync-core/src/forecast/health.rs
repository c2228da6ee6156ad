//! Forecast summary and financial health assessment

use super::types::{ForecastSummary, HealthAssessment, HealthStatus, MonthProjection};

/// Share of the horizon that may be negative before we warn
const NEGATIVE_MONTHS_THRESHOLD: f64 = 0.25;

/// Months of expenses savings should cover
const SAVINGS_BUFFER_MONTHS: f64 = 3.0;

/// End balance, total savings and negative-month count for a series.
/// An empty series summarizes to zeros.
pub fn summarize(series: &[MonthProjection]) -> ForecastSummary {
    let Some(last) = series.last() else {
        return ForecastSummary::default();
    };

    ForecastSummary {
        end_balance: last.accumulated_balance,
        total_savings: last.accumulated_savings,
        months_negative: series.iter().filter(|m| m.balance < 0.0).count(),
    }
}

/// Mean projected expense per month of the horizon (0 for a zero horizon)
pub fn average_monthly_expense(series: &[MonthProjection], horizon_months: u32) -> f64 {
    if horizon_months == 0 {
        return 0.0;
    }
    series.iter().map(|m| m.expense).sum::<f64>() / horizon_months as f64
}

/// Classify the forecast. Rules are checked in order and the first match wins:
///
/// 1. ending balance below zero: critical
/// 2. more than a quarter of the months negative: warning
/// 3. savings under three months of average expense: caution
/// 4. otherwise: good
pub fn assess_health(
    summary: &ForecastSummary,
    series: &[MonthProjection],
    horizon_months: u32,
) -> HealthAssessment {
    if summary.end_balance < 0.0 {
        return HealthAssessment {
            status: HealthStatus::Critical,
            title: "Critical Situation".to_string(),
            message: "Your projected balance is negative. Cut expenses or increase income urgently."
                .to_string(),
        };
    }

    if summary.months_negative as f64 > horizon_months as f64 * NEGATIVE_MONTHS_THRESHOLD {
        return HealthAssessment {
            status: HealthStatus::Warning,
            title: "Attention Needed".to_string(),
            message: format!(
                "You will have {} months with a negative balance. Review your budget.",
                summary.months_negative
            ),
        };
    }

    let avg_expense = average_monthly_expense(series, horizon_months);
    if summary.total_savings < avg_expense * SAVINGS_BUFFER_MONTHS {
        return HealthAssessment {
            status: HealthStatus::Caution,
            title: "Insufficient Reserve".to_string(),
            message: "Your savings won't reach three months of expenses. Try raising your savings rate."
                .to_string(),
        };
    }

    HealthAssessment {
        status: HealthStatus::Good,
        title: "Stable Situation".to_string(),
        message: "Your finances are on track. Keep saving and planning ahead.".to_string(),
    }
}
