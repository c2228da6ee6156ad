//! Historical averages over the trailing six-month window

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Transaction, TransactionType, YearMonth};

use super::types::HistoricalAverages;

/// How many calendar months before "now" the window reaches back
pub const WINDOW_MONTHS: i32 = 6;

#[derive(Debug, Default, Clone, Copy)]
struct MonthTotals {
    income: f64,
    expense: f64,
}

/// First day included in the averaging window for `now`.
/// Near the start of the date range the window begins at `NaiveDate::MIN`.
pub fn window_start(now: NaiveDate) -> NaiveDate {
    YearMonth::from_date(now)
        .offset(-WINDOW_MONTHS)
        .map_or(NaiveDate::MIN, |m| m.first_day())
}

/// Average monthly income and expense from `[window_start(now), now]`.
///
/// Each distinct month with at least one transaction counts once in the
/// denominator. With no data the denominator is 1, so both averages are 0.
pub fn historical_averages(transactions: &[Transaction], now: NaiveDate) -> HistoricalAverages {
    let start = window_start(now);
    let mut buckets: BTreeMap<YearMonth, MonthTotals> = BTreeMap::new();

    for tx in transactions
        .iter()
        .filter(|tx| tx.date >= start && tx.date <= now)
    {
        let bucket = buckets.entry(tx.year_month()).or_default();
        match tx.kind {
            TransactionType::Income => bucket.income += tx.amount,
            TransactionType::Expense => bucket.expense += tx.amount,
        }
    }

    let months_counted = buckets.len();
    let denominator = months_counted.max(1) as f64;
    let total_income: f64 = buckets.values().map(|b| b.income).sum();
    let total_expense: f64 = buckets.values().map(|b| b.expense).sum();

    let averages = HistoricalAverages {
        avg_income: total_income / denominator,
        avg_expense: total_expense / denominator,
        months_counted,
    };

    debug!(
        window_start = %start,
        now = %now,
        months = months_counted,
        avg_income = averages.avg_income,
        avg_expense = averages.avg_expense,
        "Computed historical averages"
    );

    averages
}

/// Actual income minus expense for the calendar month containing `now`.
///
/// This is the anchor that seeds the accumulated balance. Every transaction
/// dated in that month counts, including ones later than `now`.
pub fn current_month_balance(transactions: &[Transaction], now: NaiveDate) -> f64 {
    let current = YearMonth::from_date(now);
    transactions
        .iter()
        .filter(|tx| current.contains(tx.date))
        .map(|tx| match tx.kind {
            TransactionType::Income => tx.amount,
            TransactionType::Expense => -tx.amount,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, expense, income};

    #[test]
    fn test_average_over_distinct_months() {
        let txs = vec![
            income("a", 100.0, "2026-01-10"),
            income("b", 150.0, "2026-02-03"),
            income("c", 50.0, "2026-02-20"),
            income("d", 300.0, "2026-03-31"),
        ];

        let avg = historical_averages(&txs, date("2026-04-15"));
        assert_eq!(avg.months_counted, 3);
        assert!((avg.avg_income - 200.0).abs() < 1e-9);
        assert_eq!(avg.avg_expense, 0.0);
    }

    #[test]
    fn test_empty_history_averages_to_zero() {
        let avg = historical_averages(&[], date("2026-04-15"));
        assert_eq!(avg.avg_income, 0.0);
        assert_eq!(avg.avg_expense, 0.0);
        assert_eq!(avg.months_counted, 0);
    }

    #[test]
    fn test_window_starts_on_first_of_month_six_back() {
        assert_eq!(window_start(date("2026-04-15")), date("2025-10-01"));
        assert_eq!(window_start(date("2026-01-31")), date("2025-07-01"));

        let txs = vec![
            expense("too-old", 999.0, "2025-09-30"),
            expense("edge", 600.0, "2025-10-01"),
        ];
        let avg = historical_averages(&txs, date("2026-04-15"));
        assert_eq!(avg.months_counted, 1);
        assert_eq!(avg.avg_expense, 600.0);
    }

    #[test]
    fn test_future_transactions_are_excluded() {
        let txs = vec![
            expense("now", 100.0, "2026-04-15"),
            expense("later-this-month", 500.0, "2026-04-16"),
            expense("next-month", 700.0, "2026-05-01"),
        ];
        let avg = historical_averages(&txs, date("2026-04-15"));
        assert_eq!(avg.months_counted, 1);
        assert_eq!(avg.avg_expense, 100.0);
    }

    #[test]
    fn test_months_with_only_one_type_still_count() {
        // March has only expenses, so it dilutes the income average
        let txs = vec![
            income("a", 1000.0, "2026-02-01"),
            expense("b", 400.0, "2026-03-01"),
        ];
        let avg = historical_averages(&txs, date("2026-04-01"));
        assert_eq!(avg.months_counted, 2);
        assert_eq!(avg.avg_income, 500.0);
        assert_eq!(avg.avg_expense, 200.0);
    }

    #[test]
    fn test_current_month_balance() {
        let txs = vec![
            income("salary", 5000.0, "2026-04-05"),
            expense("rent", 1200.0, "2026-04-10"),
            expense("due-later", 300.0, "2026-04-28"),
            expense("last-month", 800.0, "2026-03-28"),
        ];
        let anchor = current_month_balance(&txs, date("2026-04-15"));
        assert_eq!(anchor, 3500.0);
        assert_eq!(current_month_balance(&[], date("2026-04-15")), 0.0);
    }
}
