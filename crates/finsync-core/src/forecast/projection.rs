//! Month-by-month cash-flow projection

use chrono::NaiveDate;

use crate::models::YearMonth;

use super::types::{MonthProjection, ProjectionInputs, ScenarioParameters};

/// Produce the projected series for months `1..=scenario.horizon_months`.
///
/// Averages and recurring totals are applied identically to every month;
/// nothing compounds between months. The extra expense lands only in the
/// month whose index equals `extra_expense_month_index`. A horizon of 0
/// yields an empty series; callers clamp before calling.
pub fn generate_projection(
    now: NaiveDate,
    inputs: &ProjectionInputs,
    scenario: &ScenarioParameters,
) -> Vec<MonthProjection> {
    let base = YearMonth::from_date(now);

    let adjusted_income =
        inputs.averages.avg_income * scenario.income_multiplier_percent as f64 / 100.0;
    let adjusted_expense =
        inputs.averages.avg_expense * scenario.expense_multiplier_percent as f64 / 100.0;

    let month_income = adjusted_income + inputs.recurring.income;
    let regular_expense = adjusted_expense + inputs.recurring.expense;

    let mut accumulated_balance = inputs.anchor_balance;
    let mut accumulated_savings = 0.0;
    let mut series = Vec::with_capacity(scenario.horizon_months as usize);

    for i in 1..=scenario.horizon_months {
        let Some(ym) = base.offset(i as i32) else {
            break;
        };

        let mut month_expense = regular_expense;
        if i == scenario.extra_expense_month_index {
            month_expense += scenario.extra_expense_amount;
        }

        let balance = month_income - month_expense;
        accumulated_balance += balance;
        if balance > 0.0 {
            accumulated_savings += balance;
        }

        series.push(MonthProjection {
            month_index: i,
            year: ym.year(),
            month: ym.month(),
            month_label: ym.label(),
            income: month_income,
            expense: month_expense,
            balance,
            accumulated_balance,
            accumulated_savings,
        });
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::types::{HistoricalAverages, RecurringTotals};
    use crate::test_utils::date;

    fn inputs(avg_income: f64, avg_expense: f64, anchor: f64) -> ProjectionInputs {
        ProjectionInputs {
            averages: HistoricalAverages {
                avg_income,
                avg_expense,
                months_counted: 1,
            },
            recurring: RecurringTotals::default(),
            anchor_balance: anchor,
        }
    }

    fn scenario(horizon: u32) -> ScenarioParameters {
        ScenarioParameters {
            horizon_months: horizon,
            extra_expense_amount: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_steady_state_scenario() {
        let seed = 250.0;
        let series = generate_projection(
            date("2026-10-16"),
            &inputs(1000.0, 800.0, seed),
            &scenario(3),
        );

        assert_eq!(series.len(), 3);
        for (i, month) in series.iter().enumerate() {
            let n = (i + 1) as f64;
            assert_eq!(month.balance, 200.0);
            assert_eq!(month.accumulated_balance, seed + 200.0 * n);
            assert_eq!(month.accumulated_savings, 200.0 * n);
        }
    }

    #[test]
    fn test_labels_roll_over_year() {
        let series = generate_projection(date("2026-10-31"), &inputs(0.0, 0.0, 0.0), &scenario(4));
        let labels: Vec<_> = series.iter().map(|m| m.month_label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "November 2026",
                "December 2026",
                "January 2027",
                "February 2027"
            ]
        );
        assert_eq!(series[2].year, 2027);
        assert_eq!(series[2].month, 1);
        assert_eq!(series[3].month_index, 4);
    }

    #[test]
    fn test_multipliers_and_recurring() {
        let inputs = ProjectionInputs {
            averages: HistoricalAverages {
                avg_income: 2000.0,
                avg_expense: 1000.0,
                months_counted: 6,
            },
            recurring: RecurringTotals {
                income: 500.0,
                expense: 50.0,
            },
            anchor_balance: 0.0,
        };
        let scenario = ScenarioParameters {
            horizon_months: 2,
            income_multiplier_percent: 90,
            expense_multiplier_percent: 120,
            extra_expense_amount: 0.0,
            extra_expense_month_index: 1,
        };

        let series = generate_projection(date("2026-01-15"), &inputs, &scenario);
        assert_eq!(series[0].income, 1800.0 + 500.0);
        assert_eq!(series[0].expense, 1200.0 + 50.0);
        assert_eq!(series[1].expense, 1250.0);
    }

    #[test]
    fn test_extra_expense_lands_in_one_month() {
        let scenario = ScenarioParameters {
            horizon_months: 6,
            extra_expense_amount: 1000.0,
            extra_expense_month_index: 3,
            ..Default::default()
        };
        let series = generate_projection(date("2026-01-15"), &inputs(3000.0, 2000.0, 0.0), &scenario);

        for month in &series {
            if month.month_index == 3 {
                assert_eq!(month.expense, 3000.0);
            } else {
                assert_eq!(month.expense, 2000.0);
            }
        }
    }

    #[test]
    fn test_extra_expense_out_of_range_is_ignored() {
        for index in [0, 7, 100] {
            let scenario = ScenarioParameters {
                horizon_months: 6,
                extra_expense_amount: 1000.0,
                extra_expense_month_index: index,
                ..Default::default()
            };
            let series =
                generate_projection(date("2026-01-15"), &inputs(3000.0, 2000.0, 0.0), &scenario);
            assert!(series.iter().all(|m| m.expense == 2000.0));
        }
    }

    #[test]
    fn test_negative_months_do_not_reduce_savings() {
        let scenario = ScenarioParameters {
            horizon_months: 4,
            extra_expense_amount: 5000.0,
            extra_expense_month_index: 2,
            ..Default::default()
        };
        let series = generate_projection(date("2026-01-15"), &inputs(3000.0, 2000.0, -100.0), &scenario);

        assert_eq!(series[1].balance, -4000.0);
        let savings: Vec<f64> = series.iter().map(|m| m.accumulated_savings).collect();
        assert_eq!(savings, vec![1000.0, 1000.0, 2000.0, 3000.0]);

        let mut previous = -100.0;
        for month in &series {
            assert_eq!(month.accumulated_balance, previous + month.balance);
            previous = month.accumulated_balance;
        }
    }

    #[test]
    fn test_zero_horizon_is_empty() {
        let series = generate_projection(date("2026-01-15"), &inputs(1.0, 1.0, 0.0), &scenario(0));
        assert!(series.is_empty());
    }
}
