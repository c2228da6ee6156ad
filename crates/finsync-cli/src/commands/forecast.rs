//! Forecast command implementation

use anyhow::Result;
use chrono::NaiveDate;
use finsync_core::config::FinsyncConfig;
use finsync_core::forecast::{Forecaster, HealthStatus, ScenarioParameters};
use finsync_core::TransactionStore;

/// Scenario flags from the command line; unset flags use the config defaults
#[derive(Debug, Default)]
pub struct ForecastOptions {
    pub months: Option<u32>,
    pub income: Option<i32>,
    pub expenses: Option<i32>,
    pub extra: Option<f64>,
    pub extra_month: Option<u32>,
}

impl ForecastOptions {
    pub fn scenario(&self, defaults: ScenarioParameters) -> ScenarioParameters {
        ScenarioParameters {
            horizon_months: self.months.unwrap_or(defaults.horizon_months),
            income_multiplier_percent: self.income.unwrap_or(defaults.income_multiplier_percent),
            expense_multiplier_percent: self
                .expenses
                .unwrap_or(defaults.expense_multiplier_percent),
            extra_expense_amount: self.extra.unwrap_or(defaults.extra_expense_amount),
            extra_expense_month_index: self
                .extra_month
                .unwrap_or(defaults.extra_expense_month_index),
        }
    }
}

fn health_icon(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Critical => "🔴",
        HealthStatus::Warning => "🟠",
        HealthStatus::Caution => "🟡",
        HealthStatus::Good => "🟢",
    }
}

pub fn cmd_forecast<S: TransactionStore>(
    store: &S,
    config: &FinsyncConfig,
    options: &ForecastOptions,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let scenario = options.scenario(config.forecast);
    let result = Forecaster::new(store).run(today, &scenario)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let s = &result.scenario;
    println!();
    println!("🔮 Cash-Flow Forecast ({} months from {})", s.horizon_months, today);
    println!(
        "   Income {}% │ Expenses {}% │ Extra ${:.2} in month {}",
        s.income_multiplier_percent,
        s.expense_multiplier_percent,
        s.extra_expense_amount,
        s.extra_expense_month_index
    );
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   History: {} month(s) │ Avg income ${:.2} │ Avg expense ${:.2}",
        result.averages.months_counted, result.averages.avg_income, result.averages.avg_expense
    );
    println!(
        "   Recurring: +${:.2} / -${:.2} │ This month so far: ${:.2}",
        result.recurring.income, result.recurring.expense, result.anchor_balance
    );
    println!();
    println!(
        "   {:16} │ {:>11} │ {:>11} │ {:>11} │ {:>12} │ {:>11}",
        "Month", "Income", "Expense", "Balance", "Accumulated", "Savings"
    );
    println!("   ─────────────────┼─────────────┼─────────────┼─────────────┼──────────────┼─────────────");

    for m in &result.months {
        let balance = if m.balance < 0.0 {
            format!("\x1b[31m{:>11.2}\x1b[0m", m.balance)
        } else {
            format!("{:>11.2}", m.balance)
        };
        println!(
            "   {:16} │ {:>11.2} │ {:>11.2} │ {} │ {:>12.2} │ {:>11.2}",
            m.month_label, m.income, m.expense, balance, m.accumulated_balance, m.accumulated_savings
        );
    }

    println!();
    println!("   End balance: ${:.2}", result.summary.end_balance);
    println!("   Total savings: ${:.2}", result.summary.total_savings);
    println!("   Negative months: {}", result.summary.months_negative);
    println!();
    println!(
        "{} {}",
        health_icon(result.health.status),
        result.health.title
    );
    println!("   {}", result.health.message);

    if !result.tips.is_empty() {
        println!();
        println!("💡 Tips");
        for tip in &result.tips {
            println!("   • {}: {}", tip.title, tip.message);
        }
    }

    Ok(())
}
