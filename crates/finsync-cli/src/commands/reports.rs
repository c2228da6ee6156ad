//! Dashboard, budget and report command implementations

use anyhow::Result;
use chrono::NaiveDate;
use finsync_core::config::FinsyncConfig;
use finsync_core::models::YearMonth;
use finsync_core::reports::{
    budget_report, category_breakdown, daily_breakdown, monthly_summary, BudgetStatus,
    CategoryAmount,
};
use finsync_core::TransactionStore;

fn trend(percent: i64) -> String {
    if percent >= 0 {
        format!("▲ {}%", percent)
    } else {
        format!("▼ {}%", percent.abs())
    }
}

pub fn cmd_dashboard<S: TransactionStore>(store: &S, today: NaiveDate) -> Result<()> {
    let transactions = store.list()?;
    let summary = monthly_summary(&transactions, today);

    println!();
    println!("📊 {}", summary.month_label);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Income:   ${:>10.2}  {} vs {}",
        summary.current.income,
        trend(summary.income_trend),
        summary.previous_month_label
    );
    println!(
        "   Expenses: ${:>10.2}  {}",
        summary.current.expense,
        trend(summary.expense_trend)
    );
    println!(
        "   Balance:  ${:>10.2}  {}",
        summary.current.balance,
        trend(summary.balance_trend)
    );

    if summary.unpaid_expenses > 0 || summary.pending_income > 0 {
        println!();
        println!("   Unpaid expenses: {}", summary.unpaid_expenses);
        println!("   Pending income: {}", summary.pending_income);
    }

    Ok(())
}

pub fn cmd_budgets<S: TransactionStore>(
    store: &S,
    config: &FinsyncConfig,
    today: NaiveDate,
) -> Result<()> {
    let transactions = store.list()?;
    let report = budget_report(&transactions, &config.budgets, today);

    println!();
    println!("💰 Budgets for {}", report.month);
    println!("   ─────────────────────────────────────────────────────────────");

    if report.lines.is_empty() {
        println!("   No budgets configured. Add a [budgets] table to your config.");
        return Ok(());
    }

    fn status_icon(status: BudgetStatus) -> &'static str {
        match status {
            BudgetStatus::OnTrack => "🟢",
            BudgetStatus::NearLimit => "🟡",
            BudgetStatus::Over => "🔴",
        }
    }

    for line in &report.lines {
        println!(
            "   {} {:16} ${:>9.2} of ${:>9.2} ({:>3}%)",
            status_icon(line.status),
            line.label,
            line.spent,
            line.limit,
            line.percentage
        );
    }

    println!();
    println!(
        "   {} Total: ${:.2} of ${:.2} ({}%)",
        status_icon(report.status),
        report.total_spent,
        report.total_limit,
        report.percentage
    );

    Ok(())
}

pub fn cmd_report_categories<S: TransactionStore>(store: &S, month: YearMonth) -> Result<()> {
    let transactions = store.list()?;
    let breakdown = category_breakdown(&transactions, month);

    println!();
    println!("📊 Categories for {}", month.label());
    println!("   ─────────────────────────────────────────────────────────────");

    if breakdown.income.is_empty() && breakdown.expense.is_empty() {
        println!("   No transactions found in this month.");
        return Ok(());
    }

    fn print_section(title: &str, rows: &[CategoryAmount]) {
        if rows.is_empty() {
            return;
        }
        let total: f64 = rows.iter().map(|r| r.amount).sum();
        println!("   {} (${:.2})", title, total);
        for row in rows {
            let share = if total > 0.0 {
                row.amount / total * 100.0
            } else {
                0.0
            };
            println!("     {:16} │ {:>10.2} │ {:>5.1}%", row.label, row.amount, share);
        }
    }

    print_section("Income", &breakdown.income);
    print_section("Expenses", &breakdown.expense);

    Ok(())
}

pub fn cmd_report_daily<S: TransactionStore>(store: &S, month: YearMonth) -> Result<()> {
    let transactions = store.list()?;
    let days = daily_breakdown(&transactions, month);

    println!();
    println!("📅 Daily report for {}", month.label());
    println!("   {:10} │ {:>10} │ {:>10} │ {:>10}", "Date", "Income", "Expense", "Balance");
    println!("   ───────────┼────────────┼────────────┼────────────");

    for day in days
        .iter()
        .filter(|d| d.income != 0.0 || d.expense != 0.0)
    {
        println!(
            "   {} │ {:>10.2} │ {:>10.2} │ {:>10.2}",
            day.date, day.income, day.expense, day.balance
        );
    }

    Ok(())
}
