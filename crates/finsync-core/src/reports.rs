//! Dashboard reports: monthly summary, category and daily breakdowns, budgets

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Category, Transaction, TransactionType, YearMonth};

/// Round a percentage the way the dashboard displays it (halves round up)
fn round_percent(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthTotals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Income, expense and balance for one calendar month
pub fn month_totals(transactions: &[Transaction], month: YearMonth) -> MonthTotals {
    let (income, expense) = transactions
        .iter()
        .filter(|tx| month.contains(tx.date))
        .fold((0.0, 0.0), |(inc, exp), tx| match tx.kind {
            TransactionType::Income => (inc + tx.amount, exp),
            TransactionType::Expense => (inc, exp + tx.amount),
        });
    MonthTotals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Current month at a glance, with trends against the previous month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: YearMonth,
    pub month_label: String,
    pub previous_month_label: String,
    pub current: MonthTotals,
    pub previous: MonthTotals,
    /// Percent change in income (100 when there was no income last month)
    pub income_trend: i64,
    /// Percent change in expense (0 when there was no expense last month)
    pub expense_trend: i64,
    /// Percent change in balance relative to the size of last month's balance
    pub balance_trend: i64,
    /// Expenses not yet paid, across all dates
    pub unpaid_expenses: usize,
    /// Income not yet received, across all dates
    pub pending_income: usize,
}

pub fn monthly_summary(transactions: &[Transaction], today: NaiveDate) -> MonthlySummary {
    let month = YearMonth::from_date(today);
    let previous_month = month.previous();
    let current = month_totals(transactions, month);
    let previous = previous_month
        .map(|m| month_totals(transactions, m))
        .unwrap_or_default();

    let income_trend = if previous.income == 0.0 {
        100
    } else {
        round_percent((current.income - previous.income) / previous.income * 100.0)
    };

    let expense_trend = if previous.expense == 0.0 {
        0
    } else {
        round_percent((current.expense - previous.expense) / previous.expense * 100.0)
    };

    let balance_trend = if previous.balance == 0.0 {
        if current.balance > 0.0 {
            100
        } else {
            0
        }
    } else {
        round_percent((current.balance - previous.balance) / previous.balance.abs() * 100.0)
    };

    MonthlySummary {
        month,
        month_label: month.label(),
        previous_month_label: previous_month.map(|m| m.label()).unwrap_or_default(),
        current,
        previous,
        income_trend,
        expense_trend,
        balance_trend,
        unpaid_expenses: transactions
            .iter()
            .filter(|t| t.is_expense() && !t.is_paid)
            .count(),
        pending_income: transactions
            .iter()
            .filter(|t| t.is_income() && !t.is_paid)
            .count(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAmount {
    pub category: Category,
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub month: YearMonth,
    /// Largest first
    pub income: Vec<CategoryAmount>,
    /// Largest first
    pub expense: Vec<CategoryAmount>,
}

pub fn category_breakdown(transactions: &[Transaction], month: YearMonth) -> CategoryBreakdown {
    let mut income: HashMap<Category, f64> = HashMap::new();
    let mut expense: HashMap<Category, f64> = HashMap::new();

    for tx in transactions.iter().filter(|tx| month.contains(tx.date)) {
        let map = match tx.kind {
            TransactionType::Income => &mut income,
            TransactionType::Expense => &mut expense,
        };
        *map.entry(tx.category).or_insert(0.0) += tx.amount;
    }

    fn sorted(map: HashMap<Category, f64>) -> Vec<CategoryAmount> {
        let mut rows: Vec<CategoryAmount> = map
            .into_iter()
            .map(|(category, amount)| CategoryAmount {
                category,
                label: category.label().to_string(),
                amount,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });
        rows
    }

    CategoryBreakdown {
        month,
        income: sorted(income),
        expense: sorted(expense),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// One row per calendar day of `month`, including days with no activity
pub fn daily_breakdown(transactions: &[Transaction], month: YearMonth) -> Vec<DailyTotals> {
    let mut by_day: BTreeMap<NaiveDate, (f64, f64)> =
        month.days().map(|d| (d, (0.0, 0.0))).collect();

    for tx in transactions {
        if let Some((income, expense)) = by_day.get_mut(&tx.date) {
            match tx.kind {
                TransactionType::Income => *income += tx.amount,
                TransactionType::Expense => *expense += tx.amount,
            }
        }
    }

    by_day
        .into_iter()
        .map(|(date, (income, expense))| DailyTotals {
            date,
            income,
            expense,
            balance: income - expense,
        })
        .collect()
}

/// How much of a budget has been used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// Under 70%
    OnTrack,
    /// 70% to 89%
    NearLimit,
    /// 90% and above
    Over,
}

impl BudgetStatus {
    pub fn from_percentage(percentage: i64) -> Self {
        if percentage < 70 {
            Self::OnTrack
        } else if percentage < 90 {
            Self::NearLimit
        } else {
            Self::Over
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::NearLimit => "near_limit",
            Self::Over => "over",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Percentage of `limit` used, capped at 100 (0 for a zero limit)
pub fn budget_percentage(spent: f64, limit: f64) -> i64 {
    if limit > 0.0 {
        round_percent(spent / limit * 100.0).min(100)
    } else {
        0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    pub category: Category,
    pub label: String,
    pub limit: f64,
    pub spent: f64,
    pub percentage: i64,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReport {
    pub month: YearMonth,
    pub lines: Vec<BudgetLine>,
    pub total_limit: f64,
    pub total_spent: f64,
    pub percentage: i64,
    pub status: BudgetStatus,
}

/// Current-month expense spending against per-category limits.
///
/// Only categories with a limit are reported; spending in other categories
/// does not count toward the totals.
pub fn budget_report(
    transactions: &[Transaction],
    limits: &BTreeMap<Category, f64>,
    today: NaiveDate,
) -> BudgetReport {
    let month = YearMonth::from_date(today);
    let mut spent_by_category: HashMap<Category, f64> = HashMap::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.is_expense() && month.contains(tx.date))
    {
        *spent_by_category.entry(tx.category).or_insert(0.0) += tx.amount;
    }

    let lines: Vec<BudgetLine> = limits
        .iter()
        .map(|(&category, &limit)| {
            let spent = spent_by_category.get(&category).copied().unwrap_or(0.0);
            let percentage = budget_percentage(spent, limit);
            BudgetLine {
                category,
                label: category.label().to_string(),
                limit,
                spent,
                percentage,
                status: BudgetStatus::from_percentage(percentage),
            }
        })
        .collect();

    let total_limit: f64 = lines.iter().map(|l| l.limit).sum();
    let total_spent: f64 = lines.iter().map(|l| l.spent).sum();
    let percentage = budget_percentage(total_spent, total_limit);

    BudgetReport {
        month,
        lines,
        total_limit,
        total_spent,
        percentage,
        status: BudgetStatus::from_percentage(percentage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, expense, expense_in, income};

    #[test]
    fn test_monthly_summary_trends() {
        let txs = vec![
            income("mar-pay", 4000.0, "2026-03-05"),
            expense("mar-rent", 1000.0, "2026-03-10"),
            income("apr-pay", 5000.0, "2026-04-05"),
            expense("apr-rent", 1500.0, "2026-04-10"),
        ];
        let summary = monthly_summary(&txs, date("2026-04-20"));

        assert_eq!(summary.month_label, "April 2026");
        assert_eq!(summary.previous_month_label, "March 2026");
        assert_eq!(summary.current.balance, 3500.0);
        assert_eq!(summary.previous.balance, 3000.0);
        assert_eq!(summary.income_trend, 25);
        assert_eq!(summary.expense_trend, 50);
        assert_eq!(summary.balance_trend, 17);
    }

    #[test]
    fn test_monthly_summary_without_previous_month() {
        let txs = vec![income("pay", 5000.0, "2026-01-05")];
        let summary = monthly_summary(&txs, date("2026-01-20"));

        assert_eq!(summary.previous_month_label, "December 2025");
        assert_eq!(summary.income_trend, 100);
        assert_eq!(summary.expense_trend, 0);
        assert_eq!(summary.balance_trend, 100);
    }

    #[test]
    fn test_monthly_summary_counts_unpaid() {
        let mut unpaid = expense("bill", 200.0, "2025-01-01");
        unpaid.is_paid = false;
        let mut pending = income("dividend", 350.0, "2027-01-01");
        pending.is_paid = false;

        let summary = monthly_summary(&[unpaid, pending], date("2026-04-20"));
        assert_eq!(summary.unpaid_expenses, 1);
        assert_eq!(summary.pending_income, 1);
    }

    #[test]
    fn test_category_breakdown_sorted_desc() {
        let txs = vec![
            expense_in("a", 100.0, Category::Food, "2026-04-01"),
            expense_in("b", 900.0, Category::Housing, "2026-04-02"),
            expense_in("c", 250.0, Category::Food, "2026-04-03"),
            expense_in("other-month", 5000.0, Category::Debt, "2026-05-01"),
            income("pay", 5000.0, "2026-04-05"),
        ];
        let breakdown = category_breakdown(&txs, YearMonth::new(2026, 4).unwrap());

        assert_eq!(breakdown.expense.len(), 2);
        assert_eq!(breakdown.expense[0].category, Category::Housing);
        assert_eq!(breakdown.expense[1].amount, 350.0);
        assert_eq!(breakdown.income[0].label, "Salary");
    }

    #[test]
    fn test_daily_breakdown_covers_every_day() {
        let txs = vec![
            income("pay", 1000.0, "2026-02-01"),
            expense("food", 40.0, "2026-02-01"),
            expense("fuel", 60.0, "2026-02-28"),
        ];
        let days = daily_breakdown(&txs, YearMonth::new(2026, 2).unwrap());

        assert_eq!(days.len(), 28);
        assert_eq!(days[0].balance, 960.0);
        assert_eq!(days[1].income, 0.0);
        assert_eq!(days[27].expense, 60.0);
    }

    #[test]
    fn test_budget_percentage_caps_and_zero_limit() {
        assert_eq!(budget_percentage(50.0, 200.0), 25);
        assert_eq!(budget_percentage(500.0, 200.0), 100);
        assert_eq!(budget_percentage(10.0, 0.0), 0);
        assert_eq!(budget_percentage(1.0, 200.0), 1); // 0.5 rounds up
    }

    #[test]
    fn test_budget_status_thresholds() {
        assert_eq!(BudgetStatus::from_percentage(69), BudgetStatus::OnTrack);
        assert_eq!(BudgetStatus::from_percentage(70), BudgetStatus::NearLimit);
        assert_eq!(BudgetStatus::from_percentage(89), BudgetStatus::NearLimit);
        assert_eq!(BudgetStatus::from_percentage(90), BudgetStatus::Over);
    }

    #[test]
    fn test_budget_report() {
        let limits: BTreeMap<Category, f64> =
            [(Category::Food, 1000.0), (Category::Housing, 2000.0)]
                .into_iter()
                .collect();
        let txs = vec![
            expense_in("a", 750.0, Category::Food, "2026-04-08"),
            expense_in("b", 1900.0, Category::Housing, "2026-04-10"),
            expense_in("c", 300.0, Category::Entertainment, "2026-04-11"),
            expense_in("last-month", 999.0, Category::Food, "2026-03-31"),
        ];
        let report = budget_report(&txs, &limits, date("2026-04-20"));

        assert_eq!(report.lines.len(), 2);
        let food = &report.lines[1];
        assert_eq!(food.category, Category::Food);
        assert_eq!(food.spent, 750.0);
        assert_eq!(food.percentage, 75);
        assert_eq!(food.status, BudgetStatus::NearLimit);
        assert_eq!(report.lines[0].status, BudgetStatus::Over);

        assert_eq!(report.total_limit, 3000.0);
        assert_eq!(report.total_spent, 2650.0);
        assert_eq!(report.percentage, 88);
    }
}
