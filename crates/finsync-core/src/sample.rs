//! Demo dataset used by `finsync init --sample`

use chrono::NaiveDate;

use crate::models::{Category, Transaction, TransactionType, YearMonth};

struct SampleRow {
    id: &'static str,
    title: &'static str,
    amount: f64,
    kind: TransactionType,
    category: Category,
    day: u32,
    due_day: Option<u32>,
    is_paid: bool,
    is_recurring: bool,
    source: Option<&'static str>,
}

const ROWS: &[SampleRow] = &[
    SampleRow {
        id: "1",
        title: "Monthly Salary",
        amount: 5000.0,
        kind: TransactionType::Income,
        category: Category::Salary,
        day: 5,
        due_day: None,
        is_paid: true,
        is_recurring: true,
        source: Some("Company XYZ"),
    },
    SampleRow {
        id: "2",
        title: "Rent",
        amount: 1200.0,
        kind: TransactionType::Expense,
        category: Category::Housing,
        day: 10,
        due_day: Some(15),
        is_paid: true,
        is_recurring: true,
        source: None,
    },
    SampleRow {
        id: "3",
        title: "Groceries",
        amount: 450.0,
        kind: TransactionType::Expense,
        category: Category::Food,
        day: 8,
        due_day: None,
        is_paid: true,
        is_recurring: false,
        source: None,
    },
    SampleRow {
        id: "4",
        title: "Internet + TV",
        amount: 200.0,
        kind: TransactionType::Expense,
        category: Category::Utilities,
        day: 20,
        due_day: Some(22),
        is_paid: false,
        is_recurring: true,
        source: None,
    },
    SampleRow {
        id: "5",
        title: "Dividends",
        amount: 350.0,
        kind: TransactionType::Income,
        category: Category::Investment,
        day: 15,
        due_day: None,
        is_paid: false,
        is_recurring: false,
        source: Some("Stocks"),
    },
    SampleRow {
        id: "6",
        title: "Gym",
        amount: 100.0,
        kind: TransactionType::Expense,
        category: Category::Personal,
        day: 1,
        due_day: None,
        is_paid: true,
        is_recurring: true,
        source: None,
    },
    SampleRow {
        id: "7",
        title: "Fuel",
        amount: 300.0,
        kind: TransactionType::Expense,
        category: Category::Transportation,
        day: 12,
        due_day: None,
        is_paid: true,
        is_recurring: false,
        source: None,
    },
    SampleRow {
        id: "8",
        title: "Online Course",
        amount: 80.0,
        kind: TransactionType::Expense,
        category: Category::Education,
        day: 18,
        due_day: None,
        is_paid: true,
        is_recurring: false,
        source: None,
    },
];

fn day_in(month: YearMonth, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(month.year(), month.month(), day).unwrap_or_else(|| month.last_day())
}

/// Eight demo transactions dated inside `month`
pub fn sample_transactions(month: YearMonth) -> Vec<Transaction> {
    ROWS.iter()
        .map(|row| Transaction {
            id: row.id.to_string(),
            title: row.title.to_string(),
            amount: row.amount,
            kind: row.kind,
            category: row.category,
            date: day_in(month, row.day),
            due_date: row.due_day.map(|d| day_in(month, d)),
            is_paid: row.is_paid,
            is_recurring: row.is_recurring,
            is_variable: None,
            source: row.source.map(str::to_string),
            notes: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_dates_land_in_month() {
        let month = YearMonth::new(2025, 4).unwrap();
        let txs = sample_transactions(month);

        assert_eq!(txs.len(), 8);
        assert!(txs.iter().all(|t| month.contains(t.date)));
        assert_eq!(txs.iter().filter(|t| t.is_recurring).count(), 4);
        assert_eq!(
            txs[1].due_date,
            Some(NaiveDate::from_ymd_opt(2025, 4, 15).unwrap())
        );
    }
}
