//! Test utilities for finsync-core
//!
//! Small builders so tests can state transactions in one line.

use chrono::NaiveDate;

use crate::models::{Category, NewTransaction, Transaction, TransactionType};

/// Parse a `YYYY-MM-DD` literal
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn default_category(kind: TransactionType) -> Category {
    match kind {
        TransactionType::Income => Category::Salary,
        TransactionType::Expense => Category::OtherExpense,
    }
}

/// A new (id-less) transaction with sensible defaults
pub fn new_tx(title: &str, amount: f64, kind: TransactionType, on: &str) -> NewTransaction {
    NewTransaction {
        title: title.to_string(),
        amount,
        kind,
        category: default_category(kind),
        date: date(on),
        due_date: None,
        is_paid: true,
        is_recurring: false,
        is_variable: None,
        source: None,
        notes: None,
    }
}

/// A stored, non-recurring transaction
pub fn tx(id: &str, amount: f64, kind: TransactionType, on: &str) -> Transaction {
    new_tx(id, amount, kind, on).with_id(id)
}

pub fn income(id: &str, amount: f64, on: &str) -> Transaction {
    tx(id, amount, TransactionType::Income, on)
}

pub fn expense(id: &str, amount: f64, on: &str) -> Transaction {
    tx(id, amount, TransactionType::Expense, on)
}

/// A stored transaction flagged as recurring
pub fn recurring(id: &str, amount: f64, kind: TransactionType, on: &str) -> Transaction {
    Transaction {
        is_recurring: true,
        ..tx(id, amount, kind, on)
    }
}

/// Same as [`expense`] but in a specific category
pub fn expense_in(id: &str, amount: f64, category: Category, on: &str) -> Transaction {
    Transaction {
        category,
        ..expense(id, amount, on)
    }
}
