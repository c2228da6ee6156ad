//! Recurring transaction totals

use crate::models::{Transaction, TransactionType};

use super::types::RecurringTotals;

/// Sum every recurring transaction by type.
///
/// No date filter: a recurring item is assumed to repeat each future month at
/// its recorded amount, however old the record is.
pub fn recurring_totals(transactions: &[Transaction]) -> RecurringTotals {
    transactions
        .iter()
        .filter(|tx| tx.is_recurring)
        .fold(RecurringTotals::default(), |mut totals, tx| {
            match tx.kind {
                TransactionType::Income => totals.income += tx.amount,
                TransactionType::Expense => totals.expense += tx.amount,
            }
            totals
        })
}
