//! Transaction command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use finsync_core::models::{
    Category, NewTransaction, Transaction, TransactionFilter, TransactionType,
};
use finsync_core::{TransactionStore, TransactionWriter};

use super::{resolve_as_of, truncate};

/// Arguments for `transactions add`
pub struct AddArgs {
    pub title: String,
    pub amount: f64,
    pub kind: String,
    pub category: String,
    pub date: Option<String>,
    pub recurring: bool,
    pub unpaid: bool,
    pub due: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
}

fn format_amount(tx: &Transaction) -> String {
    match tx.kind {
        TransactionType::Expense => format!("\x1b[31m-${:.2}\x1b[0m", tx.amount), // Red for expenses
        TransactionType::Income => format!("\x1b[32m+${:.2}\x1b[0m", tx.amount), // Green for income
    }
}

fn print_row(tx: &Transaction) {
    let flags = format!(
        "{}{}",
        if tx.is_recurring { "↻" } else { " " },
        if tx.is_paid { " " } else { "!" }
    );
    println!(
        "   [{}] {} │ {:>12} │ {} │ {:14} │ {}",
        tx.id,
        tx.date,
        format_amount(tx),
        flags,
        tx.category.label(),
        truncate(&tx.title, 30)
    );
}

pub fn cmd_transactions_list<S: TransactionStore>(
    store: &S,
    limit: usize,
    kind: Option<&str>,
    category: Option<&str>,
    unpaid_only: bool,
) -> Result<()> {
    let filter = TransactionFilter {
        kind: kind
            .map(str::parse::<TransactionType>)
            .transpose()
            .map_err(|e| anyhow::anyhow!(e))?,
        category: category
            .map(str::parse::<Category>)
            .transpose()
            .map_err(|e| anyhow::anyhow!(e))?,
        is_paid: unpaid_only.then_some(false),
        ..Default::default()
    };

    let all = store.list()?;
    let mut transactions = filter.apply(&all);

    if transactions.is_empty() {
        println!("No transactions found. Import some with:");
        println!("  finsync import --file transactions.csv");
        return Ok(());
    }

    transactions.sort_by(|a, b| b.date.cmp(&a.date));

    println!();
    println!(
        "📝 Transactions ({} of {})",
        transactions.len().min(limit),
        transactions.len()
    );
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions.into_iter().take(limit) {
        print_row(tx);
    }

    println!();
    println!("   ↻ recurring   ! unpaid");

    Ok(())
}

fn parse_date_arg(value: Option<&str>, flag: &str) -> Result<Option<NaiveDate>> {
    value
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD)", flag))
}

pub fn cmd_transactions_add<W: TransactionWriter>(store: &W, args: AddArgs) -> Result<()> {
    let kind: TransactionType = args.kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let category: Category = args
        .category
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let date = match parse_date_arg(args.date.as_deref(), "--date")? {
        Some(date) => date,
        None => resolve_as_of(None)?,
    };

    let tx = store
        .add(NewTransaction {
            title: args.title,
            amount: args.amount,
            kind,
            category,
            date,
            due_date: parse_date_arg(args.due.as_deref(), "--due")?,
            is_paid: !args.unpaid,
            is_recurring: args.recurring,
            is_variable: None,
            source: args.source,
            notes: args.notes,
        })
        .context("Failed to add transaction")?;

    println!("✅ Added transaction {}:", tx.id);
    print_row(&tx);

    Ok(())
}

pub fn cmd_transactions_delete<W: TransactionWriter>(store: &W, id: &str) -> Result<()> {
    let tx = store
        .get(id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    store.delete(id)?;

    println!("✅ Deleted transaction {}:", id);
    println!(
        "   {} │ ${:.2} │ {}",
        tx.date,
        tx.amount,
        truncate(&tx.title, 40)
    );

    Ok(())
}

pub fn cmd_transactions_paid<W: TransactionWriter>(store: &W, id: &str) -> Result<()> {
    let existing = store
        .get(id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    if existing.is_paid {
        println!("Transaction {} is already marked paid.", id);
        return Ok(());
    }

    let tx = store.mark_paid(id)?;
    println!("✅ Marked transaction {} as paid:", id);
    print_row(&tx);

    Ok(())
}
