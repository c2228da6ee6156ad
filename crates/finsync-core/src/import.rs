//! CSV import
//!
//! Expected header (extra columns after `recurring` are optional):
//!
//! ```text
//! date,title,amount,type,category,recurring,paid,due_date,source,notes
//! ```
//!
//! Columns are matched by name, case-insensitively, so their order may vary.

use std::io::Read;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Category, NewTransaction, TransactionType};
use crate::store::{transaction_id, TransactionWriter};

/// Outcome of an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub imported: usize,
    /// Rows whose id was already present
    pub skipped: usize,
}

const REQUIRED_COLUMNS: [&str; 6] = ["date", "title", "amount", "type", "category", "recurring"];

/// Column positions resolved from the header row
struct Columns {
    date: usize,
    title: usize,
    amount: usize,
    kind: usize,
    category: usize,
    recurring: usize,
    paid: Option<usize>,
    due_date: Option<usize>,
    source: Option<usize>,
    notes: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| Error::Import(format!("Missing column: {}", name)))
        };

        Ok(Self {
            date: require(REQUIRED_COLUMNS[0])?,
            title: require(REQUIRED_COLUMNS[1])?,
            amount: require(REQUIRED_COLUMNS[2])?,
            kind: require(REQUIRED_COLUMNS[3])?,
            category: require(REQUIRED_COLUMNS[4])?,
            recurring: require(REQUIRED_COLUMNS[5])?,
            paid: find("paid"),
            due_date: find("due_date"),
            source: find("source"),
            notes: find("notes"),
        })
    }
}

fn field<'r>(record: &'r StringRecord, index: usize, name: &str, line: u64) -> Result<&'r str> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| Error::Import(format!("Line {}: missing {}", line, name)))
}

fn optional_field(record: &StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse CSV rows into transactions, without touching any store
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<NewTransaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let mut transactions = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        // Blank trailing lines come through as a single empty field
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let date = parse_date(field(&record, columns.date, "date", line)?)?;
        let title = field(&record, columns.title, "title", line)?.to_string();
        if title.is_empty() {
            return Err(Error::Import(format!("Line {}: title must not be empty", line)));
        }
        let amount = parse_amount(field(&record, columns.amount, "amount", line)?)?;
        let kind: TransactionType = field(&record, columns.kind, "type", line)?
            .parse()
            .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;
        let category: Category = field(&record, columns.category, "category", line)?
            .parse()
            .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;
        let is_recurring = parse_bool(field(&record, columns.recurring, "recurring", line)?)?;

        let is_paid = match optional_field(&record, columns.paid) {
            Some(s) => parse_bool(&s)?,
            None => true,
        };
        let due_date = optional_field(&record, columns.due_date)
            .map(|s| parse_date(&s))
            .transpose()?;

        if category.kind() != kind {
            return Err(Error::Import(format!(
                "Line {}: category '{}' is an {} category, not {}",
                line,
                category,
                category.kind(),
                kind
            )));
        }

        transactions.push(NewTransaction {
            title,
            amount,
            kind,
            category,
            date,
            due_date,
            is_paid,
            is_recurring,
            is_variable: None,
            source: optional_field(&record, columns.source),
            notes: optional_field(&record, columns.notes),
        });
    }

    debug!(count = transactions.len(), "Parsed CSV rows");
    Ok(transactions)
}

/// Parse and store CSV rows. Rows already present (same id) are skipped.
///
/// The file is parsed in full and written as one batch: a bad row anywhere
/// fails the import with nothing stored.
pub fn import_csv<R: Read, W: TransactionWriter + ?Sized>(
    reader: R,
    store: &W,
) -> Result<ImportStats> {
    let rows: Vec<_> = parse_csv(reader)?
        .into_iter()
        .map(|new| {
            let id = transaction_id(&new);
            new.with_id(id)
        })
        .collect();
    let total = rows.len();

    let imported = store.insert_many(rows)?;
    let stats = ImportStats {
        imported,
        skipped: total - imported,
    };

    info!(
        imported = stats.imported,
        skipped = stats.skipped,
        "CSV import complete"
    );
    Ok(stats)
}

/// Parse a date string (`YYYY-MM-DD` or `MM/DD/YYYY`)
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d", // 2026-01-15
        "%m/%d/%Y", // 01/15/2026
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and thousands separators.
/// Amounts are magnitudes; the type column carries the direction.
pub fn parse_amount(s: &str) -> Result<f64> {
    let cleaned = s.trim().replace(['$', ',', ' '], "");

    let amount = cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))?;

    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::Import(format!(
            "Amount must be a non-negative number: {}",
            s
        )));
    }
    Ok(amount)
}

fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" | "" => Ok(false),
        other => Err(Error::Import(format!("Unable to parse flag: {}", other))),
    }
}
