//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_store` / `load_settings` - Shared utilities for the other commands
//! - `resolve_as_of` / `resolve_month` - Date argument parsing
//! - `cmd_init` - Create the transaction file

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use finsync_core::config::FinsyncConfig;
use finsync_core::models::YearMonth;
use finsync_core::sample::sample_transactions;
use finsync_core::JsonFileStore;
use tracing::debug;

/// Open the JSON transaction file (a missing file reads as empty)
pub fn open_store(data_path: &Path) -> JsonFileStore {
    debug!(path = %data_path.display(), "Opening transaction file");
    JsonFileStore::new(data_path)
}

/// Load configuration from `--config`, the override location, or defaults
pub fn load_settings(config_path: Option<&Path>) -> Result<FinsyncConfig> {
    FinsyncConfig::load(config_path).context("Failed to load configuration")
}

/// Parse `--as-of`, defaulting to today
pub fn resolve_as_of(as_of: Option<&str>) -> Result<NaiveDate> {
    match as_of {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --as-of date format (use YYYY-MM-DD)"),
        None => Ok(Local::now().date_naive()),
    }
}

/// Parse `--month`, defaulting to the current month
pub fn resolve_month(month: Option<&str>) -> Result<YearMonth> {
    match month {
        Some(s) => s.parse().map_err(|e: String| anyhow::anyhow!(e)),
        None => Ok(YearMonth::from_date(Local::now().date_naive())),
    }
}

pub fn cmd_init(data_path: &Path, sample: bool, force: bool) -> Result<()> {
    println!("🔧 Initializing transaction file at {}...", data_path.display());

    let store = open_store(data_path);
    if store.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            data_path.display()
        );
    }

    let transactions = if sample {
        let month = YearMonth::from_date(Local::now().date_naive());
        sample_transactions(month)
    } else {
        Vec::new()
    };

    store
        .save_all(&transactions)
        .context("Failed to write transaction file")?;

    if sample {
        println!("   Seeded {} demo transactions", transactions.len());
    }

    println!("✅ Transaction file initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Import transactions: finsync import --file transactions.csv");
    println!("  2. See where you are heading: finsync forecast");

    Ok(())
}
