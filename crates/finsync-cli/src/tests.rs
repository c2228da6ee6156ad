//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::PathBuf;

use finsync_core::config::FinsyncConfig;
use finsync_core::models::{Category, TransactionType, YearMonth};
use finsync_core::test_utils::{date, expense, income};
use finsync_core::{MemoryStore, TransactionStore};
use tempfile::TempDir;

use crate::commands::{self, truncate, AddArgs, ForecastOptions};

fn setup_test_store() -> MemoryStore {
    MemoryStore::with_transactions(vec![
        income("pay-mar", 3000.0, "2026-03-05"),
        expense("rent-mar", 1200.0, "2026-03-10"),
        income("pay-apr", 3000.0, "2026-04-05"),
        expense("rent-apr", 1200.0, "2026-04-10"),
    ])
}

fn data_file(dir: &TempDir) -> PathBuf {
    dir.path().join("finsync.json")
}

fn add_args(title: &str, amount: f64, kind: &str, category: &str) -> AddArgs {
    AddArgs {
        title: title.to_string(),
        amount,
        kind: kind.to_string(),
        category: category.to_string(),
        date: Some("2026-04-12".to_string()),
        recurring: false,
        unpaid: false,
        due: None,
        source: None,
        notes: None,
    }
}

// ========== Init & Import Tests ==========

#[test]
fn test_cmd_init_creates_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);

    commands::cmd_init(&path, false, false).unwrap();

    let store = commands::open_store(&path);
    assert!(store.exists());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_cmd_init_sample_and_force() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);

    commands::cmd_init(&path, true, false).unwrap();
    assert_eq!(commands::open_store(&path).list().unwrap().len(), 8);

    // Refuses to clobber without --force
    assert!(commands::cmd_init(&path, false, false).is_err());
    assert_eq!(commands::open_store(&path).list().unwrap().len(), 8);

    commands::cmd_init(&path, false, true).unwrap();
    assert!(commands::open_store(&path).list().unwrap().is_empty());
}

#[test]
fn test_cmd_import() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);
    let csv_path = dir.path().join("import.csv");
    fs::write(
        &csv_path,
        "date,title,amount,type,category,recurring\n\
         2026-04-01,Salary,5000,income,salary,true\n\
         2026-04-03,Groceries,$120.50,expense,food,false\n",
    )
    .unwrap();

    commands::cmd_import(&path, &csv_path).unwrap();
    commands::cmd_import(&path, &csv_path).unwrap();

    let txs = commands::open_store(&path).list().unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[1].amount, 120.5);
}

#[test]
fn test_cmd_import_rejects_mismatched_category() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);
    let csv_path = dir.path().join("import.csv");
    fs::write(
        &csv_path,
        "date,title,amount,type,category,recurring\n\
         2026-04-01,Salary,5000,income,salary,true\n\
         2026-04-03,Paycheck,120,expense,salary,false\n",
    )
    .unwrap();

    assert!(commands::cmd_import(&path, &csv_path).is_err());
    assert!(commands::open_store(&path).list().unwrap().is_empty());
}

#[test]
fn test_cmd_import_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = commands::cmd_import(&data_file(&dir), &dir.path().join("nope.csv"));
    assert!(result.is_err());
}

// ========== Transaction Command Tests ==========

#[test]
fn test_cmd_transactions_list() {
    let store = setup_test_store();
    assert!(commands::cmd_transactions_list(&store, 20, None, None, false).is_ok());
    assert!(commands::cmd_transactions_list(&store, 20, Some("income"), None, true).is_ok());
    assert!(commands::cmd_transactions_list(&store, 20, Some("bogus"), None, false).is_err());
}

#[test]
fn test_cmd_transactions_add() {
    let store = MemoryStore::new();

    let mut args = add_args("Internet + TV", 200.0, "expense", "utilities");
    args.recurring = true;
    args.unpaid = true;
    args.due = Some("2026-04-22".to_string());
    commands::cmd_transactions_add(&store, args).unwrap();

    let txs = store.list().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].kind, TransactionType::Expense);
    assert_eq!(txs[0].category, Category::Utilities);
    assert_eq!(txs[0].date, date("2026-04-12"));
    assert_eq!(txs[0].due_date, Some(date("2026-04-22")));
    assert!(txs[0].is_recurring);
    assert!(!txs[0].is_paid);
}

#[test]
fn test_cmd_transactions_add_rejects_mismatched_category() {
    let store = MemoryStore::new();
    let result = commands::cmd_transactions_add(&store, add_args("Pay", 10.0, "expense", "salary"));
    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("income category"));
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_cmd_transactions_add_rejects_negative_amount() {
    let store = MemoryStore::new();
    let result = commands::cmd_transactions_add(&store, add_args("Food", -10.0, "expense", "food"));
    assert!(result.is_err());
}

#[test]
fn test_cmd_transactions_paid_and_delete() {
    let store = MemoryStore::with_transactions(vec![{
        let mut tx = expense("bill", 80.0, "2026-04-02");
        tx.is_paid = false;
        tx
    }]);

    commands::cmd_transactions_paid(&store, "bill").unwrap();
    assert!(store.get("bill").unwrap().unwrap().is_paid);

    // Already paid is not an error
    commands::cmd_transactions_paid(&store, "bill").unwrap();

    commands::cmd_transactions_delete(&store, "bill").unwrap();
    assert!(store.list().unwrap().is_empty());

    assert!(commands::cmd_transactions_delete(&store, "bill").is_err());
    assert!(commands::cmd_transactions_paid(&store, "bill").is_err());
}

// ========== Forecast & Report Tests ==========

#[test]
fn test_forecast_options_override_defaults() {
    let config = FinsyncConfig::default();
    let options = ForecastOptions {
        months: Some(6),
        extra: Some(1500.0),
        ..Default::default()
    };

    let scenario = options.scenario(config.forecast);
    assert_eq!(scenario.horizon_months, 6);
    assert_eq!(scenario.extra_expense_amount, 1500.0);
    assert_eq!(scenario.income_multiplier_percent, 100);
    assert_eq!(scenario.extra_expense_month_index, 6);
}

#[test]
fn test_cmd_forecast() {
    let store = setup_test_store();
    let config = FinsyncConfig::default();
    let today = date("2026-04-20");

    assert!(commands::cmd_forecast(&store, &config, &ForecastOptions::default(), today, false).is_ok());

    let options = ForecastOptions {
        months: Some(500),
        expenses: Some(300),
        ..Default::default()
    };
    assert!(commands::cmd_forecast(&store, &config, &options, today, true).is_ok());
}

#[test]
fn test_cmd_dashboard_and_budgets() {
    let store = setup_test_store();
    let config = FinsyncConfig::default();
    let today = date("2026-04-20");

    assert!(commands::cmd_dashboard(&store, today).is_ok());
    assert!(commands::cmd_budgets(&store, &config, today).is_ok());

    let empty = FinsyncConfig {
        budgets: Default::default(),
        ..FinsyncConfig::default()
    };
    assert!(commands::cmd_budgets(&store, &empty, today).is_ok());
}

#[test]
fn test_cmd_reports() {
    let store = setup_test_store();
    let april = YearMonth::new(2026, 4).unwrap();

    assert!(commands::cmd_report_categories(&store, april).is_ok());
    assert!(commands::cmd_report_daily(&store, april).is_ok());
    assert!(commands::cmd_report_categories(&MemoryStore::new(), april).is_ok());
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_resolve_as_of() {
    assert_eq!(
        commands::resolve_as_of(Some("2026-04-20")).unwrap(),
        date("2026-04-20")
    );
    assert!(commands::resolve_as_of(Some("04/20/2026")).is_err());
    assert!(commands::resolve_as_of(None).is_ok());
}

#[test]
fn test_resolve_month() {
    assert_eq!(
        commands::resolve_month(Some("2026-02")).unwrap(),
        YearMonth::new(2026, 2).unwrap()
    );
    assert!(commands::resolve_month(Some("2026-00")).is_err());
    assert!(commands::resolve_month(Some("February")).is_err());
    assert!(commands::resolve_month(Some("300000-01")).is_err());
}

#[test]
fn test_config_commands() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("finsync.toml");
    fs::write(&path, "[forecast]\nhorizon_months = 24\n").unwrap();

    assert!(commands::cmd_config_show(Some(&path)).is_ok());
    assert!(commands::cmd_config_path(Some(&path)).is_ok());

    fs::write(&path, "[forecast\n").unwrap();
    assert!(commands::cmd_config_show(Some(&path)).is_err());

    let missing = dir.path().join("typo.toml");
    assert!(commands::cmd_config_show(Some(&missing)).is_err());
    assert!(commands::cmd_config_path(Some(&missing)).is_err());
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly10!", 10), "exactly10!");
    assert_eq!(truncate("this is a long title", 10), "this is...");
    assert_eq!(truncate("café au lait", 6), "caf...");
}
