//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// FinSync - Track cash flow and forecast where it is heading
#[derive(Parser)]
#[command(name = "finsync")]
#[command(about = "Personal finance tracker with cash-flow forecasting", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Transaction file (JSON)
    #[arg(long, default_value = "finsync.json", global = true)]
    pub data: PathBuf,

    /// Config file (defaults to ~/.local/share/finsync/config/finsync.toml,
    /// then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty transaction file
    Init {
        /// Seed with demo transactions for the current month
        #[arg(long)]
        sample: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Import transactions from CSV
    ///
    /// Header: date,title,amount,type,category,recurring[,paid,due_date,source,notes]
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Manage transactions (list, add, delete, paid)
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Project future months from transaction history
    Forecast {
        /// Number of months to project (1-36)
        #[arg(short, long)]
        months: Option<u32>,

        /// Income scale in percent (100 = unchanged)
        #[arg(long)]
        income: Option<i32>,

        /// Expense scale in percent (100 = unchanged)
        #[arg(long)]
        expenses: Option<i32>,

        /// One-time extra expense amount
        #[arg(long)]
        extra: Option<f64>,

        /// Projected month (1-based) that receives the extra expense
        #[arg(long)]
        extra_month: Option<u32>,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<String>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show this month's summary with trends
    Dashboard {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Show this month's spending against budget limits
    Budgets {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Generate reports
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Start the JSON API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Allowed CORS origin (repeatable)
        #[arg(long = "allow-origin")]
        allowed_origins: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Income and expense totals by category
    Categories {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },

    /// Income, expense and balance for each day of a month
    Daily {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List transactions, newest first
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Only income or expense
        #[arg(long = "type")]
        kind: Option<String>,

        /// Only this category
        #[arg(long)]
        category: Option<String>,

        /// Only unpaid transactions
        #[arg(long)]
        unpaid: bool,
    },

    /// Add a transaction
    Add {
        /// Title
        title: String,

        /// Amount (positive; the type carries the direction)
        amount: f64,

        /// income or expense
        #[arg(long = "type", default_value = "expense")]
        kind: String,

        /// Category (e.g. food, housing, salary)
        #[arg(short, long)]
        category: String,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Repeats every month
        #[arg(long)]
        recurring: bool,

        /// Not yet paid / received
        #[arg(long)]
        unpaid: bool,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Where the money came from or went to
        #[arg(long)]
        source: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },

    /// Mark a transaction as paid
    Paid {
        /// Transaction ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Print where configuration is read from
    Path,
}
