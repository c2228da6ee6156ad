//! FinSync CLI - Personal finance tracker with cash-flow forecasting
//!
//! Usage:
//!   finsync init --sample        Create a transaction file with demo data
//!   finsync import --file CSV    Import transactions
//!   finsync forecast --months 12 Project future months
//!   finsync serve --port 3000    Start the JSON API server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init { sample, force } => commands::cmd_init(&cli.data, sample, force),
        Commands::Import { file } => commands::cmd_import(&cli.data, &file),
        Commands::Transactions { action } => {
            let store = commands::open_store(&cli.data);
            match action {
                None => commands::cmd_transactions_list(&store, 20, None, None, false),
                Some(TransactionsAction::List {
                    limit,
                    kind,
                    category,
                    unpaid,
                }) => commands::cmd_transactions_list(
                    &store,
                    limit,
                    kind.as_deref(),
                    category.as_deref(),
                    unpaid,
                ),
                Some(TransactionsAction::Add {
                    title,
                    amount,
                    kind,
                    category,
                    date,
                    recurring,
                    unpaid,
                    due,
                    source,
                    notes,
                }) => commands::cmd_transactions_add(
                    &store,
                    commands::AddArgs {
                        title,
                        amount,
                        kind,
                        category,
                        date,
                        recurring,
                        unpaid,
                        due,
                        source,
                        notes,
                    },
                ),
                Some(TransactionsAction::Delete { id }) => {
                    commands::cmd_transactions_delete(&store, &id)
                }
                Some(TransactionsAction::Paid { id }) => commands::cmd_transactions_paid(&store, &id),
            }
        }
        Commands::Forecast {
            months,
            income,
            expenses,
            extra,
            extra_month,
            as_of,
            json,
        } => {
            let store = commands::open_store(&cli.data);
            let config = commands::load_settings(config_path)?;
            let options = commands::ForecastOptions {
                months,
                income,
                expenses,
                extra,
                extra_month,
            };
            let today = commands::resolve_as_of(as_of.as_deref())?;
            commands::cmd_forecast(&store, &config, &options, today, json)
        }
        Commands::Dashboard { as_of } => {
            let store = commands::open_store(&cli.data);
            let today = commands::resolve_as_of(as_of.as_deref())?;
            commands::cmd_dashboard(&store, today)
        }
        Commands::Budgets { as_of } => {
            let store = commands::open_store(&cli.data);
            let config = commands::load_settings(config_path)?;
            let today = commands::resolve_as_of(as_of.as_deref())?;
            commands::cmd_budgets(&store, &config, today)
        }
        Commands::Report { report_type } => {
            let store = commands::open_store(&cli.data);
            match report_type {
                ReportType::Categories { month } => {
                    let month = commands::resolve_month(month.as_deref())?;
                    commands::cmd_report_categories(&store, month)
                }
                ReportType::Daily { month } => {
                    let month = commands::resolve_month(month.as_deref())?;
                    commands::cmd_report_daily(&store, month)
                }
            }
        }
        Commands::Config { action } => match action {
            None | Some(ConfigAction::Show) => commands::cmd_config_show(config_path),
            Some(ConfigAction::Path) => commands::cmd_config_path(config_path),
        },
        Commands::Serve {
            port,
            host,
            allowed_origins,
        } => commands::cmd_serve(&cli.data, config_path, &host, port, allowed_origins).await,
    }
}
