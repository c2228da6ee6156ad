//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `config` - Show the effective configuration and where it comes from
//! - `core` - Init and shared utilities (open_store, load_settings, date args)
//! - `forecast` - Cash-flow projection
//! - `import` - CSV import
//! - `reports` - Dashboard, budgets, category and daily reports
//! - `serve` - Web server command
//! - `transactions` - Transaction commands (list, add, delete, paid)

pub mod config;
pub mod core;
pub mod forecast;
pub mod import;
pub mod reports;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use config::*;
pub use core::*;
pub use forecast::*;
pub use import::*;
pub use reports::*;
pub use serve::*;
pub use transactions::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
