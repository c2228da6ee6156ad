//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod forecast;
pub mod reports;
pub mod transactions;

// Re-export all handlers for use in router
pub use forecast::*;
pub use reports::*;
pub use transactions::*;
