//! FinSync configuration
//!
//! Holds the default forecast scenario and the monthly budget limits.
//!
//! ## Configuration Resolution
//!
//! 1. An explicit path (the CLI's `--config`), when the file exists
//! 2. Override in the data dir (~/.local/share/finsync/config/finsync.toml)
//! 3. Embedded defaults (compiled into the binary)

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::forecast::ScenarioParameters;
use crate::models::{Category, TransactionType};

/// Embedded default config (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/finsync.toml");

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinsyncConfig {
    /// Scenario used when a forecast request leaves a knob unset
    pub forecast: ScenarioParameters,
    /// Monthly spending limit per expense category
    pub budgets: BTreeMap<Category, f64>,
}

impl Default for FinsyncConfig {
    fn default() -> Self {
        Self {
            forecast: ScenarioParameters::default(),
            budgets: default_budgets(),
        }
    }
}

impl FinsyncConfig {
    /// Load from an explicit path, the override location, or the embedded defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        load_config(path)
    }

    /// Render back to TOML, in the same layout the loader accepts
    pub fn to_toml(&self) -> Result<String> {
        let raw = RawConfig {
            forecast: Some(RawForecast {
                horizon_months: Some(self.forecast.horizon_months),
                income_percent: Some(self.forecast.income_multiplier_percent),
                expense_percent: Some(self.forecast.expense_multiplier_percent),
                extra_expense: Some(self.forecast.extra_expense_amount),
                extra_expense_month: Some(self.forecast.extra_expense_month_index),
            }),
            budgets: Some(
                self.budgets
                    .iter()
                    .map(|(c, limit)| (c.as_str().to_string(), *limit))
                    .collect(),
            ),
        };
        toml::to_string_pretty(&raw)
            .map_err(|e| Error::Config(format!("Failed to render config: {}", e)))
    }
}

/// Budget limits the dashboard ships with
pub fn default_budgets() -> BTreeMap<Category, f64> {
    [
        (Category::Food, 1500.0),
        (Category::Housing, 2000.0),
        (Category::Transportation, 700.0),
        (Category::Utilities, 600.0),
        (Category::Entertainment, 400.0),
        (Category::Healthcare, 500.0),
        (Category::Personal, 300.0),
        (Category::Education, 250.0),
        (Category::Debt, 1000.0),
        (Category::OtherExpense, 200.0),
    ]
    .into_iter()
    .collect()
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("finsync").join("config").join("finsync.toml"))
}

/// Path that [`load_config`] would read, or `None` for the built-in defaults.
///
/// An explicit path must exist; only the default override location is optional.
pub fn resolved_config_path(override_path: Option<&Path>) -> Result<Option<PathBuf>> {
    match override_path {
        Some(path) if path.exists() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        ))),
        None => Ok(default_config_path().filter(|p| p.exists())),
    }
}

/// Load configuration (override first, then default)
pub fn load_config(override_path: Option<&Path>) -> Result<FinsyncConfig> {
    let content = match resolved_config_path(override_path)? {
        Some(path) => {
            debug!(path = %path.display(), "Loading config override");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
        }
        None => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize, Serialize)]
struct RawConfig {
    forecast: Option<RawForecast>,
    budgets: Option<HashMap<String, f64>>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RawForecast {
    horizon_months: Option<u32>,
    income_percent: Option<i32>,
    expense_percent: Option<i32>,
    extra_expense: Option<f64>,
    extra_expense_month: Option<u32>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<FinsyncConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = FinsyncConfig::default();

    if let Some(forecast) = raw.forecast {
        let scenario = &mut config.forecast;
        if let Some(horizon) = forecast.horizon_months {
            scenario.horizon_months = horizon;
        }
        if let Some(percent) = forecast.income_percent {
            scenario.income_multiplier_percent = percent;
        }
        if let Some(percent) = forecast.expense_percent {
            scenario.expense_multiplier_percent = percent;
        }
        if let Some(extra) = forecast.extra_expense {
            scenario.extra_expense_amount = extra;
        }
        if let Some(month) = forecast.extra_expense_month {
            scenario.extra_expense_month_index = month;
        }
        config.forecast = config.forecast.clamped();
    }

    // A [budgets] table replaces the defaults entirely
    if let Some(budgets) = raw.budgets {
        let mut limits = BTreeMap::new();
        for (name, limit) in budgets {
            let category: Category = name.parse().map_err(Error::Config)?;
            if category.kind() != TransactionType::Expense {
                return Err(Error::Config(format!(
                    "Budget category must be an expense category: {}",
                    name
                )));
            }
            if !limit.is_finite() || limit < 0.0 {
                return Err(Error::Config(format!(
                    "Budget limit for {} must be non-negative",
                    name
                )));
            }
            limits.insert(category, limit);
        }
        config.budgets = limits;
    }

    Ok(config)
}
