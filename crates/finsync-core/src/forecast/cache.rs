//! Optional memoization around [`project`](super::project)
//!
//! Results are keyed by a SHA-256 of the serialized inputs, so any change to
//! the transactions, the reference date or the scenario misses the cache.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::Result;
use crate::models::Transaction;

use super::project;
use super::types::{ForecastResult, ScenarioParameters};

const DEFAULT_CAPACITY: usize = 64;

#[derive(Serialize)]
struct CacheKey<'a> {
    transactions: &'a [Transaction],
    now: NaiveDate,
    scenario: &'a ScenarioParameters,
}

/// Hash of everything a projection depends on
pub fn cache_key(
    transactions: &[Transaction],
    now: NaiveDate,
    scenario: &ScenarioParameters,
) -> Result<String> {
    let key = CacheKey {
        transactions,
        now,
        scenario,
    };
    let bytes = serde_json::to_vec(&key)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Bounded map of previous projection results
pub struct ForecastCache {
    entries: Mutex<HashMap<String, ForecastResult>>,
    capacity: usize,
}

impl Default for ForecastCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Return a cached result or compute and remember a new one.
    /// When full, the cache is emptied before inserting.
    pub fn project(
        &self,
        transactions: &[Transaction],
        now: NaiveDate,
        scenario: &ScenarioParameters,
    ) -> Result<ForecastResult> {
        let key = cache_key(transactions, now, scenario)?;
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(hit) = entries.get(&key) {
            debug!(key = %&key[..12], "Forecast cache hit");
            return Ok(hit.clone());
        }

        let result = project(transactions, now, scenario);
        if entries.len() >= self.capacity {
            entries.clear();
        }
        entries.insert(key, result.clone());
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, expense, income};

    #[test]
    fn test_identical_inputs_share_a_key() {
        let txs = vec![income("a", 100.0, "2026-03-01")];
        let scenario = ScenarioParameters::default();
        let now = date("2026-04-01");

        assert_eq!(
            cache_key(&txs, now, &scenario).unwrap(),
            cache_key(&txs.clone(), now, &scenario).unwrap()
        );

        let changed = ScenarioParameters {
            horizon_months: 6,
            ..scenario
        };
        assert_ne!(
            cache_key(&txs, now, &scenario).unwrap(),
            cache_key(&txs, now, &changed).unwrap()
        );
    }

    #[test]
    fn test_cache_returns_same_result() {
        let cache = ForecastCache::new();
        let txs = vec![
            income("a", 3000.0, "2026-03-01"),
            expense("b", 1000.0, "2026-03-02"),
        ];
        let scenario = ScenarioParameters::default();
        let now = date("2026-04-01");

        let first = cache.project(&txs, now, &scenario).unwrap();
        let second = cache.project(&txs, now, &scenario).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);

        let more = vec![income("c", 10.0, "2026-03-03")];
        cache.project(&more, now, &scenario).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_cache_clears_when_full() {
        let cache = ForecastCache::with_capacity(2);
        let now = date("2026-04-01");
        for horizon in 1..=3 {
            let scenario = ScenarioParameters {
                horizon_months: horizon,
                ..Default::default()
            };
            cache.project(&[], now, &scenario).unwrap();
        }
        assert_eq!(cache.len(), 1);
    }
}
