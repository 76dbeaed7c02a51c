//! Synthetic record generation
//!
//! Produces the pending record sets the rest of the pipeline consumes:
//! - deterministic zero-padded identifiers
//! - bounded random amounts, clipped to two decimals
//! - category-to-rate lookup with a documented default fallback
//! - staggered creation timestamps and a fixed due-date offset
//!
//! Randomness is isolated behind a seedable generator so tests can force
//! deterministic output.

use crate::types::{round2, Record};
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Category-to-rate lookup table.
///
/// Rate factors are selected by exact category match; unmatched
/// categories silently fall back to the default rate rather than
/// erroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTable {
    entries: HashMap<String, f64>,
    default_rate: f64,
}

impl RateTable {
    /// Create an empty table with the given default rate.
    #[inline]
    #[must_use]
    pub fn new(default_rate: f64) -> Self {
        Self {
            entries: HashMap::new(),
            default_rate,
        }
    }

    /// The standard table: `premium` gets a lower rate than everyone
    /// else, all other categories share the default.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(0.10).with_rate("premium", 0.08)
    }

    /// Add or replace the rate for an exact-match category.
    #[must_use]
    pub fn with_rate(mut self, category: impl Into<String>, rate: f64) -> Self {
        self.entries.insert(category.into(), rate);
        self
    }

    /// Rate factor for a category, falling back to the default.
    #[inline]
    #[must_use]
    pub fn rate_for(&self, category: &str) -> f64 {
        self.entries
            .get(category)
            .copied()
            .unwrap_or(self.default_rate)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Configuration for the record factory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactoryConfig {
    /// Identifier prefix (`INV` yields `INV-000001`)
    pub id_prefix: String,
    /// Zero-padded width of the identifier sequence
    pub id_width: usize,
    /// Counterparty identifier prefix (`CUST` yields `CUST-1001`)
    pub counterparty_prefix: String,
    /// Lower bound of the amount distribution (inclusive)
    pub amount_min: f64,
    /// Upper bound of the amount distribution (exclusive)
    pub amount_max: f64,
    /// Creation timestamps are backdated by up to this many days
    pub backdate_days: i64,
    /// Due timestamps sit this many days in the future
    pub due_days: i64,
    /// Category-to-rate lookup
    pub rates: RateTable,
}

impl FactoryConfig {
    /// With a different rate table.
    #[must_use]
    pub fn with_rates(mut self, rates: RateTable) -> Self {
        self.rates = rates;
        self
    }

    /// With a different identifier prefix.
    #[must_use]
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            id_prefix: "INV".to_string(),
            id_width: 6,
            counterparty_prefix: "CUST".to_string(),
            amount_min: 100.0,
            amount_max: 5100.0,
            backdate_days: 30,
            due_days: 30,
            rates: RateTable::standard(),
        }
    }
}

/// Generates synthetic pending records from a count and a category.
#[derive(Debug)]
pub struct RecordFactory {
    config: FactoryConfig,
    rng: Mutex<StdRng>,
}

impl RecordFactory {
    /// Create a factory seeded from the operating system.
    #[must_use]
    pub fn new(config: FactoryConfig) -> Self {
        Self {
            config,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Create a factory with a fixed seed for reproducible output.
    #[must_use]
    pub fn with_seed(config: FactoryConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Generate `count` pending records for the given category.
    ///
    /// Identifiers are `"<PREFIX>-" + zero-padded(index)`, 1-based. A
    /// count of zero yields an empty set, not an error.
    #[must_use]
    pub fn create_records(&self, count: usize, category: &str) -> Vec<Record> {
        let config = &self.config;
        let rate = config.rates.rate_for(category);
        let now = Utc::now();
        let mut rng = self.rng.lock();

        (1..=count)
            .map(|index| {
                let backdate = if config.backdate_days > 0 {
                    rng.random_range(0..config.backdate_days)
                } else {
                    0
                };
                Record {
                    id: Some(format!(
                        "{}-{:0width$}",
                        config.id_prefix,
                        index,
                        width = config.id_width
                    )),
                    counterparty_id: Some(format!(
                        "{}-{}",
                        config.counterparty_prefix,
                        1000 + index
                    )),
                    category: Some(category.to_string()),
                    amount: Some(round2(
                        rng.random_range(config.amount_min..config.amount_max),
                    )),
                    rate_factor: Some(rate),
                    created_at: Some(now - Duration::days(backdate)),
                    due_at: Some(now + Duration::days(config.due_days)),
                    ..Record::default()
                }
            })
            .collect()
    }
}
