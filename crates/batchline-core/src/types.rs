//! Core types for the batch lifecycle
//!
//! Defines the fundamental data shapes:
//! - Records and their per-record lifecycle status
//! - Domain-level batch status
//! - Aggregate outcomes for processing and validation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Round a monetary value to two decimal places.
#[inline]
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Lifecycle status of a single record.
///
/// `Pending` at creation; processing moves every record to the terminal
/// `Processed` or `Error` state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    /// Created but not yet processed
    #[default]
    Pending,
    /// Derived fields computed successfully
    Processed,
    /// Derivation failed for this record; see `error_message`
    Error,
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Pending => "PENDING",
            Self::Processed => "PROCESSED",
            Self::Error => "ERROR",
        };
        write!(f, "{label}")
    }
}

/// Batch status of a whole domain.
///
/// The absent state ("no entry in the store") is deliberately not a
/// variant: a domain that was never created simply has no status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainStatus {
    /// Records written, ready for batch processing
    DataCreated,
    /// A processing pass has completed over the record set
    BatchCompleted,
}

impl std::fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::DataCreated => "DATA_CREATED",
            Self::BatchCompleted => "BATCH_COMPLETED",
        };
        write!(f, "{label}")
    }
}

/// One unit of synthetic work moving through the pipeline.
///
/// Fields appear as the record progresses: creation fills identity,
/// category, amount and timestamps; processing fills the derived amounts
/// and `processed_at` (or `error_message` on failure). All fields are
/// optional so that structurally broken records are representable and
/// caught by validation rather than made impossible to construct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier, unique within the domain (`PREFIX-000001` style)
    pub id: Option<String>,
    /// Counterparty identifier (`CUST-1001` style)
    pub counterparty_id: Option<String>,
    /// Category tag the rate factor was selected by
    pub category: Option<String>,
    /// Base monetary amount, two-decimal precision
    pub amount: Option<f64>,
    /// Rate factor applied during processing (decimal fraction)
    pub rate_factor: Option<f64>,
    /// Derived amount = round2(amount * rate_factor); set by processing
    pub derived_amount: Option<f64>,
    /// Total = round2(amount + derived_amount); set by processing
    pub total_amount: Option<f64>,
    /// Per-record lifecycle status
    pub status: RecordStatus,
    /// Creation timestamp (staggered arrival)
    pub created_at: Option<DateTime<Utc>>,
    /// Due timestamp (fixed forward offset from creation time)
    pub due_at: Option<DateTime<Utc>>,
    /// Timestamp of the successful processing pass
    pub processed_at: Option<DateTime<Utc>>,
    /// Captured failure message when processing marked this record `Error`
    pub error_message: Option<String>,
}

/// Aggregate result of one batch processing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Records whose derived fields were computed
    pub processed_count: usize,
    /// Records marked `Error` during the pass
    pub error_count: usize,
}

impl BatchOutcome {
    /// Success rate as a percentage; 0.0 for an empty record set.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        let total = self.processed_count + self.error_count;
        if total == 0 {
            0.0
        } else {
            self.processed_count as f64 * 100.0 / total as f64
        }
    }

    /// Whether the caller should stop the logical pipeline here.
    ///
    /// Set when any record failed; the completed work is kept so the
    /// caller can inspect failed records before retrying.
    #[inline]
    #[must_use]
    pub fn chain_stop(&self) -> bool {
        self.error_count > 0
    }
}

/// Aggregate result of one validation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Records with zero violations
    pub valid_count: usize,
    /// Records with one or more violations
    pub invalid_count: usize,
    /// Total violation messages written to the domain's findings
    pub findings_count: usize,
}

impl ValidationOutcome {
    /// Validation rate as a percentage; 0.0 for an empty record set.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn validation_rate(&self) -> f64 {
        let total = self.valid_count + self.invalid_count;
        if total == 0 {
            0.0
        } else {
            self.valid_count as f64 * 100.0 / total as f64
        }
    }

    /// Whether the caller should stop the logical pipeline here.
    #[inline]
    #[must_use]
    pub fn chain_stop(&self) -> bool {
        self.invalid_count > 0
    }
}
