//! Batch processing stage
//!
//! Visits every record of a domain independently, computes the derived
//! monetary fields and stamps the processing timestamp. Failure is
//! isolated per record: one bad record is marked `Error` with a captured
//! message and the pass continues. Partial success is surfaced through
//! the aggregate outcome's chain-stop flag, never swallowed.

use crate::error::PipelineError;
use crate::store::DomainStore;
use crate::types::{round2, BatchOutcome, DomainStatus, Record, RecordStatus};
use chrono::Utc;
use std::sync::Arc;

/// Runs processing passes against the shared store.
#[derive(Debug)]
pub struct BatchProcessor {
    store: Arc<DomainStore>,
}

impl BatchProcessor {
    /// Create a processor over the shared store.
    #[inline]
    #[must_use]
    pub fn new(store: Arc<DomainStore>) -> Self {
        Self { store }
    }

    /// Process every record of the domain.
    ///
    /// The whole pass runs under the domain's lock so it always sees a
    /// fully-written record set. The domain moves to `BatchCompleted`
    /// regardless of per-record outcomes; an empty record set completes
    /// trivially with zero counts.
    ///
    /// # Errors
    /// `PipelineError::PrerequisiteMissing` if the domain was never
    /// created; no state is mutated in that case.
    pub fn process(&self, domain: &str) -> Result<BatchOutcome, PipelineError> {
        tracing::info!(domain, "starting batch processing");

        let outcome = self.store.update(domain, |state| {
            let mut outcome = BatchOutcome::default();
            let now = Utc::now();

            for record in &mut state.records {
                match derive_fields(record) {
                    Ok((derived, total)) => {
                        record.derived_amount = Some(derived);
                        record.total_amount = Some(total);
                        record.status = RecordStatus::Processed;
                        record.processed_at = Some(now);
                        outcome.processed_count += 1;
                    }
                    Err(message) => {
                        record.status = RecordStatus::Error;
                        record.error_message = Some(message);
                        outcome.error_count += 1;
                    }
                }
            }

            state.status = DomainStatus::BatchCompleted;
            outcome
        });

        let Some(outcome) = outcome else {
            return Err(PipelineError::PrerequisiteMissing {
                domain: domain.to_string(),
                required: "createData",
            });
        };

        if outcome.chain_stop() {
            tracing::warn!(
                domain,
                errors = outcome.error_count,
                "batch completed with record failures"
            );
        } else {
            tracing::info!(
                domain,
                processed = outcome.processed_count,
                "batch completed"
            );
        }
        Ok(outcome)
    }
}

/// Compute (derived, total) for one record, or the failure message to
/// record on it. Nothing is written on failure.
fn derive_fields(record: &Record) -> Result<(f64, f64), String> {
    let amount = record.amount.ok_or_else(|| "missing amount".to_string())?;
    if !amount.is_finite() {
        return Err(format!("amount {amount} is not a finite number"));
    }
    let rate = record
        .rate_factor
        .ok_or_else(|| "missing rate factor".to_string())?;
    if !rate.is_finite() {
        return Err(format!("rate factor {rate} is not a finite number"));
    }

    let derived = round2(amount * rate);
    let total = round2(amount + derived);
    Ok((derived, total))
}
