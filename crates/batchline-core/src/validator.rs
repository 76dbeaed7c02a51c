//! Validation stage
//!
//! A pure read-and-report pass over whatever processing produced.
//! Each record is checked independently against structural and business
//! rules; the collected violation messages replace the domain's findings.
//! Records and domain status are never mutated.

use crate::error::PipelineError;
use crate::store::DomainStore;
use crate::types::{Record, RecordStatus, ValidationOutcome};
use std::sync::Arc;

/// Runs validation passes against the shared store.
#[derive(Debug)]
pub struct Validator {
    store: Arc<DomainStore>,
}

impl Validator {
    /// Create a validator over the shared store.
    #[inline]
    #[must_use]
    pub fn new(store: Arc<DomainStore>) -> Self {
        Self { store }
    }

    /// Validate every record of the domain.
    ///
    /// A record with zero violations is valid; one or more violations
    /// count it invalid and all of its messages land in the domain's
    /// findings (replacing the previous run's findings). Records that
    /// processing marked `Error` pass the status check but typically
    /// fail the missing-total check, because their derived fields were
    /// never populated.
    ///
    /// # Errors
    /// `PipelineError::PrerequisiteMissing` if the domain was never
    /// created; no state is mutated in that case.
    pub fn validate(&self, domain: &str) -> Result<ValidationOutcome, PipelineError> {
        tracing::info!(domain, "starting validation");

        let outcome = self.store.update(domain, |state| {
            let mut outcome = ValidationOutcome::default();
            let mut findings = Vec::new();

            for record in &state.records {
                let violations = check_record(record);
                if violations.is_empty() {
                    outcome.valid_count += 1;
                } else {
                    outcome.invalid_count += 1;
                    findings.extend(violations);
                }
            }

            outcome.findings_count = findings.len();
            state.findings = findings;
            outcome
        });

        let Some(outcome) = outcome else {
            return Err(PipelineError::PrerequisiteMissing {
                domain: domain.to_string(),
                required: "createData and runBatch",
            });
        };

        if outcome.chain_stop() {
            tracing::warn!(
                domain,
                invalid = outcome.invalid_count,
                findings = outcome.findings_count,
                "validation found invalid records"
            );
        } else {
            tracing::info!(domain, valid = outcome.valid_count, "validation completed");
        }
        Ok(outcome)
    }
}

/// Collect the violation messages for one record.
fn check_record(record: &Record) -> Vec<String> {
    let mut violations = Vec::new();

    // Required fields
    if record.id.is_none() {
        violations.push("Missing record ID".to_string());
    }
    if record.amount.is_none() {
        violations.push("Missing amount".to_string());
    }
    if record.total_amount.is_none() {
        violations.push("Missing total amount".to_string());
    }

    // Business rule: the total must strictly exceed the base amount
    if let (Some(amount), Some(total)) = (record.amount, record.total_amount) {
        if total <= amount {
            violations.push("Total amount should be greater than base amount".to_string());
        }
    }

    // Only the two terminal statuses are acceptable after processing
    if !matches!(
        record.status,
        RecordStatus::Processed | RecordStatus::Error
    ) {
        violations.push(format!("Invalid status: {}", record.status));
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{FactoryConfig, RateTable, RecordFactory};
    use crate::processor::BatchProcessor;
    use crate::store::DomainSnapshot;
    use crate::types::DomainStatus;

    fn processed_store(count: usize, config: FactoryConfig) -> Arc<DomainStore> {
        let store = Arc::new(DomainStore::new());
        let factory = RecordFactory::with_seed(config, 42);
        store.upsert_domain("invoices", factory.create_records(count, "premium"));
        BatchProcessor::new(Arc::clone(&store))
            .process("invoices")
            .unwrap();
        store
    }

    #[test]
    fn missing_domain_fails_fast_without_mutation() {
        let store = Arc::new(DomainStore::new());
        let validator = Validator::new(Arc::clone(&store));

        let err = validator.validate("invoices").unwrap_err();
        assert_eq!(
            err,
            PipelineError::PrerequisiteMissing {
                domain: "invoices".to_string(),
                required: "createData and runBatch",
            }
        );
        assert!(store.is_empty());
    }

    #[test]
    fn cleanly_processed_records_are_all_valid() {
        let store = processed_store(5, FactoryConfig::default());
        let validator = Validator::new(Arc::clone(&store));

        let outcome = validator.validate("invoices").unwrap();
        assert_eq!(outcome.valid_count, 5);
        assert_eq!(outcome.invalid_count, 0);
        assert_eq!(outcome.findings_count, 0);
        assert_eq!(outcome.validation_rate(), 100.0);
        assert!(!outcome.chain_stop());
        assert!(store.snapshot("invoices").unwrap().findings.is_empty());
    }

    #[test]
    fn empty_record_set_validates_trivially() {
        let store = processed_store(0, FactoryConfig::default());
        let outcome = Validator::new(store).validate("invoices").unwrap();
        assert_eq!(outcome.valid_count, 0);
        assert_eq!(outcome.invalid_count, 0);
        assert!(!outcome.validation_rate().is_nan());
    }

    #[test]
    fn zero_rate_factor_violates_the_business_rule() {
        let config = FactoryConfig::default().with_rates(RateTable::new(0.0));
        let store = processed_store(3, config);
        let validator = Validator::new(Arc::clone(&store));

        let outcome = validator.validate("invoices").unwrap();
        assert_eq!(outcome.invalid_count, 3);
        assert!(outcome.chain_stop());

        let findings = store.snapshot("invoices").unwrap().findings;
        assert_eq!(findings.len(), 3);
        assert!(findings
            .iter()
            .all(|f| f == "Total amount should be greater than base amount"));
    }

    #[test]
    fn unprocessed_record_gets_one_message_per_violation() {
        let store = Arc::new(DomainStore::new());
        store.upsert_domain("invoices", vec![Record::default()]);
        let validator = Validator::new(Arc::clone(&store));

        let outcome = validator.validate("invoices").unwrap();
        assert_eq!(outcome.invalid_count, 1);
        assert_eq!(outcome.findings_count, 4);

        let findings = store.snapshot("invoices").unwrap().findings;
        assert_eq!(
            findings,
            vec![
                "Missing record ID".to_string(),
                "Missing amount".to_string(),
                "Missing total amount".to_string(),
                "Invalid status: PENDING".to_string(),
            ]
        );
    }

    #[test]
    fn error_records_pass_the_status_check_but_fail_on_missing_total() {
        let store = Arc::new(DomainStore::new());
        store.upsert_domain(
            "invoices",
            vec![Record {
                id: Some("INV-000001".to_string()),
                rate_factor: Some(0.10),
                ..Record::default() // no amount: processing will error this record
            }],
        );
        BatchProcessor::new(Arc::clone(&store))
            .process("invoices")
            .unwrap();

        let outcome = Validator::new(Arc::clone(&store))
            .validate("invoices")
            .unwrap();
        assert_eq!(outcome.invalid_count, 1);

        let findings = store.snapshot("invoices").unwrap().findings;
        assert!(findings.contains(&"Missing total amount".to_string()));
        assert!(!findings.iter().any(|f| f.starts_with("Invalid status")));
    }

    #[test]
    fn findings_are_replaced_not_appended() {
        let config = FactoryConfig::default().with_rates(RateTable::new(0.0));
        let store = processed_store(2, config);
        let validator = Validator::new(Arc::clone(&store));

        validator.validate("invoices").unwrap();
        validator.validate("invoices").unwrap();

        assert_eq!(store.snapshot("invoices").unwrap().findings.len(), 2);
    }

    #[test]
    fn validation_mutates_nothing_but_findings() {
        let store = processed_store(3, FactoryConfig::default());
        let before = store.snapshot("invoices").unwrap();

        Validator::new(Arc::clone(&store))
            .validate("invoices")
            .unwrap();

        let after: DomainSnapshot = store.snapshot("invoices").unwrap();
        assert_eq!(after.records, before.records);
        assert_eq!(after.status, DomainStatus::BatchCompleted);
    }
}
