//! batchline-core — staged batch-data lifecycle
//!
//! The core pipeline behind the agent-facing operations:
//! - Generates synthetic records from a count and category
//! - Processes them in batch with per-record failure isolation
//! - Validates the results against structural and business rules
//! - Renders a cross-domain summary report
//!
//! The [`store::DomainStore`] is the only shared mutable resource; it is
//! constructed once and injected into every stage. Each stage refuses to
//! proceed when its prerequisite state is absent and signals chain-stop
//! through its aggregate outcome rather than failing the operation.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use batchline_core::{
//!     BatchProcessor, DomainStore, FactoryConfig, RecordFactory, Validator,
//! };
//!
//! let store = Arc::new(DomainStore::new());
//! let factory = RecordFactory::with_seed(FactoryConfig::default(), 42);
//! store.upsert_domain("invoices", factory.create_records(5, "premium"));
//!
//! let outcome = BatchProcessor::new(Arc::clone(&store))
//!     .process("invoices")
//!     .unwrap();
//! assert_eq!(outcome.processed_count, 5);
//!
//! let outcome = Validator::new(store).validate("invoices").unwrap();
//! assert!(!outcome.chain_stop());
//! ```

pub mod error;
pub mod factory;
pub mod processor;
pub mod report;
pub mod store;
pub mod types;
pub mod validator;

// Re-exports for convenience
pub use error::PipelineError;
pub use factory::{FactoryConfig, RateTable, RecordFactory};
pub use processor::BatchProcessor;
pub use report::ReportGenerator;
pub use store::{DomainSnapshot, DomainState, DomainStore};
pub use types::{
    round2, BatchOutcome, DomainStatus, Record, RecordStatus, ValidationOutcome,
};
pub use validator::Validator;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn full_chain_over_the_shared_store() {
        let store = Arc::new(DomainStore::new());
        let factory = RecordFactory::with_seed(FactoryConfig::default(), 42);
        store.upsert_domain("invoices", factory.create_records(5, "premium"));

        let batch = BatchProcessor::new(Arc::clone(&store))
            .process("invoices")
            .unwrap();
        assert_eq!(batch.processed_count, 5);
        assert!(!batch.chain_stop());

        let validation = Validator::new(Arc::clone(&store))
            .validate("invoices")
            .unwrap();
        assert_eq!(validation.valid_count, 5);
        assert!(!validation.chain_stop());

        let report = ReportGenerator::new(store).generate();
        assert!(report.contains("5 records"));
        assert!(report.contains("All Valid"));
    }
}
