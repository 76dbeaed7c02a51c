//! Named operations over the pipeline
//!
//! The surface an external agent runtime invokes: structured arguments
//! in, a rendered text reply plus machine-readable outcome out. Failures
//! never propagate to the transport as errors; a rejected operation
//! renders the stop-chain text carrying the directive for the caller.

use batchline_core::{
    BatchOutcome, BatchProcessor, DomainStore, FactoryConfig, PipelineError, RecordFactory,
    ReportGenerator, ValidationOutcome, Validator,
};
use serde::Serialize;
use std::sync::Arc;

/// Domain written by `create_data` when none is configured.
pub const DEFAULT_DOMAIN: &str = "invoices";

/// Configuration for the operation surface.
#[derive(Debug, Clone)]
pub struct ToolsConfig {
    /// Domain `create_data` writes into
    pub domain: String,
    /// Record generation settings
    pub factory: FactoryConfig,
    /// Fixed RNG seed for reproducible generation
    pub seed: Option<u64>,
}

impl ToolsConfig {
    /// Create the default configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a different target domain.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// With different factory settings.
    #[must_use]
    pub fn with_factory(mut self, factory: FactoryConfig) -> Self {
        self.factory = factory;
        self
    }

    /// With a fixed generation seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            factory: FactoryConfig::default(),
            seed: None,
        }
    }
}

/// Machine-readable payload of a reply.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolOutcome {
    /// Records were generated and stored
    Created {
        /// Domain the records were written into
        domain: String,
        /// Number of records created
        count: usize,
        /// Category the rate factor was selected by
        category: String,
    },
    /// A batch processing pass completed
    Batch(BatchOutcome),
    /// A validation pass completed
    Validation(ValidationOutcome),
    /// A report was rendered (the reply text is the report)
    Report,
    /// The operation was rejected before touching any state
    Rejected {
        /// Why the operation was rejected
        reason: String,
    },
}

/// Result of one operation call.
#[derive(Debug, Clone, Serialize)]
pub struct ToolReply {
    /// Name of the invoked operation
    pub tool: &'static str,
    /// Whether the caller should halt the logical pipeline here
    pub chain_stop: bool,
    /// Machine-readable outcome
    pub outcome: ToolOutcome,
    /// Rendered text for the consuming agent
    pub text: String,
}

/// The agent-facing toolset: one shared store, one stage object each.
#[derive(Debug)]
pub struct BatchTools {
    store: Arc<DomainStore>,
    factory: RecordFactory,
    processor: BatchProcessor,
    validator: Validator,
    reporter: ReportGenerator,
    domain: String,
}

impl BatchTools {
    /// Build the toolset with its own private store.
    #[must_use]
    pub fn new(config: ToolsConfig) -> Self {
        Self::with_store(config, Arc::new(DomainStore::new()))
    }

    /// Build the toolset over an externally owned store.
    ///
    /// Lets an embedding process share one store across several tool
    /// surfaces.
    #[must_use]
    pub fn with_store(config: ToolsConfig, store: Arc<DomainStore>) -> Self {
        let factory = match config.seed {
            Some(seed) => RecordFactory::with_seed(config.factory, seed),
            None => RecordFactory::new(config.factory),
        };
        Self {
            factory,
            processor: BatchProcessor::new(Arc::clone(&store)),
            validator: Validator::new(Arc::clone(&store)),
            reporter: ReportGenerator::new(Arc::clone(&store)),
            domain: config.domain,
            store,
        }
    }

    /// Domain `create_data` writes into.
    #[inline]
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Shared store handle, for embedders that read state directly.
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<DomainStore> {
        &self.store
    }

    /// Generate `count` records for `category` and store them.
    ///
    /// Always succeeds; the domain moves to `DATA_CREATED`.
    pub async fn create_data(&self, count: usize, category: &str) -> ToolReply {
        tracing::info!(count, category, domain = %self.domain, "creating records");

        let records = self.factory.create_records(count, category);
        self.store.upsert_domain(&self.domain, records);

        let text = format!(
            "Tool: createData\n\
             Input: {count} records, category {category}\n\
             Result: created {count} records in domain `{domain}`; data ready for batch processing",
            domain = self.domain,
        );
        ToolReply {
            tool: "createData",
            chain_stop: false,
            outcome: ToolOutcome::Created {
                domain: self.domain.clone(),
                count,
                category: category.to_string(),
            },
            text,
        }
    }

    /// Run a batch processing pass over `domain`.
    pub async fn run_batch(&self, domain: &str) -> ToolReply {
        match self.processor.process(domain) {
            Ok(outcome) => {
                let text = if outcome.chain_stop() {
                    format!(
                        "ERROR DETECTED - stopping chain execution\n\
                         Tool: runBatch\n\
                         Details: {} records failed processing ({} processed, success rate {:.1}%)\n\
                         Suggested action: check data quality and retry batch processing",
                        outcome.error_count,
                        outcome.processed_count,
                        outcome.success_rate(),
                    )
                } else {
                    format!(
                        "Tool: runBatch\n\
                         Result: batch processing completed for domain `{domain}`\n\
                         Processed: {} records\n\
                         Errors: {} records\n\
                         Success rate: {:.1}%",
                        outcome.processed_count,
                        outcome.error_count,
                        outcome.success_rate(),
                    )
                };
                ToolReply {
                    tool: "runBatch",
                    chain_stop: outcome.chain_stop(),
                    outcome: ToolOutcome::Batch(outcome),
                    text,
                }
            }
            Err(err) => rejected("runBatch", &err, "retry batch processing"),
        }
    }

    /// Run a validation pass over `domain`.
    pub async fn validate(&self, domain: &str) -> ToolReply {
        match self.validator.validate(domain) {
            Ok(outcome) => {
                let text = if outcome.chain_stop() {
                    format!(
                        "ERROR DETECTED - stopping chain execution\n\
                         Tool: validateData\n\
                         Details: {} records failed validation ({} findings)\n\
                         Suggested action: fix data quality issues and retry validation",
                        outcome.invalid_count, outcome.findings_count,
                    )
                } else {
                    format!(
                        "Tool: validateData\n\
                         Result: validation completed for domain `{domain}`\n\
                         Valid records: {}\n\
                         Invalid records: {}\n\
                         Validation rate: {:.1}%\n\
                         Findings: {}",
                        outcome.valid_count,
                        outcome.invalid_count,
                        outcome.validation_rate(),
                        outcome.findings_count,
                    )
                };
                ToolReply {
                    tool: "validateData",
                    chain_stop: outcome.chain_stop(),
                    outcome: ToolOutcome::Validation(outcome),
                    text,
                }
            }
            Err(err) => rejected("validateData", &err, "retry validation"),
        }
    }

    /// Render the cross-domain batch report.
    ///
    /// Always succeeds; an empty store yields a report with empty
    /// sections.
    pub async fn generate_report(&self) -> ToolReply {
        tracing::info!("generating batch report");
        ToolReply {
            tool: "generateReport",
            chain_stop: false,
            outcome: ToolOutcome::Report,
            text: self.reporter.generate(),
        }
    }
}

/// Reply for an operation rejected by a missing prerequisite.
fn rejected(tool: &'static str, err: &PipelineError, retry: &str) -> ToolReply {
    tracing::warn!(tool, error = %err, "operation rejected");
    let text = format!(
        "ERROR DETECTED - stopping chain execution\n\
         Tool: {tool}\n\
         Details: {err}\n\
         Suggested action: run {required} first, then {retry}",
        required = err.required_operation(),
    );
    ToolReply {
        tool,
        chain_stop: true,
        outcome: ToolOutcome::Rejected {
            reason: err.to_string(),
        },
        text,
    }
}
