//! Error types for the batch lifecycle
//!
//! Only the complete absence of prerequisite state is an operation-level
//! failure. Per-record failures during processing are recorded on the
//! record itself and never surface here.

/// Operation-level pipeline failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    /// The targeted domain was never created.
    ///
    /// Carries the directive naming the operation(s) the caller must run
    /// first; no state is mutated when this is returned.
    #[error("no data found for domain `{domain}`; run {required} first")]
    PrerequisiteMissing {
        /// Domain the rejected operation targeted
        domain: String,
        /// Prior operation(s) the caller must run before retrying
        required: &'static str,
    },
}

impl PipelineError {
    /// The prior operation(s) the caller is being directed to run.
    #[inline]
    #[must_use]
    pub fn required_operation(&self) -> &'static str {
        match self {
            Self::PrerequisiteMissing { required, .. } => required,
        }
    }
}
