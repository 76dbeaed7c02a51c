//! batchline-tools — agent-facing operation surface
//!
//! Exposes the staged batch-data lifecycle as named operations with
//! structured arguments, each returning a rendered text reply the
//! consuming agent can show verbatim plus a machine-readable outcome it
//! can react to programmatically (chain-stop, rejection directives).
//!
//! Mapping a free-form request to one of these operations is the
//! external runtime's job; this crate owns the call/response contract
//! only.
//!
//! # Example
//!
//! ```rust
//! use batchline_tools::{BatchTools, ToolsConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let tools = BatchTools::new(ToolsConfig::default().with_seed(42));
//!
//! tools.create_data(5, "premium").await;
//! let batch = tools.run_batch("invoices").await;
//! assert!(!batch.chain_stop);
//! # }
//! ```

pub mod logging;
pub mod ops;

// Re-exports for convenience
pub use ops::{BatchTools, ToolOutcome, ToolReply, ToolsConfig, DEFAULT_DOMAIN};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
