//! Report generation
//!
//! Presentation-only view over every domain the store knows about.
//! Reads name-sorted snapshots so repeated runs render identically apart
//! from the generation timestamp; never mutates any state.

use crate::store::DomainStore;
use crate::types::DomainStatus;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::sync::Arc;

/// Renders the cross-domain batch processing summary.
#[derive(Debug)]
pub struct ReportGenerator {
    store: Arc<DomainStore>,
}

impl ReportGenerator {
    /// Create a generator over the shared store.
    #[inline]
    #[must_use]
    pub fn new(store: Arc<DomainStore>) -> Self {
        Self { store }
    }

    /// Render the report with the current time as generation timestamp.
    ///
    /// An empty store yields a report with empty sections, not an error.
    #[must_use]
    pub fn generate(&self) -> String {
        self.render_at(Utc::now())
    }

    /// Render the report with an explicit generation timestamp.
    #[must_use]
    pub fn render_at(&self, generated_at: DateTime<Utc>) -> String {
        let domains = self.store.domains();
        let mut report = String::new();

        report.push_str("BATCH PROCESSING REPORT\n");
        report.push_str("=======================\n\n");

        report.push_str("DATA CREATION STATUS\n");
        report.push_str("--------------------\n");
        for (name, snapshot) in &domains {
            let _ = writeln!(
                report,
                "{:<12}: {}",
                name.to_uppercase(),
                status_label(snapshot.status)
            );
        }

        report.push_str("\nDATA COUNTS\n");
        report.push_str("-----------\n");
        for (name, snapshot) in &domains {
            let _ = writeln!(
                report,
                "{:<12}: {} records",
                name.to_uppercase(),
                snapshot.records.len()
            );
        }

        report.push_str("\nVALIDATION SUMMARY\n");
        report.push_str("------------------\n");
        for (name, snapshot) in &domains {
            let summary = if snapshot.findings.is_empty() {
                "All Valid".to_string()
            } else {
                format!("{} errors", snapshot.findings.len())
            };
            let _ = writeln!(report, "{:<12}: {}", name.to_uppercase(), summary);
        }

        let _ = write!(
            report,
            "\nReport generated: {}",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        );
        report
    }
}

/// Human label for the domain status state machine value.
fn status_label(status: DomainStatus) -> &'static str {
    match status {
        DomainStatus::DataCreated => "Ready",
        DomainStatus::BatchCompleted => "Processed",
    }
}
