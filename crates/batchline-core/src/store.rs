//! Keyed domain store
//!
//! The only shared mutable resource in the pipeline. Holds, per domain
//! name, the current record set, the batch status and the findings of the
//! last validation run. Operations on the same domain serialize on the
//! key's lock; operations on different domains never block each other.
//! Readers see a domain fully in its pre-update or post-update form,
//! never a half-written one.

use crate::types::{DomainStatus, Record};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Mutable per-domain state, owned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainState {
    /// Current record set
    pub records: Vec<Record>,
    /// Batch status of the domain
    pub status: DomainStatus,
    /// Findings of the last validation run (replaced, never appended)
    pub findings: Vec<String>,
}

/// Point-in-time copy of a domain's full state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainSnapshot {
    /// Record set at snapshot time
    pub records: Vec<Record>,
    /// Batch status at snapshot time
    pub status: DomainStatus,
    /// Findings at snapshot time
    pub findings: Vec<String>,
}

impl From<&DomainState> for DomainSnapshot {
    fn from(state: &DomainState) -> Self {
        Self {
            records: state.records.clone(),
            status: state.status,
            findings: state.findings.clone(),
        }
    }
}

/// Concurrency-safe store keyed by domain name.
///
/// Constructed once at process start and injected into every stage;
/// stages borrow access for the duration of one call and never retain
/// references across calls. Nothing is ever deleted (lifetime = process
/// lifetime).
#[derive(Debug, Default)]
pub struct DomainStore {
    inner: DashMap<String, DomainState>,
}

impl DomainStore {
    /// Create an empty store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the domain's record set and mark it `DataCreated`.
    ///
    /// Findings from a prior validation run survive until the next
    /// validation run replaces them.
    pub fn upsert_domain(&self, name: &str, records: Vec<Record>) {
        match self.inner.entry(name.to_owned()) {
            Entry::Occupied(mut occupied) => {
                let state = occupied.get_mut();
                state.records = records;
                state.status = DomainStatus::DataCreated;
            }
            Entry::Vacant(vacant) => {
                vacant.insert(DomainState {
                    records,
                    status: DomainStatus::DataCreated,
                    findings: Vec::new(),
                });
            }
        }
    }

    /// Atomic full read of one domain, or `None` if it was never created.
    #[must_use]
    pub fn snapshot(&self, name: &str) -> Option<DomainSnapshot> {
        self.inner.get(name).map(|entry| entry.value().into())
    }

    /// Set the domain's batch status. Returns false if the domain is absent.
    pub fn set_status(&self, name: &str, status: DomainStatus) -> bool {
        self.update(name, |state| state.status = status).is_some()
    }

    /// Replace the domain's findings. Returns false if the domain is absent.
    pub fn set_findings(&self, name: &str, findings: Vec<String>) -> bool {
        self.update(name, |state| state.findings = findings).is_some()
    }

    /// Run a closure over the domain's mutable state under the key's lock.
    ///
    /// This is how the processing and validation stages obtain a
    /// consistent, fully-written record set: a concurrent `upsert_domain`
    /// on the same name either completes before the closure runs or waits
    /// for it. Returns `None` without invoking the closure if the domain
    /// is absent.
    pub fn update<R>(&self, name: &str, f: impl FnOnce(&mut DomainState) -> R) -> Option<R> {
        self.inner
            .get_mut(name)
            .map(|mut entry| f(entry.value_mut()))
    }

    /// Name-sorted snapshots of every known domain.
    ///
    /// Sorted so that cross-domain reads (the report) render
    /// deterministically regardless of map iteration order.
    #[must_use]
    pub fn domains(&self) -> Vec<(String, DomainSnapshot)> {
        let mut snapshots: Vec<(String, DomainSnapshot)> = self
            .inner
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().into()))
            .collect();
        snapshots.sort_by(|a, b| a.0.cmp(&b.0));
        snapshots
    }

    /// Number of known domains.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the store holds no domains at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
