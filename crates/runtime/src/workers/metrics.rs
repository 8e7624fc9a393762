//! Engagement counters for monitoring and tests.
//!
//! Uses atomics for lock-free access across the worker loops.

use std::sync::atomic::{AtomicU64, Ordering};

/// Running totals maintained by the worker loops.
#[derive(Debug, Default)]
pub struct ProcessorMetrics {
    /// Completed scan sweeps
    scans: AtomicU64,

    /// Threat candidates returned by the scanner
    contacts: AtomicU64,

    /// Decisions received from the oracle (both kinds)
    decisions: AtomicU64,

    /// Oracle calls that failed
    oracle_failures: AtomicU64,

    /// Attacks that dealt damage
    hits: AtomicU64,

    /// Strategy actions that were rejected
    strategy_failures: AtomicU64,
}

impl ProcessorMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_scan(&self, contacts: usize) {
        self.scans.fetch_add(1, Ordering::Relaxed);
        self.contacts.fetch_add(contacts as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_decision(&self) {
        self.decisions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_oracle_failure(&self) {
        self.oracle_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_strategy_failure(&self) {
        self.strategy_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Creates a snapshot of all counters.
    ///
    /// Note: individual fields are read atomically but the snapshot as a
    /// whole may be inconsistent while the workers are running.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            scans: self.scans.load(Ordering::Relaxed),
            contacts: self.contacts.load(Ordering::Relaxed),
            decisions: self.decisions.load(Ordering::Relaxed),
            oracle_failures: self.oracle_failures.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            strategy_failures: self.strategy_failures.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of metrics at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub scans: u64,
    pub contacts: u64,
    pub decisions: u64,
    pub oracle_failures: u64,
    pub hits: u64,
    pub strategy_failures: u64,
}

impl MetricsSnapshot {
    /// Share of oracle calls that succeeded, as a percentage (0-100).
    pub fn oracle_success_rate(&self) -> f64 {
        let total = self.decisions + self.oracle_failures;
        if total == 0 {
            100.0
        } else {
            self.decisions as f64 / total as f64 * 100.0
        }
    }
}
