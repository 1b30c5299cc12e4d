//! Basic metrics instrumentation for the widget.
//!
//! Counts lookup outcomes, manual-entry activity and HTTP timings.

use crate::classifier::OutcomeKind;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Metrics collector. Clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    http_requests_total: AtomicU64,
    http_errors_total: AtomicU64,
    http_duration_total_ms: AtomicU64,
    lookups_success: AtomicU64,
    lookups_rate_limited: AtomicU64,
    lookups_timed_out: AtomicU64,
    lookups_failed: AtomicU64,
    lookups_generic_failure: AtomicU64,
    stale_outcomes_dropped: AtomicU64,
    manual_entries_submitted: AtomicU64,
    manual_entries_cancelled: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.inner.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.inner
            .http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.inner.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the terminal outcome of one lookup.
    pub fn record_outcome(&self, kind: OutcomeKind) {
        self.outcome_counter(kind).fetch_add(1, Ordering::Relaxed);
    }

    /// Record an outcome that arrived after its transaction was superseded.
    pub fn record_stale_outcome(&self) {
        self.inner
            .stale_outcomes_dropped
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_manual_entry_submitted(&self) {
        self.inner
            .manual_entries_submitted
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_manual_entry_cancelled(&self) {
        self.inner
            .manual_entries_cancelled
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.inner.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.inner.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.inner.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.inner.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Number of lookups that ended in `kind`.
    pub fn outcomes(&self, kind: OutcomeKind) -> u64 {
        self.outcome_counter(kind).load(Ordering::Relaxed)
    }

    fn outcome_counter(&self, kind: OutcomeKind) -> &AtomicU64 {
        match kind {
            OutcomeKind::Success => &self.inner.lookups_success,
            OutcomeKind::RateLimited => &self.inner.lookups_rate_limited,
            OutcomeKind::TimedOut => &self.inner.lookups_timed_out,
            OutcomeKind::LookupFailed => &self.inner.lookups_failed,
            OutcomeKind::GenericFailure => &self.inner.lookups_generic_failure,
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        let c = &self.inner;
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            lookups_success: c.lookups_success.load(Ordering::Relaxed),
            lookups_rate_limited: c.lookups_rate_limited.load(Ordering::Relaxed),
            lookups_timed_out: c.lookups_timed_out.load(Ordering::Relaxed),
            lookups_failed: c.lookups_failed.load(Ordering::Relaxed)
                + c.lookups_generic_failure.load(Ordering::Relaxed),
            stale_outcomes_dropped: c.stale_outcomes_dropped.load(Ordering::Relaxed),
            manual_entries_submitted: c.manual_entries_submitted.load(Ordering::Relaxed),
            manual_entries_cancelled: c.manual_entries_cancelled.load(Ordering::Relaxed),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_avg_ms: f64,
    pub lookups_success: u64,
    pub lookups_rate_limited: u64,
    pub lookups_timed_out: u64,
    /// LookupFailed and GenericFailure combined
    pub lookups_failed: u64,
    pub stale_outcomes_dropped: u64,
    pub manual_entries_submitted: u64,
    pub manual_entries_cancelled: u64,
}
