//! Usage counters.
//!
//! `total_messages` and `manual_mode_activations` are event counters bumped
//! in lockstep with the registry mutation that triggers them -- request
//! handlers never write them directly. Session and contact counts are
//! recomputed from the owning collections at snapshot time so they can
//! never drift.

use std::sync::atomic::{AtomicU64, Ordering};

use concierge_types::analytics::AnalyticsSnapshot;

/// Monotonic usage counters shared across all requests.
#[derive(Debug, Default)]
pub struct AnalyticsCounters {
    total_messages: AtomicU64,
    manual_mode_activations: AtomicU64,
}

impl AnalyticsCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one appended message. Called only from registry mutations.
    pub fn record_message(&self) {
        self.total_messages.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one manual-mode activation. Called only from registry mutations.
    pub fn record_manual_mode(&self) {
        self.manual_mode_activations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_messages(&self) -> u64 {
        self.total_messages.load(Ordering::Relaxed)
    }

    pub fn manual_mode_activations(&self) -> u64 {
        self.manual_mode_activations.load(Ordering::Relaxed)
    }

    /// Merge the recomputed collection sizes with the event counters.
    pub fn snapshot(&self, session_count: usize, contact_count: usize) -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            session_count: session_count as u64,
            contact_count: contact_count as u64,
            total_messages: self.total_messages(),
            manual_mode_activations: self.manual_mode_activations(),
        }
    }
}
