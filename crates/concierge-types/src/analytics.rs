//! Usage counter snapshot.

use serde::{Deserialize, Serialize};

/// Read-only aggregate of the usage counters.
///
/// `session_count` and `contact_count` are recomputed from the owning
/// collections at snapshot time so they can never drift; `total_messages`
/// and `manual_mode_activations` are event counters incremented in lockstep
/// with the triggering mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub session_count: u64,
    pub contact_count: u64,
    pub total_messages: u64,
    pub manual_mode_activations: u64,
}
