//! Scheduler statistics.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Point-in-time view of scheduler utilization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    /// Configured concurrency ceiling.
    pub concurrency: usize,

    /// Jobs started but not yet settled.
    pub in_flight: usize,

    /// Jobs waiting in the backlog.
    pub pending: usize,

    /// Total jobs enqueued.
    pub submitted: u64,

    /// Total jobs that finished without error.
    pub completed: u64,

    /// Total asynchronous jobs that failed or panicked.
    pub failed: u64,
}

/// Lifetime totals, updated lock-free from the dispatch loop.
#[derive(Debug, Default)]
pub(crate) struct SchedulerCounters {
    pub submitted: AtomicU64,
    pub completed: AtomicU64,
    pub failed: AtomicU64,
}

impl SchedulerCounters {
    /// Combine lifetime totals with the current queue shape.
    pub fn snapshot(&self, concurrency: usize, in_flight: usize, pending: usize) -> SchedulerStats {
        SchedulerStats {
            concurrency,
            in_flight,
            pending,
            submitted: self.submitted.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}
