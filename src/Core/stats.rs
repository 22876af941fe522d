use crossbeam_utils::CachePadded;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared by callers and workers.
///
/// Each counter is padded to its own cache line; callers bump `submitted`
/// and `consumed` while workers bump `executed`, and they should not fight
/// over the same line.
#[derive(Default)]
pub struct RingStats {
    submitted: CachePadded<AtomicU64>,
    rejected: CachePadded<AtomicU64>,
    executed: CachePadded<AtomicU64>,
    consumed: CachePadded<AtomicU64>,
}

/// Point-in-time copy of [`RingStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Submissions accepted into the ring.
    pub submitted: u64,
    /// Submissions refused (full ring or shutting down); a refused batch
    /// counts every entry in it.
    pub rejected: u64,
    /// Operations run to completion by a worker.
    pub executed: u64,
    /// Completions handed back to callers (including those returned by shutdown).
    pub consumed: u64,
}

impl StatsSnapshot {
    /// Accepted operations whose completion has not been handed back yet.
    pub fn outstanding(&self) -> u64 {
        self.submitted.saturating_sub(self.consumed)
    }
}

impl RingStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_submitted(&self, n: u64) {
        self.submitted.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_rejected(&self, n: u64) {
        self.rejected.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_executed(&self) {
        self.executed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_consumed(&self, n: u64) {
        self.consumed.fetch_add(n, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            submitted: self.submitted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            executed: self.executed.load(Ordering::Relaxed),
            consumed: self.consumed.load(Ordering::Relaxed),
        }
    }
}
