use std::fmt;
use crate::OpRing::Buffer::Ring;
use crate::OpRing::RingSystem;

/// Debug function for Ring
///
/// Shows the cursors and occupancy without walking the slot table
pub fn debug_ring<T>(ring: &Ring<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Ring")
        .field("head", &ring.head)
        .field("tail", &ring.tail)
        .field("capacity", &ring.capacity)
        .field("used", &ring.capacity_used())
        .finish_non_exhaustive()
}

/// Debug function for RingSystem
///
/// Provides a point-in-time view that shows:
/// - Lifecycle state
/// - Occupancy of both rings and the in-flight count
/// - Worker count
/// - Counter snapshot
///
/// Each field takes its lock separately, so the values may come from
/// slightly different instants.
pub fn debug_ring_system<Op: Send + 'static>(
    system: &RingSystem<Op>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    f.debug_struct("RingSystem")
        .field("lifecycle", &system.lifecycle())
        .field(
            "submission",
            &format_args!("{}/{}", system.submission_used(), system.submission_capacity()),
        )
        .field(
            "completion",
            &format_args!("{}/{}", system.completion_used(), system.completion_capacity()),
        )
        .field("in_flight", &system.in_flight())
        .field("workers", &system.worker_count())
        .field("stats", &system.stats())
        .finish()
}

// Debug proxy implementations that call the standalone debug functions
impl<T> fmt::Debug for Ring<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_ring(self, f)
    }
}

impl<Op: Send + 'static> fmt::Debug for RingSystem<Op> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_ring_system(self, f)
    }
}
