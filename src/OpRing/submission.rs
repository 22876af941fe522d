// src/OpRing/submission.rs

use crate::Core::error::{RingError, RingResult};
use crate::Core::lifecycle::LifecycleState;
use crate::OpRing::Buffer::Ring;
use crate::OpRing::Structs::OperationSlot;

use parking_lot::{Condvar, Mutex};

/// Everything guarded by the submission lock.
pub(crate) struct SubmissionState<Op> {
    pub(crate) ring: Ring<Option<OperationSlot<Op>>>,
    /// Accepted operations whose completion has not been consumed yet.
    /// Bounded by the ring capacity; this is what callers feel as backpressure.
    pub(crate) in_flight: u32,
    pub(crate) lifecycle: LifecycleState,
}

/// Caller → worker direction: the submission ring, its slot table and the
/// condition idle workers sleep on.
pub(crate) struct SubmissionQueue<Op> {
    pub(crate) state: Mutex<SubmissionState<Op>>,
    work_ready: Condvar,
}

impl<Op> SubmissionQueue<Op> {
    pub(crate) fn new(capacity: u32) -> Self {
        Self {
            state: Mutex::new(SubmissionState {
                ring: Ring::new(capacity),
                in_flight: 0,
                lifecycle: LifecycleState::Running,
            }),
            work_ready: Condvar::new(),
        }
    }

    /// Place one operation into the ring. Never blocks.
    pub(crate) fn submit(&self, operation: Op, tag: u64) -> RingResult<()> {
        {
            let mut state = self.state.lock();
            if !state.lifecycle.accepts_submissions() {
                return Err(RingError::ShuttingDown);
            }
            if state.in_flight >= state.ring.capacity() {
                return Err(RingError::RingFull);
            }
            if state
                .ring
                .push(Some(OperationSlot::pending(operation, tag)))
                .is_err()
            {
                return Err(RingError::RingFull);
            }
            state.in_flight += 1;
        }
        self.work_ready.notify_one();
        Ok(())
    }

    /// Place every entry or none of them.
    pub(crate) fn submit_batch(&self, entries: Vec<(Op, u64)>) -> RingResult<usize> {
        let count = entries.len();
        if count == 0 {
            return Ok(0);
        }
        {
            let mut state = self.state.lock();
            if !state.lifecycle.accepts_submissions() {
                return Err(RingError::ShuttingDown);
            }
            let budget = state.ring.capacity() - state.in_flight;
            if count > budget.min(state.ring.free()) as usize {
                return Err(RingError::RingFull);
            }
            for (operation, tag) in entries {
                // Room was checked above under the same guard.
                if state
                    .ring
                    .push(Some(OperationSlot::pending(operation, tag)))
                    .is_err()
                {
                    return Err(RingError::RingFull);
                }
                state.in_flight += 1;
            }
        }
        if count == 1 {
            self.work_ready.notify_one();
        } else {
            self.work_ready.notify_all();
        }
        Ok(count)
    }

    /// Block until the oldest unclaimed submission can be taken.
    ///
    /// Returns `None` once the queue is closed and empty, which is the
    /// worker's signal to exit. Already-accepted work is always handed out
    /// first, even after shutdown begins.
    pub(crate) fn claim(&self) -> Option<OperationSlot<Op>> {
        let mut state = self.state.lock();
        loop {
            // Published entries are always `Some`.
            if let Some(slot) = state.ring.pop().flatten() {
                return Some(slot);
            }
            if !state.lifecycle.accepts_submissions() {
                return None;
            }
            self.work_ready.wait(&mut state);
        }
    }

    /// Give back in-flight budget for `n` consumed completions.
    pub(crate) fn retire(&self, n: u32) {
        let mut state = self.state.lock();
        debug_assert!(state.in_flight >= n, "retired more operations than accepted");
        state.in_flight = state.in_flight.saturating_sub(n);
    }

    /// Stop accepting submissions and wake every idle worker.
    ///
    /// Returns `true` for the call that performed the transition.
    pub(crate) fn close(&self) -> bool {
        let closed = {
            let mut state = self.state.lock();
            if state.lifecycle == LifecycleState::Running {
                state.lifecycle = LifecycleState::ShuttingDown;
                true
            } else {
                false
            }
        };
        self.work_ready.notify_all();
        closed
    }

    /// Mark the queue stopped and take whatever no worker claimed.
    pub(crate) fn stop_and_drain(&self) -> Vec<OperationSlot<Op>> {
        let mut state = self.state.lock();
        state.lifecycle = LifecycleState::Stopped;
        state.ring.drain().into_iter().flatten().collect()
    }

    pub(crate) fn lifecycle(&self) -> LifecycleState {
        self.state.lock().lifecycle
    }

    pub(crate) fn capacity_used(&self) -> u32 {
        self.state.lock().ring.capacity_used()
    }

    pub(crate) fn in_flight(&self) -> u32 {
        self.state.lock().in_flight
    }
}
