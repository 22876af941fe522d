// src/OpRing/completion.rs

use crate::Core::error::{RingError, RingResult};
use crate::Core::lifecycle::LifecycleState;
use crate::OpRing::Buffer::Ring;
use crate::OpRing::Structs::CompletionRecord;

use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// Everything guarded by the completion lock.
pub(crate) struct CompletionState {
    pub(crate) ring: Ring<CompletionRecord>,
    pub(crate) lifecycle: LifecycleState,
}

/// Worker → caller direction: the completion ring and the condition
/// blocked callers sleep on.
///
/// Consumption is serialized by the lock, so any number of callers may wait
/// at once; each record goes to exactly one of them.
pub(crate) struct CompletionQueue {
    pub(crate) state: Mutex<CompletionState>,
    ready: Condvar,
}

impl CompletionQueue {
    pub(crate) fn new(capacity: u32) -> Self {
        Self {
            state: Mutex::new(CompletionState {
                ring: Ring::new(capacity),
                lifecycle: LifecycleState::Running,
            }),
            ready: Condvar::new(),
        }
    }

    /// Append a record and wake one waiting caller.
    ///
    /// # Panics
    /// If the ring is full. The completion ring is at least as large as the
    /// in-flight budget, so a full ring here means that bound was broken.
    pub(crate) fn publish(&self, record: CompletionRecord) {
        {
            let mut state = self.state.lock();
            if state.ring.push(record).is_err() {
                let (head, tail) = state.ring.cursors();
                tracing::error!(
                    head,
                    tail,
                    capacity = state.ring.capacity(),
                    tag = record.submitter_tag,
                    "completion ring overflow"
                );
                panic!(
                    "invariant violated: completion ring full (head={head}, tail={tail}, capacity={})",
                    state.ring.capacity()
                );
            }
        }
        self.ready.notify_one();
    }

    /// Block until a record is available, the deadline passes, or the pool
    /// has stopped with nothing left to hand out.
    ///
    /// `None` waits without a deadline.
    pub(crate) fn wait(&self, timeout: Option<Duration>) -> RingResult<CompletionRecord> {
        // A timeout too large to represent is treated as no timeout.
        let deadline = timeout.and_then(|t| Instant::now().checked_add(t));
        let mut state = self.state.lock();
        loop {
            if let Some(record) = state.ring.pop() {
                return Ok(record);
            }
            if state.lifecycle.is_stopped() {
                return Err(RingError::ShutDown);
            }
            match deadline {
                None => self.ready.wait(&mut state),
                Some(deadline) => {
                    if Instant::now() >= deadline {
                        return Err(RingError::TimedOut);
                    }
                    // Loop around either way: the predicate is re-checked
                    // before the deadline is.
                    let _ = self.ready.wait_until(&mut state, deadline);
                }
            }
        }
    }

    /// Wake every waiter so it re-checks the lifecycle.
    pub(crate) fn begin_shutdown(&self) {
        {
            let mut state = self.state.lock();
            if state.lifecycle == LifecycleState::Running {
                state.lifecycle = LifecycleState::ShuttingDown;
            }
        }
        self.ready.notify_all();
    }

    /// Mark stopped and take every record no caller has consumed.
    pub(crate) fn stop_and_drain(&self) -> Vec<CompletionRecord> {
        let leftover = {
            let mut state = self.state.lock();
            state.lifecycle = LifecycleState::Stopped;
            state.ring.drain()
        };
        self.ready.notify_all();
        leftover
    }

    pub(crate) fn capacity_used(&self) -> u32 {
        self.state.lock().ring.capacity_used()
    }
}
