// src/OpRing/system.rs

use crate::Core::config::RingConfig;
use crate::Core::error::{RingError, RingResult};
use crate::Core::executor::Executor;
use crate::Core::lifecycle::LifecycleState;
use crate::Core::stats::{RingStats, StatsSnapshot};
use crate::OpRing::builder::RingSystemBuilder;
use crate::OpRing::completion::CompletionQueue;
use crate::OpRing::submission::SubmissionQueue;
use crate::OpRing::worker::worker_loop;
use crate::OpRing::Structs::{CompletionRecord, Operation};

use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// State shared by callers and workers. The two queues are the only
/// mutable parts; everything else is fixed at creation.
pub(crate) struct Shared<Op> {
    pub(crate) submissions: SubmissionQueue<Op>,
    pub(crate) completions: CompletionQueue,
    pub(crate) executor: Box<dyn Executor<Op>>,
    pub(crate) stats: RingStats,
}

/// A submission ring and a completion ring drained by a fixed worker pool.
///
/// ```text
/// caller ── submit ──▶ [submission ring] ──▶ workers ──▶ [completion ring] ── wait_completion ──▶ caller
/// ```
///
/// - `submit` never blocks: a full ring is reported as [`RingError::RingFull`].
/// - Workers claim submissions in FIFO order and run them with no lock held.
/// - Completions arrive in the order operations finish, not the order they
///   were submitted; correlate through the tag.
///
/// The submission capacity bounds operations that were accepted but whose
/// completion has not been consumed yet, so draining one completion makes
/// room for exactly one more submission.
pub struct RingSystem<Op: Send + 'static = Operation> {
    pub(crate) shared: Arc<Shared<Op>>,
    pub(crate) workers: Mutex<Vec<JoinHandle<()>>>,
    pub(crate) config: RingConfig,
}

impl<Op: Send + 'static> RingSystem<Op> {
    /// Create a system with the default worker thread name.
    ///
    /// Both capacities must be powers of two and
    /// `completion_capacity >= submission_capacity`.
    pub fn create<E>(
        submission_capacity: u32,
        completion_capacity: u32,
        worker_count: u32,
        executor: E,
    ) -> RingResult<Self>
    where
        E: Executor<Op>,
    {
        RingSystemBuilder::new()
            .with_submission_capacity(submission_capacity)
            .with_completion_capacity(completion_capacity)
            .with_workers(worker_count)
            .build(executor)
    }

    /// Allocate both rings and start the workers.
    pub fn with_config<E>(config: RingConfig, executor: E) -> RingResult<Self>
    where
        E: Executor<Op>,
    {
        config.validate()?;

        let shared = Arc::new(Shared {
            submissions: SubmissionQueue::new(config.submission_capacity),
            completions: CompletionQueue::new(config.completion_capacity),
            executor: Box::new(executor),
            stats: RingStats::new(),
        });

        let system = Self {
            shared,
            workers: Mutex::new(Vec::with_capacity(config.worker_count as usize)),
            config,
        };

        for worker_id in 0..system.config.worker_count {
            let shared = Arc::clone(&system.shared);
            let spawned = thread::Builder::new()
                .name(format!("{}-{}", system.config.thread_name, worker_id))
                .spawn(move || worker_loop(shared, worker_id));
            match spawned {
                Ok(handle) => system.workers.lock().push(handle),
                Err(e) => {
                    tracing::error!(worker_id, error = %e, "failed to spawn worker thread");
                    // Dropping `system` stops and joins the workers already running.
                    return Err(RingError::WorkerSpawn);
                }
            }
        }

        tracing::debug!(
            submission_capacity = system.config.submission_capacity,
            completion_capacity = system.config.completion_capacity,
            workers = system.config.worker_count,
            "ring system started"
        );
        Ok(system)
    }

    /// Queue one operation.
    ///
    /// # Returns
    /// * `Ok(())` if the operation was accepted; exactly one completion
    ///   carrying `tag` will follow
    /// * `Err(RingError::RingFull)` if the in-flight budget is exhausted
    /// * `Err(RingError::ShuttingDown)` once shutdown has begun
    pub fn submit(&self, operation: Op, tag: u64) -> RingResult<()> {
        match self.shared.submissions.submit(operation, tag) {
            Ok(()) => {
                self.shared.stats.record_submitted(1);
                Ok(())
            }
            Err(e) => {
                self.shared.stats.record_rejected(1);
                tracing::trace!(tag, error = %e, "submission rejected");
                Err(e)
            }
        }
    }

    /// Queue a batch of `(operation, tag)` pairs.
    ///
    /// All or nothing: if the whole batch does not fit, nothing is queued
    /// and `RingFull` is returned. Returns the number of queued entries.
    pub fn submit_batch<I>(&self, entries: I) -> RingResult<usize>
    where
        I: IntoIterator<Item = (Op, u64)>,
    {
        let entries: Vec<(Op, u64)> = entries.into_iter().collect();
        let len = entries.len();
        match self.shared.submissions.submit_batch(entries) {
            Ok(count) => {
                self.shared.stats.record_submitted(count as u64);
                Ok(count)
            }
            Err(e) => {
                self.shared.stats.record_rejected(len as u64);
                tracing::trace!(len, error = %e, "batch submission rejected");
                Err(e)
            }
        }
    }

    /// Take the oldest completion, blocking until one is available.
    ///
    /// # Arguments
    /// * `timeout` - `None` waits indefinitely
    ///
    /// # Returns
    /// * `Ok(record)` with the finished operation's tag and result code
    /// * `Err(RingError::TimedOut)` if the deadline passed first
    /// * `Err(RingError::ShutDown)` if the pool stopped and nothing is left
    pub fn wait_completion(&self, timeout: Option<Duration>) -> RingResult<CompletionRecord> {
        let record = self.shared.completions.wait(timeout)?;
        self.shared.submissions.retire(1);
        self.shared.stats.record_consumed(1);
        Ok(record)
    }

    /// Stop accepting work, let the workers finish everything already
    /// accepted, join them, and hand back completions nobody consumed.
    ///
    /// Waiting callers are woken; once the returned records have been taken
    /// they see [`RingError::ShutDown`]. Calling this again returns an
    /// empty vector.
    pub fn shutdown(&self) -> Vec<CompletionRecord> {
        if self.shared.submissions.close() {
            tracing::debug!("ring system shutting down");
        }
        self.shared.completions.begin_shutdown();

        // Held across the joins so a concurrent shutdown waits for this one.
        let mut workers = self.workers.lock();
        for handle in workers.drain(..) {
            let name = handle.thread().name().map(str::to_owned);
            if handle.join().is_err() {
                tracing::error!(worker = ?name, "worker thread panicked");
            }
        }

        // Only non-empty if every worker died early.
        let unclaimed = self.shared.submissions.stop_and_drain();
        if !unclaimed.is_empty() {
            tracing::warn!(count = unclaimed.len(), "dropping submissions no worker claimed");
            self.shared.submissions.retire(unclaimed.len() as u32);
        }

        let leftover = self.shared.completions.stop_and_drain();
        if !leftover.is_empty() {
            self.shared.submissions.retire(leftover.len() as u32);
            self.shared.stats.record_consumed(leftover.len() as u64);
        }
        drop(workers);

        tracing::debug!(undelivered = leftover.len(), "ring system stopped");
        leftover
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.shared.submissions.lifecycle()
    }

    /// Entries waiting in the submission ring (not yet claimed by a worker).
    pub fn submission_used(&self) -> u32 {
        self.shared.submissions.capacity_used()
    }

    /// Entries waiting in the completion ring.
    pub fn completion_used(&self) -> u32 {
        self.shared.completions.capacity_used()
    }

    /// Accepted operations whose completion has not been consumed.
    pub fn in_flight(&self) -> u32 {
        self.shared.submissions.in_flight()
    }

    pub fn submission_capacity(&self) -> u32 {
        self.config.submission_capacity
    }

    pub fn completion_capacity(&self) -> u32 {
        self.config.completion_capacity
    }

    pub fn worker_count(&self) -> u32 {
        self.config.worker_count
    }

    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.shared.stats.snapshot()
    }
}

impl<Op: Send + 'static> Drop for RingSystem<Op> {
    fn drop(&mut self) {
        if self.lifecycle().is_stopped() {
            return;
        }
        let leftover = self.shutdown();
        if !leftover.is_empty() {
            tracing::debug!(count = leftover.len(), "discarding completions on drop");
        }
    }
}
