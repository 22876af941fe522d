//! Worker thread main loop.
//!
//! Workers are symmetric and keep no state between operations: claim the
//! oldest submission, run it with no lock held, publish the completion.

use crate::Core::executor::Executor;
use crate::OpRing::Structs::RESULT_EXECUTOR_PANIC;
use crate::OpRing::system::Shared;

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

pub(crate) fn worker_loop<Op: Send + 'static>(shared: Arc<Shared<Op>>, worker_id: u32) {
    tracing::debug!(worker_id, "worker started");

    // `claim` only returns None once shutdown began and the ring is empty.
    while let Some(mut slot) = shared.submissions.claim() {
        let result = execute_guarded(shared.executor.as_ref(), &slot.operation, worker_id);
        let record = slot.complete(result);
        shared.stats.record_executed();
        tracing::trace!(
            worker_id,
            tag = record.submitter_tag,
            result = record.result_code,
            "operation completed"
        );
        shared.completions.publish(record);
    }

    tracing::debug!(worker_id, "worker exiting");
}

/// Run the executor, turning a panic into an ordinary error completion so
/// the worker survives and the caller still hears back.
fn execute_guarded<Op: 'static>(executor: &dyn Executor<Op>, op: &Op, worker_id: u32) -> i64 {
    match panic::catch_unwind(AssertUnwindSafe(|| executor.execute(op))) {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(worker_id, "executor panicked; reporting EIO");
            RESULT_EXECUTOR_PANIC
        }
    }
}
