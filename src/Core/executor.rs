//! The execution capability supplied by the embedding system.

/// Executes one claimed operation and returns its result code.
///
/// Called by exactly one worker per accepted submission, outside of any
/// ring lock, so an implementation may block for as long as the work takes.
/// By convention a negative result is a negated errno and anything else is
/// success.
pub trait Executor<Op>: Send + Sync + 'static {
    fn execute(&self, op: &Op) -> i64;
}

impl<Op, F> Executor<Op> for F
where
    F: Fn(&Op) -> i64 + Send + Sync + 'static,
{
    #[inline]
    fn execute(&self, op: &Op) -> i64 {
        self(op)
    }
}
