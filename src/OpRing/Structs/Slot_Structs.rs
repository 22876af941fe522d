// Descriptors stored in the two slot tables

/// Negated errno reported when the executor panics while running an operation.
pub const RESULT_EXECUTOR_PANIC: i64 = -(libc::EIO as i64);

/// What an [`Operation`] asks the executor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OperationKind {
    #[default]
    Nop,
    Read,
    Write,
    Fsync,
    /// Embedder-defined opcode.
    Custom(u32),
}

/// Built-in operation payload: an opcode plus its input bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Operation {
    pub kind: OperationKind,
    pub payload: Vec<u8>,
}

impl Operation {
    pub fn new(kind: OperationKind, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            payload: payload.into(),
        }
    }

    pub fn nop() -> Self {
        Self::default()
    }
}

/// One entry of the submission slot table.
///
/// The table itself stores `Option<OperationSlot<Op>>`: a submitter fills a
/// vacant entry under the submission lock and the worker that claims it
/// moves it out whole, recording the result on its own copy. Storage is
/// therefore free again as soon as the operation is claimed.
///
/// `result_code` and `completed` are filled in by [`OperationSlot::complete`]
/// so a slot inspected after execution (in a debugger or a log line) shows
/// its outcome alongside the operation.
#[derive(Debug)]
pub struct OperationSlot<Op> {
    pub operation: Op,
    pub submitter_tag: u64,
    pub result_code: i64,
    pub completed: bool,
}

impl<Op> OperationSlot<Op> {
    pub(crate) fn pending(operation: Op, submitter_tag: u64) -> Self {
        Self {
            operation,
            submitter_tag,
            result_code: 0,
            completed: false,
        }
    }

    pub(crate) fn complete(&mut self, result_code: i64) -> CompletionRecord {
        self.result_code = result_code;
        self.completed = true;
        CompletionRecord {
            submitter_tag: self.submitter_tag,
            result_code,
        }
    }
}

/// A finished operation as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CompletionRecord {
    /// The tag passed to `submit`, returned unchanged.
    pub submitter_tag: u64,
    /// Whatever the executor returned.
    pub result_code: i64,
}

impl CompletionRecord {
    #[inline]
    pub fn is_error(&self) -> bool {
        self.result_code < 0
    }
}
