//! Error types for the ring system

use std::fmt;
use std::io;

/// Result type for ring system operations
pub type RingResult<T> = Result<T, RingError>;

/// Errors surfaced to callers of the ring system.
///
/// Execution failures of an operation are never reported here; they travel
/// as the `result_code` of an ordinary completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    /// Submission ring (or its in-flight budget) is at capacity
    RingFull,

    /// Shutdown has begun; new submissions are rejected
    ShuttingDown,

    /// Completion wait reached its deadline with nothing available
    TimedOut,

    /// The pool has stopped and no completions remain
    ShutDown,

    /// Rejected configuration
    InvalidConfig(&'static str),

    /// The OS refused to start a worker thread
    WorkerSpawn,
}

impl RingError {
    /// Whether retrying the same call later can succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RingError::RingFull | RingError::TimedOut)
    }
}

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingError::RingFull => write!(f, "submission ring full"),
            RingError::ShuttingDown => write!(f, "ring system is shutting down"),
            RingError::TimedOut => write!(f, "timed out waiting for a completion"),
            RingError::ShutDown => write!(f, "ring system has shut down"),
            RingError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
            RingError::WorkerSpawn => write!(f, "failed to spawn worker thread"),
        }
    }
}

impl std::error::Error for RingError {}

impl From<RingError> for io::Error {
    fn from(err: RingError) -> Self {
        let kind = match err {
            RingError::RingFull => io::ErrorKind::WouldBlock,
            RingError::TimedOut => io::ErrorKind::TimedOut,
            RingError::ShuttingDown | RingError::ShutDown => io::ErrorKind::BrokenPipe,
            RingError::InvalidConfig(_) => io::ErrorKind::InvalidInput,
            RingError::WorkerSpawn => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}
