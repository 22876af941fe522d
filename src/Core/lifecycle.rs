use std::fmt;

/// Lifecycle of one ring system instance.
///
/// Each ring direction keeps its own copy under its own lock so that a
/// waiter always observes the state change and the wakeup together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// Accepting submissions, workers running.
    #[default]
    Running,
    /// No new submissions; workers drain what was already accepted.
    ShuttingDown,
    /// Workers joined.
    Stopped,
}

impl LifecycleState {
    #[inline]
    pub fn accepts_submissions(self) -> bool {
        self == LifecycleState::Running
    }

    #[inline]
    pub fn is_stopped(self) -> bool {
        self == LifecycleState::Stopped
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Running => "running",
            LifecycleState::ShuttingDown => "shutting-down",
            LifecycleState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}
