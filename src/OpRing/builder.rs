use super::RingSystem;
use crate::Core::config::RingConfig;
use crate::Core::error::RingResult;
use crate::Core::executor::Executor;

#[derive(Debug, Clone, Default)]
pub struct RingSystemBuilder {
    config: RingConfig,
}

impl RingSystemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration, e.g. [`RingConfig::from_env`].
    pub fn from_config(config: RingConfig) -> Self {
        Self { config }
    }

    pub fn with_submission_capacity(mut self, capacity: u32) -> Self {
        self.config.submission_capacity = capacity;
        self
    }

    pub fn with_completion_capacity(mut self, capacity: u32) -> Self {
        self.config.completion_capacity = capacity;
        self
    }

    pub fn with_workers(mut self, count: u32) -> Self {
        self.config.worker_count = count;
        self
    }

    pub fn with_thread_name(mut self, prefix: impl Into<String>) -> Self {
        self.config.thread_name = prefix.into();
        self
    }

    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    pub fn build<Op, E>(self, executor: E) -> RingResult<RingSystem<Op>>
    where
        Op: Send + 'static,
        E: Executor<Op>,
    {
        RingSystem::with_config(self.config, executor)
    }
}
