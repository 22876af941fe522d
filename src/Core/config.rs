//! Ring system configuration

use super::error::{RingError, RingResult};
use std::str::FromStr;

/// Hard upper bound on the worker count.
pub const MAX_WORKERS: u32 = 64;

pub const ENV_SUBMISSION_CAPACITY: &str = "DMXP_RING_SUBMISSION_CAPACITY";
pub const ENV_COMPLETION_CAPACITY: &str = "DMXP_RING_COMPLETION_CAPACITY";
pub const ENV_WORKERS: &str = "DMXP_RING_WORKERS";
pub const ENV_THREAD_NAME: &str = "DMXP_RING_THREAD_NAME";

/// Configuration for a [`RingSystem`](crate::OpRing::RingSystem)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingConfig {
    /// Slots in the submission ring; also the in-flight budget (power of two)
    pub submission_capacity: u32,

    /// Slots in the completion ring (power of two, >= submission_capacity)
    pub completion_capacity: u32,

    /// Number of worker threads
    pub worker_count: u32,

    /// Worker threads are named `{prefix}-{id}`
    pub thread_name: String,
}

impl Default for RingConfig {
    fn default() -> Self {
        // Same sizing rule as a fixed syscall pool: half the CPUs, 2..=8.
        let cpus = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        Self {
            submission_capacity: 256,
            completion_capacity: 512,
            worker_count: (cpus / 2).clamp(2, 8) as u32,
            thread_name: "dmxp-ring-worker".to_string(),
        }
    }
}

impl RingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with any `DMXP_RING_*` environment variables.
    ///
    /// A variable that is set but does not parse is an error rather than
    /// being silently ignored.
    pub fn from_env() -> RingResult<Self> {
        let mut config = Self::default();
        if let Some(n) = env_parse(ENV_SUBMISSION_CAPACITY)? {
            config.submission_capacity = n;
        }
        if let Some(n) = env_parse(ENV_COMPLETION_CAPACITY)? {
            config.completion_capacity = n;
        }
        if let Some(n) = env_parse(ENV_WORKERS)? {
            config.worker_count = n;
        }
        if let Ok(name) = std::env::var(ENV_THREAD_NAME) {
            config.thread_name = name;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn submission_capacity(mut self, n: u32) -> Self {
        self.submission_capacity = n;
        self
    }

    pub fn completion_capacity(mut self, n: u32) -> Self {
        self.completion_capacity = n;
        self
    }

    pub fn worker_count(mut self, n: u32) -> Self {
        self.worker_count = n;
        self
    }

    pub fn thread_name(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name = prefix.into();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> RingResult<()> {
        if !self.submission_capacity.is_power_of_two() {
            return Err(RingError::InvalidConfig(
                "submission_capacity must be a non-zero power of two",
            ));
        }
        if !self.completion_capacity.is_power_of_two() {
            return Err(RingError::InvalidConfig(
                "completion_capacity must be a non-zero power of two",
            ));
        }
        // Workers must always find room for their completion.
        if self.completion_capacity < self.submission_capacity {
            return Err(RingError::InvalidConfig(
                "completion_capacity must be >= submission_capacity",
            ));
        }
        if self.worker_count == 0 {
            return Err(RingError::InvalidConfig("worker_count must be at least 1"));
        }
        if self.worker_count > MAX_WORKERS {
            return Err(RingError::InvalidConfig("worker_count exceeds maximum"));
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(key: &'static str) -> RingResult<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| RingError::InvalidConfig(key)),
        Err(_) => Ok(None),
    }
}
