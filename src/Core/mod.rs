pub mod config;
pub mod error;
pub mod executor;
pub mod lifecycle;
pub mod stats;

pub use config::RingConfig;
pub use error::{RingError, RingResult};
pub use executor::Executor;
pub use lifecycle::LifecycleState;
