// Module naming follows project convention (OpRing = operation submission/completion ring pair)
#[allow(non_snake_case)]
pub mod OpRing;

#[allow(non_snake_case)]
pub mod Core;

#[allow(non_snake_case)]
pub mod Debug {
    pub mod StructDebug;
}

pub use Core::config::RingConfig;
pub use Core::error::{RingError, RingResult};
pub use Core::executor::Executor;
pub use Core::lifecycle::LifecycleState;
pub use Core::stats::StatsSnapshot;
pub use OpRing::Structs::{CompletionRecord, Operation, OperationKind};
pub use OpRing::{RingSystem, RingSystemBuilder};
