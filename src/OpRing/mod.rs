mod builder;
mod completion;
mod submission;
mod system;
mod worker;

pub use builder::RingSystemBuilder;
pub use system::RingSystem;

pub mod Buffer {
    pub mod Buffer;
    pub mod Buffer_impl;
    pub use Buffer::{Position, Ring}; // re-export for stable path
}

pub mod Structs {
    pub mod Slot_Structs;
    pub use Slot_Structs::{
        CompletionRecord, Operation, OperationKind, OperationSlot, RESULT_EXECUTOR_PANIC,
    }; // re-export for stable path
}
