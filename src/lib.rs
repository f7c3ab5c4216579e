pub mod core;
pub mod prompt;

// Re-export commonly used types
pub use crate::core::errors::SimError;
pub use crate::core::event::{Event, EventType};
pub use crate::core::event_scheduler::EventQueue;
pub use crate::core::execution::{
    ConsoleObserver, EventProcessor, EventRecord, ProcessOutcome, RunReport, SimulationConfig,
    SimulationDriver, SimulationObserver,
};
pub use crate::core::random::RandomSource;
pub use crate::core::state::ResourceState;
pub use crate::core::timing::{MachineCounts, StageTiming, StageTimingTable};
pub use crate::core::types::{ProductType, SimTime, Stage, MAX_TIME};
