pub mod config;
pub mod processor;
pub mod simulation_driver;

pub use config::SimulationConfig;
pub use processor::{EventProcessor, EventRecord, ProcessOutcome};
pub use simulation_driver::{ConsoleObserver, RunReport, SimulationDriver, SimulationObserver};
