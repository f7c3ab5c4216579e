pub mod errors;
pub mod event;
pub mod event_scheduler;
pub mod execution;
pub mod random;
pub mod state;
pub mod timing;
pub mod types;

#[cfg(test)]
mod tests;
