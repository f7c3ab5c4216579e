//! Configuration for a production line simulation run
//!
//! Values are fixed for the whole run and validated once before any event is
//! scheduled.

use crate::core::errors::SimError;
use crate::core::timing::MachineCounts;
use crate::core::types::{SimTime, Stage, MAX_TIME};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Parallel machines per stage; each stage's sampled time is divided by its count
    pub machine_counts: MachineCounts,
    /// Time needed to retool machining for a different product type
    pub setup_time: SimTime,
    /// Offset of the first maintenance event from time zero
    pub maintenance_interval: SimTime,
    /// Shift-end threshold and the delay of shift-triggered maintenance
    pub shift_length: SimTime,
    /// Length of each recurring maintenance cycle
    pub maintenance_duration: SimTime,
    /// No event later than this is processed
    pub horizon: SimTime,
    pub mean_arrival_gap: f64,
    pub mean_time_between_failures: f64,
    pub repair_min: SimTime,
    pub repair_max: SimTime,
    /// Master seed; drawn from OS entropy when `None`
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            machine_counts: MachineCounts::default(),
            setup_time: 5,
            maintenance_interval: 50,
            shift_length: 40,
            maintenance_duration: 60,
            horizon: MAX_TIME,
            mean_arrival_gap: 4.5,
            mean_time_between_failures: 50.0,
            repair_min: 30,
            repair_max: 120,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_machine_counts(mut self, counts: MachineCounts) -> Self {
        self.machine_counts = counts;
        self
    }

    pub fn with_setup_time(mut self, time: SimTime) -> Self {
        self.setup_time = time;
        self
    }

    pub fn with_maintenance_interval(mut self, interval: SimTime) -> Self {
        self.maintenance_interval = interval;
        self
    }

    pub fn with_shift_length(mut self, length: SimTime) -> Self {
        self.shift_length = length;
        self
    }

    pub fn with_maintenance_duration(mut self, duration: SimTime) -> Self {
        self.maintenance_duration = duration;
        self
    }

    pub fn with_horizon(mut self, horizon: SimTime) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_repair_range(mut self, min: SimTime, max: SimTime) -> Self {
        self.repair_min = min;
        self.repair_max = max;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Reject any value that would make the run meaningless
    pub fn validate(&self) -> Result<(), SimError> {
        for stage in Stage::ALL {
            if self.machine_counts.get(stage) == 0 {
                return Err(invalid(format!("machine count for {} must be positive", stage)));
            }
        }

        let durations = [
            ("setup time", self.setup_time),
            ("maintenance interval", self.maintenance_interval),
            ("shift length", self.shift_length),
            ("maintenance duration", self.maintenance_duration),
            ("horizon", self.horizon),
        ];
        for (name, value) in durations {
            if value == 0 {
                return Err(invalid(format!("{} must be positive", name)));
            }
        }

        for (name, mean) in [
            ("mean arrival gap", self.mean_arrival_gap),
            ("mean time between failures", self.mean_time_between_failures),
        ] {
            if !mean.is_finite() || mean <= 0.0 {
                return Err(invalid(format!("{} must be positive and finite, got {}", name, mean)));
            }
        }

        if self.repair_min == 0 || self.repair_min > self.repair_max {
            return Err(invalid(format!(
                "repair range {}..={} must be non-empty and start above zero",
                self.repair_min, self.repair_max
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> SimError {
    SimError::InvalidConfiguration(message)
}
