//! Seeded random sampling for the production line.
//!
//! Every sampling role owns its own [`StdRng`], derived from a single master
//! seed. Adding or removing draws in one role never shifts the sequence seen
//! by another, so repair timing does not depend on how many stage samples
//! happened before a failure.

use super::errors::SimError;
use super::types::SimTime;
use log::trace;
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_distr::{Distribution, Exp, Normal};

/// Shortest gap between two arrivals of the same product type.
pub const MIN_ARRIVAL_GAP: SimTime = 1;

/// The independent purposes random draws are made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplingRole {
    Arrival,
    StageDuration,
    Failure,
    Repair,
}

/// Convert a continuous sample into a non-negative whole duration.
///
/// Non-finite and non-positive samples become 0; everything else is rounded
/// half-up to the nearest time unit.
pub fn to_duration(sample: f64) -> SimTime {
    if !sample.is_finite() || sample <= 0.0 {
        return 0;
    }
    sample.round() as SimTime
}

/// Build an exponential distribution from its mean
pub fn exponential_with_mean(mean: f64) -> Result<Exp<f64>, SimError> {
    if !mean.is_finite() || mean <= 0.0 {
        return Err(SimError::InvalidDistribution(format!(
            "exponential mean must be positive and finite, got {}",
            mean
        )));
    }
    Exp::new(1.0 / mean).map_err(|e| SimError::InvalidDistribution(format!("{:?}", e)))
}

/// Build a normal distribution, rejecting negative or non-finite spread
pub fn normal(mean: f64, std_dev: f64) -> Result<Normal<f64>, SimError> {
    if !mean.is_finite() || !std_dev.is_finite() || std_dev < 0.0 {
        return Err(SimError::InvalidDistribution(format!(
            "normal({}, {}) needs a finite mean and a finite non-negative std-dev",
            mean, std_dev
        )));
    }
    Normal::new(mean, std_dev).map_err(|e| SimError::InvalidDistribution(format!("{:?}", e)))
}

pub struct RandomSource {
    seed: u64,
    arrival_rng: StdRng,
    stage_rng: StdRng,
    failure_rng: StdRng,
    repair_rng: StdRng,
    arrival_gap: Exp<f64>,
    failure_gap: Exp<f64>,
    repair_time: Uniform<SimTime>,
}

impl RandomSource {
    /// Create a RandomSource whose streams all derive from `seed`
    pub fn new(
        seed: u64,
        mean_arrival_gap: f64,
        mean_time_between_failures: f64,
        repair_range: (SimTime, SimTime),
    ) -> Result<Self, SimError> {
        let (repair_min, repair_max) = repair_range;
        if repair_min > repair_max {
            return Err(SimError::InvalidDistribution(format!(
                "repair range {}..={} is inverted",
                repair_min, repair_max
            )));
        }

        // Fixed draw order keeps each role's stream stable for a given seed.
        let mut master = StdRng::seed_from_u64(seed);
        let arrival_rng = StdRng::seed_from_u64(master.next_u64());
        let stage_rng = StdRng::seed_from_u64(master.next_u64());
        let failure_rng = StdRng::seed_from_u64(master.next_u64());
        let repair_rng = StdRng::seed_from_u64(master.next_u64());

        Ok(Self {
            seed,
            arrival_rng,
            stage_rng,
            failure_rng,
            repair_rng,
            arrival_gap: exponential_with_mean(mean_arrival_gap)?,
            failure_gap: exponential_with_mean(mean_time_between_failures)?,
            repair_time: Uniform::new_inclusive(repair_min, repair_max),
        })
    }

    /// Pick a fresh master seed from OS entropy
    pub fn entropy_seed() -> u64 {
        rand::thread_rng().gen()
    }

    /// The master seed this source was built from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw from a stage-duration distribution
    pub fn sample_normal(&mut self, distribution: &Normal<f64>) -> f64 {
        distribution.sample(&mut self.stage_rng)
    }

    /// Draw an inter-event gap for an exponential role (arrival or failure)
    pub fn sample_exponential(&mut self, role: SamplingRole) -> Result<f64, SimError> {
        let sample = match role {
            SamplingRole::Arrival => self.arrival_gap.sample(&mut self.arrival_rng),
            SamplingRole::Failure => self.failure_gap.sample(&mut self.failure_rng),
            other => {
                return Err(SimError::InvalidDistribution(format!(
                    "{:?} has no exponential distribution",
                    other
                )))
            }
        };
        trace!("{:?} exponential sample {:.3}", role, sample);
        Ok(sample)
    }

    /// Draw a repair duration uniformly from the configured range
    pub fn sample_uniform_int(&mut self) -> SimTime {
        self.repair_time.sample(&mut self.repair_rng)
    }

    /// Arrival gap converted with [`to_duration`], never shorter than one
    /// time unit so a product type arrives at most once per unit of time
    pub fn arrival_gap(&mut self) -> Result<SimTime, SimError> {
        self.sample_exponential(SamplingRole::Arrival)
            .map(|sample| to_duration(sample).max(MIN_ARRIVAL_GAP))
    }

    /// Failure gap converted with [`to_duration`]
    pub fn failure_gap(&mut self) -> Result<SimTime, SimError> {
        self.sample_exponential(SamplingRole::Failure).map(to_duration)
    }
}

impl std::fmt::Debug for RandomSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomSource")
            .field("seed", &self.seed)
            .field("repair_time", &self.repair_time)
            .finish()
    }
}
