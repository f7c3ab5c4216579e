use super::errors::SimError;
use super::random::{normal, to_duration, RandomSource};
use super::types::{ProductType, SimTime, Stage};
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

/// Mean and spread of one stage's processing time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageTiming {
    pub mean: f64,
    pub std_dev: f64,
}

impl StageTiming {
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }
}

/// Number of parallel machines working each stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineCounts {
    pub raw_material: u32,
    pub machining: u32,
    pub assembly: u32,
    pub quality_control: u32,
    pub packaging: u32,
}

impl MachineCounts {
    /// Same count on every stage
    pub fn uniform(count: u32) -> Self {
        Self {
            raw_material: count,
            machining: count,
            assembly: count,
            quality_control: count,
            packaging: count,
        }
    }

    pub fn get(&self, stage: Stage) -> u32 {
        match stage {
            Stage::RawMaterial => self.raw_material,
            Stage::Machining => self.machining,
            Stage::Assembly => self.assembly,
            Stage::QualityControl => self.quality_control,
            Stage::Packaging => self.packaging,
        }
    }
}

impl Default for MachineCounts {
    fn default() -> Self {
        Self::uniform(1)
    }
}

/// Per-stage timings of the two product types the line builds by default.
pub const DEFAULT_CATALOG: [[StageTiming; Stage::COUNT]; 2] = [
    [
        StageTiming::new(2.0, 0.5),
        StageTiming::new(3.2, 0.6),
        StageTiming::new(2.5, 0.5),
        StageTiming::new(1.5, 0.3),
        StageTiming::new(1.0, 0.2),
    ],
    [
        StageTiming::new(3.0, 0.6),
        StageTiming::new(4.0, 0.7),
        StageTiming::new(3.5, 0.6),
        StageTiming::new(2.0, 0.4),
        StageTiming::new(1.5, 0.3),
    ],
];

/// Stage duration distributions for every product type, plus the machine
/// counts that divide each stage's sampled time.
#[derive(Debug, Clone)]
pub struct StageTimingTable {
    distributions: Vec<[Normal<f64>; Stage::COUNT]>,
    machine_counts: MachineCounts,
}

impl StageTimingTable {
    /// Build the table once; distributions are reused for every sample.
    pub fn new(
        catalog: &[[StageTiming; Stage::COUNT]],
        machine_counts: MachineCounts,
    ) -> Result<Self, SimError> {
        if catalog.is_empty() {
            return Err(SimError::InvalidConfiguration(
                "product catalog must contain at least one product type".to_string(),
            ));
        }
        for stage in Stage::ALL {
            if machine_counts.get(stage) == 0 {
                return Err(SimError::InvalidConfiguration(format!(
                    "machine count for {} must be positive",
                    stage
                )));
            }
        }

        let mut distributions = Vec::with_capacity(catalog.len());
        for timings in catalog {
            let [raw, machining, assembly, qc, packaging] = timings;
            distributions.push([
                normal(raw.mean, raw.std_dev)?,
                normal(machining.mean, machining.std_dev)?,
                normal(assembly.mean, assembly.std_dev)?,
                normal(qc.mean, qc.std_dev)?,
                normal(packaging.mean, packaging.std_dev)?,
            ]);
        }

        Ok(Self {
            distributions,
            machine_counts,
        })
    }

    /// Table over [`DEFAULT_CATALOG`]
    pub fn with_default_catalog(machine_counts: MachineCounts) -> Result<Self, SimError> {
        Self::new(&DEFAULT_CATALOG, machine_counts)
    }

    pub fn product_count(&self) -> usize {
        self.distributions.len()
    }

    /// Iterate over every product type in the catalog
    pub fn product_types(&self) -> impl Iterator<Item = ProductType> {
        (0..self.distributions.len()).map(ProductType)
    }

    pub fn contains(&self, product: ProductType) -> bool {
        product.index() < self.distributions.len()
    }

    pub fn machine_counts(&self) -> &MachineCounts {
        &self.machine_counts
    }

    pub fn distribution(&self, stage: Stage, product: ProductType) -> Option<&Normal<f64>> {
        self.distributions
            .get(product.index())
            .map(|stages| &stages[stage.index()])
    }

    /// Sample a stage's duration and spread it over the stage's machines.
    ///
    /// Returns `None` if `product` is outside the catalog.
    pub fn stage_duration(
        &self,
        stage: Stage,
        product: ProductType,
        rng: &mut RandomSource,
    ) -> Option<SimTime> {
        let distribution = self.distribution(stage, product)?;
        let whole = to_duration(rng.sample_normal(distribution));
        Some(whole / SimTime::from(self.machine_counts.get(stage)))
    }
}
