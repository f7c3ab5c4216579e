use serde::{Deserialize, Serialize};

/// Simulated time in whole time units.
pub type SimTime = u64;

/// Horizon used when none is configured.
pub const MAX_TIME: SimTime = 100;

/// Index into the product-type catalog of a [`StageTimingTable`](super::timing::StageTimingTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductType(pub usize);

impl ProductType {
    /// Get the raw catalog index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The five sequential production stages a unit passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    RawMaterial,
    Machining,
    Assembly,
    QualityControl,
    Packaging,
}

impl Stage {
    pub const COUNT: usize = 5;

    /// All stages in production order
    pub const ALL: [Stage; Stage::COUNT] = [
        Stage::RawMaterial,
        Stage::Machining,
        Stage::Assembly,
        Stage::QualityControl,
        Stage::Packaging,
    ];

    /// Position of the stage in the production order
    pub fn index(&self) -> usize {
        match self {
            Stage::RawMaterial => 0,
            Stage::Machining => 1,
            Stage::Assembly => 2,
            Stage::QualityControl => 3,
            Stage::Packaging => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::RawMaterial => "raw material handling",
            Stage::Machining => "machining",
            Stage::Assembly => "assembly",
            Stage::QualityControl => "quality control",
            Stage::Packaging => "packaging",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
