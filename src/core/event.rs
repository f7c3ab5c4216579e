use super::types::{ProductType, SimTime, Stage};
use serde::{Deserialize, Serialize};

/// Closed set of things that can happen on the production line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Arrival,
    EndRawMaterial,
    EndMachining,
    EndAssembly,
    EndQualityControl,
    EndPackaging,
    SetupChange,
    MachineFailure,
    Maintenance,
}

impl EventType {
    /// Machine-wide events carry no product type.
    pub fn is_machine_wide(&self) -> bool {
        matches!(self, EventType::MachineFailure | EventType::Maintenance)
    }

    /// The completion event of a production stage
    pub fn end_of(stage: Stage) -> Self {
        match stage {
            Stage::RawMaterial => EventType::EndRawMaterial,
            Stage::Machining => EventType::EndMachining,
            Stage::Assembly => EventType::EndAssembly,
            Stage::QualityControl => EventType::EndQualityControl,
            Stage::Packaging => EventType::EndPackaging,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Arrival => "ARRIVAL",
            EventType::EndRawMaterial => "END_RAW_MATERIAL",
            EventType::EndMachining => "END_MACHINING",
            EventType::EndAssembly => "END_ASSEMBLY",
            EventType::EndQualityControl => "END_QUALITY_CONTROL",
            EventType::EndPackaging => "END_PACKAGING",
            EventType::SetupChange => "SETUP_CHANGE",
            EventType::MachineFailure => "MACHINE_FAILURE",
            EventType::Maintenance => "MAINTENANCE",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled occurrence. Events are never mutated once created; transitions
/// always construct new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub time: SimTime,
    pub event_type: EventType,
    pub product_type: Option<ProductType>,
    /// Set on the maintenance scheduled by the shift-boundary rule; only
    /// that event releases the pending-maintenance guard.
    #[serde(default)]
    pub shift_boundary: bool,
}

impl Event {
    pub fn new(time: SimTime, event_type: EventType, product_type: Option<ProductType>) -> Self {
        Self {
            time,
            event_type,
            product_type,
            shift_boundary: false,
        }
    }

    /// Create an event tied to one unit of the given product type
    pub fn for_unit(time: SimTime, event_type: EventType, product_type: ProductType) -> Self {
        Self::new(time, event_type, Some(product_type))
    }

    /// Create a machine-wide event (failure or maintenance)
    pub fn machine_wide(time: SimTime, event_type: EventType) -> Self {
        Self::new(time, event_type, None)
    }

    /// Create the maintenance triggered by reaching a shift boundary
    pub fn shift_maintenance(time: SimTime) -> Self {
        Self {
            shift_boundary: true,
            ..Self::machine_wide(time, EventType::Maintenance)
        }
    }
}
