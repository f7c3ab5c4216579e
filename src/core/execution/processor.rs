use crate::core::errors::SimError;
use crate::core::event::{Event, EventType};
use crate::core::random::RandomSource;
use crate::core::state::ResourceState;
use crate::core::timing::StageTimingTable;
use crate::core::types::{ProductType, SimTime, Stage};
use log::{debug, trace};
use serde::Serialize;

/// What happened during one processing step, for observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub time: SimTime,
    pub event_type: EventType,
    pub product_type: Option<ProductType>,
    /// True for the maintenance scheduled by the shift-boundary rule
    pub shift_boundary: bool,
    pub note: Option<String>,
}

impl EventRecord {
    fn of(event: &Event) -> Self {
        Self {
            time: event.time,
            event_type: event.event_type,
            product_type: if event.event_type.is_machine_wide() {
                None
            } else {
                event.product_type
            },
            shift_boundary: event.shift_boundary,
            note: None,
        }
    }
}

/// Events produced by one processing step plus its log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub scheduled: Vec<Event>,
    pub record: EventRecord,
}

/// Transition logic of the production line: turns one dequeued event into
/// its follow-on events.
#[derive(Debug, Clone)]
pub struct EventProcessor {
    timing: StageTimingTable,
    setup_time: SimTime,
    shift_length: SimTime,
    maintenance_duration: SimTime,
}

impl EventProcessor {
    pub fn new(
        timing: StageTimingTable,
        setup_time: SimTime,
        shift_length: SimTime,
        maintenance_duration: SimTime,
    ) -> Self {
        Self {
            timing,
            setup_time,
            shift_length,
            maintenance_duration,
        }
    }

    pub fn timing(&self) -> &StageTimingTable {
        &self.timing
    }

    /// Handle one event, mutating `state` and returning what to schedule next
    pub fn process(
        &self,
        event: Event,
        rng: &mut RandomSource,
        state: &mut ResourceState,
    ) -> Result<ProcessOutcome, SimError> {
        let mut record = EventRecord::of(&event);
        let mut scheduled = Vec::new();
        let now = event.time;

        match event.event_type {
            EventType::Arrival => {
                let product = self.unit_product(&event)?;
                let gap = rng.arrival_gap()?;
                scheduled.push(Event::for_unit(
                    now.saturating_add(gap),
                    EventType::Arrival,
                    product,
                ));
                scheduled.push(self.stage_end(now, Stage::RawMaterial, product, &event, rng)?);
            }
            EventType::EndRawMaterial => {
                let product = self.unit_product(&event)?;
                if state.is_tooled_for(product) {
                    scheduled.push(self.machining_end(now, product, &event, rng, state)?);
                } else {
                    scheduled.push(Event::for_unit(
                        now.saturating_add(self.setup_time),
                        EventType::SetupChange,
                        product,
                    ));
                }
            }
            EventType::SetupChange => {
                let product = self.unit_product(&event)?;
                state.current_setup = Some(product);
                scheduled.push(self.machining_end(now, product, &event, rng, state)?);
            }
            EventType::EndMachining => {
                let product = self.unit_product(&event)?;
                scheduled.push(self.stage_end(now, Stage::Assembly, product, &event, rng)?);
            }
            EventType::EndAssembly => {
                let product = self.unit_product(&event)?;
                scheduled.push(self.stage_end(now, Stage::QualityControl, product, &event, rng)?);
            }
            EventType::EndQualityControl => {
                let product = self.unit_product(&event)?;
                scheduled.push(self.stage_end(now, Stage::Packaging, product, &event, rng)?);
            }
            EventType::EndPackaging => {
                self.unit_product(&event)?;
            }
            EventType::MachineFailure => {
                let back_online = now.saturating_add(rng.sample_uniform_int());
                record.note = Some(format!(
                    "Machine failure occurred. Machine will be repaired and back online at time: {}",
                    back_online
                ));
                scheduled.push(Event::machine_wide(back_online, EventType::Maintenance));
            }
            EventType::Maintenance => {
                if event.shift_boundary {
                    state.maintenance_scheduled = false;
                }
                let completion = now.saturating_add(self.maintenance_duration);
                record.note = Some(format!(
                    "Maintenance scheduled. Maintenance will be completed at time: {}",
                    completion
                ));
                scheduled.push(Event::machine_wide(completion, EventType::Maintenance));
            }
        }

        if !state.maintenance_scheduled && now >= self.shift_length {
            scheduled.push(Event::shift_maintenance(now.saturating_add(self.shift_length)));
            state.maintenance_scheduled = true;
            debug!("Shift boundary reached at {}, maintenance pending", now);
        }

        for next in &scheduled {
            trace!(
                "{} at {} schedules {} at {}",
                event.event_type,
                now,
                next.event_type,
                next.time
            );
        }

        Ok(ProcessOutcome { scheduled, record })
    }

    fn unit_product(&self, event: &Event) -> Result<ProductType, SimError> {
        match event.product_type {
            Some(product) if self.timing.contains(product) => Ok(product),
            product_type => Err(SimError::InvalidProductType {
                event_type: event.event_type,
                product_type,
            }),
        }
    }

    fn stage_end(
        &self,
        now: SimTime,
        stage: Stage,
        product: ProductType,
        cause: &Event,
        rng: &mut RandomSource,
    ) -> Result<Event, SimError> {
        let duration = self
            .timing
            .stage_duration(stage, product, rng)
            .ok_or(SimError::InvalidProductType {
                event_type: cause.event_type,
                product_type: Some(product),
            })?;
        Ok(Event::for_unit(
            now.saturating_add(duration),
            EventType::end_of(stage),
            product,
        ))
    }

    fn machining_end(
        &self,
        now: SimTime,
        product: ProductType,
        cause: &Event,
        rng: &mut RandomSource,
        state: &ResourceState,
    ) -> Result<Event, SimError> {
        debug_assert!(state.is_tooled_for(product));
        self.stage_end(now, Stage::Machining, product, cause, rng)
    }
}
