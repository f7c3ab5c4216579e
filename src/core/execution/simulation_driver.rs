use crate::core::errors::SimError;
use crate::core::event::{Event, EventType};
use crate::core::event_scheduler::EventQueue;
use crate::core::execution::config::SimulationConfig;
use crate::core::execution::processor::{EventProcessor, EventRecord, ProcessOutcome};
use crate::core::random::RandomSource;
use crate::core::state::ResourceState;
use crate::core::timing::StageTimingTable;
use crate::core::types::SimTime;
use log::{debug, info, warn};
use serde::Serialize;
use std::io::Write;
use uuid::Uuid;

/// Observer trait for simulation events
pub trait SimulationObserver {
    /// Called after each event has been processed
    fn on_event(&mut self, record: &EventRecord);

    /// Called once when the run reaches its horizon or runs out of events
    fn on_complete(&mut self, report: &RunReport);
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    /// Master seed, replayable through `SimulationConfig::with_seed`
    pub seed: u64,
    pub events_processed: u64,
    /// Time of the last processed event
    pub final_time: Option<SimTime>,
    /// Finished units (`END_PACKAGING`) per product type
    pub completed_units: Vec<u64>,
    /// Events left in the queue beyond the horizon
    pub pending_events: usize,
}

/// Prints every processed event as a bordered block.
pub struct ConsoleObserver<W: Write> {
    out: W,
}

impl ConsoleObserver<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn block(&mut self, message: &str) {
        const BORDER: &str = "----------------------------------------";
        if let Err(e) = writeln!(self.out, "{}\n{}\n{}", BORDER, message, BORDER) {
            warn!("Failed to write event log: {}", e);
        }
    }
}

impl<W: Write> SimulationObserver for ConsoleObserver<W> {
    fn on_event(&mut self, record: &EventRecord) {
        let mut message = format!("Event: {}\nTime: {}", record.event_type, record.time);
        if let Some(product) = record.product_type {
            message.push_str(&format!("\nProduct Type: {}", product));
        }
        self.block(&message);
        if let Some(note) = &record.note {
            self.block(note);
        }
    }

    fn on_complete(&mut self, _report: &RunReport) {
        if let Err(e) = writeln!(self.out, "Simulation completed.") {
            warn!("Failed to write completion message: {}", e);
        }
    }
}

/// Owns the queue, the random source and the line state for one run, and
/// drives the extract-process-reinsert loop up to the horizon.
pub struct SimulationDriver {
    queue: EventQueue,
    processor: EventProcessor,
    rng: RandomSource,
    state: ResourceState,
    horizon: SimTime,
    maintenance_interval: SimTime,
    run_id: Uuid,
    observers: Vec<Box<dyn SimulationObserver>>,
    seeded: bool,
    events_processed: u64,
    last_time: Option<SimTime>,
    completed_units: Vec<u64>,
}

impl SimulationDriver {
    /// Create a driver over the default product catalog
    pub fn new(config: SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;
        let timing = StageTimingTable::with_default_catalog(config.machine_counts)?;
        Self::with_timing(config, timing)
    }

    /// Create a driver with a custom stage timing table.
    ///
    /// The table must have been built with the configured machine counts.
    pub fn with_timing(config: SimulationConfig, timing: StageTimingTable) -> Result<Self, SimError> {
        config.validate()?;
        if timing.machine_counts() != &config.machine_counts {
            return Err(SimError::InvalidConfiguration(format!(
                "timing table machine counts {:?} differ from configured {:?}",
                timing.machine_counts(),
                config.machine_counts
            )));
        }
        let seed = config.seed.unwrap_or_else(RandomSource::entropy_seed);
        let rng = RandomSource::new(
            seed,
            config.mean_arrival_gap,
            config.mean_time_between_failures,
            (config.repair_min, config.repair_max),
        )?;
        let completed_units = vec![0; timing.product_count()];
        let processor = EventProcessor::new(
            timing,
            config.setup_time,
            config.shift_length,
            config.maintenance_duration,
        );

        Ok(Self {
            queue: EventQueue::new(),
            processor,
            rng,
            state: ResourceState::new(),
            horizon: config.horizon,
            maintenance_interval: config.maintenance_interval,
            run_id: Uuid::new_v4(),
            observers: Vec::new(),
            seeded: false,
            events_processed: 0,
            last_time: None,
            completed_units,
        })
    }

    /// Add an observer to the simulation
    pub fn add_observer(&mut self, observer: Box<dyn SimulationObserver>) {
        self.observers.push(observer);
    }

    /// Schedule the first arrival of every product type, one machine failure
    /// and the first maintenance at the configured interval.
    ///
    /// Called by [`run`](Self::run) and [`step`](Self::step) if not done yet.
    pub fn seed_initial_events(&mut self) -> Result<(), SimError> {
        if self.seeded {
            return Ok(());
        }
        self.seeded = true;

        let products: Vec<_> = self.processor.timing().product_types().collect();
        for product in products {
            let time = self.rng.arrival_gap()?;
            self.queue.insert(Event::for_unit(time, EventType::Arrival, product));
        }
        let failure_time = self.rng.failure_gap()?;
        self.queue
            .insert(Event::machine_wide(failure_time, EventType::MachineFailure));
        self.queue.insert(Event::machine_wide(
            self.maintenance_interval,
            EventType::Maintenance,
        ));

        debug!("Seeded {} initial events", self.queue.len());
        Ok(())
    }

    /// Add an event directly to the queue
    pub fn schedule_event(&mut self, event: Event) {
        self.queue.insert(event);
    }

    /// Process the next event if it falls within the horizon.
    ///
    /// Returns `None` once the queue is exhausted or the next event lies past
    /// the horizon.
    pub fn step(&mut self) -> Result<Option<ProcessOutcome>, SimError> {
        self.seed_initial_events()?;

        match self.queue.peek_time() {
            Some(time) if time <= self.horizon => {}
            _ => return Ok(None),
        }

        let event = self.queue.extract_min()?;
        debug_assert!(self.last_time.map_or(true, |last| last <= event.time));
        debug!("=== {} at {} ===", event.event_type, event.time);

        let outcome = self.processor.process(event, &mut self.rng, &mut self.state)?;
        self.queue.extend(outcome.scheduled.iter().copied());

        self.events_processed += 1;
        self.last_time = Some(event.time);
        if event.event_type == EventType::EndPackaging {
            if let Some(count) = event
                .product_type
                .and_then(|product| self.completed_units.get_mut(product.index()))
            {
                *count += 1;
            }
        }

        for observer in &mut self.observers {
            observer.on_event(&outcome.record);
        }

        Ok(Some(outcome))
    }

    /// Run the complete simulation up to the horizon
    pub fn run(&mut self) -> Result<RunReport, SimError> {
        info!(
            "Starting run {} (seed {}, horizon {})",
            self.run_id,
            self.rng.seed(),
            self.horizon
        );

        while self.step()?.is_some() {}

        let report = self.report();
        for observer in &mut self.observers {
            observer.on_complete(&report);
        }
        info!(
            "Run {} completed: {} events processed, {} pending",
            self.run_id, report.events_processed, report.pending_events
        );
        Ok(report)
    }

    /// Snapshot of the run so far
    pub fn report(&self) -> RunReport {
        RunReport {
            run_id: self.run_id,
            seed: self.rng.seed(),
            events_processed: self.events_processed,
            final_time: self.last_time,
            completed_units: self.completed_units.clone(),
            pending_events: self.queue.len(),
        }
    }

    pub fn state(&self) -> &ResourceState {
        &self.state
    }

    pub fn horizon(&self) -> SimTime {
        self.horizon
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Time of the next event in the queue
    pub fn next_event_time(&self) -> Option<SimTime> {
        self.queue.peek_time()
    }
}
