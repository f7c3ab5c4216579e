// Tests for EventProcessor transitions
#[cfg(test)]
mod tests {
    use crate::core::{
        errors::SimError,
        event::{Event, EventType},
        execution::processor::EventProcessor,
        random::RandomSource,
        state::ResourceState,
        timing::{MachineCounts, StageTiming, StageTimingTable},
        types::{ProductType, Stage},
    };

    const SETUP_TIME: u64 = 5;
    const SHIFT_LENGTH: u64 = 40;
    const MAINTENANCE_DURATION: u64 = 60;

    /// Zero-spread timings so every stage sample is exactly its mean
    fn fixed_catalog() -> Vec<[StageTiming; Stage::COUNT]> {
        vec![
            [
                StageTiming::new(2.0, 0.0),
                StageTiming::new(3.0, 0.0),
                StageTiming::new(4.0, 0.0),
                StageTiming::new(1.0, 0.0),
                StageTiming::new(1.0, 0.0),
            ],
            [
                StageTiming::new(1.0, 0.0),
                StageTiming::new(2.0, 0.0),
                StageTiming::new(2.0, 0.0),
                StageTiming::new(2.0, 0.0),
                StageTiming::new(2.0, 0.0),
            ],
        ]
    }

    fn processor_with(counts: MachineCounts) -> EventProcessor {
        let timing = StageTimingTable::new(&fixed_catalog(), counts).unwrap();
        EventProcessor::new(timing, SETUP_TIME, SHIFT_LENGTH, MAINTENANCE_DURATION)
    }

    fn processor() -> EventProcessor {
        processor_with(MachineCounts::uniform(1))
    }

    fn rng() -> RandomSource {
        RandomSource::new(42, 4.5, 50.0, (30, 120)).unwrap()
    }

    fn unit(time: u64, event_type: EventType, product: usize) -> Event {
        Event::for_unit(time, event_type, ProductType(product))
    }

    fn find(scheduled: &[Event], event_type: EventType) -> Vec<Event> {
        scheduled
            .iter()
            .copied()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    #[test]
    fn test_arrival_schedules_next_arrival_and_raw_material() {
        let mut state = ResourceState::new();
        let outcome = processor()
            .process(unit(0, EventType::Arrival, 0), &mut rng(), &mut state)
            .unwrap();

        let arrivals = find(&outcome.scheduled, EventType::Arrival);
        assert_eq!(arrivals.len(), 1);
        assert_eq!(arrivals[0].product_type, Some(ProductType(0)));

        let raw = find(&outcome.scheduled, EventType::EndRawMaterial);
        assert_eq!(raw, vec![unit(2, EventType::EndRawMaterial, 0)]);
        assert_eq!(outcome.record.event_type, EventType::Arrival);
        assert_eq!(outcome.record.product_type, Some(ProductType(0)));
    }

    #[test]
    fn test_unset_setup_forces_setup_change() {
        let processor = processor();
        let mut rng = rng();
        let mut state = ResourceState::new();

        let outcome = processor
            .process(unit(2, EventType::EndRawMaterial, 0), &mut rng, &mut state)
            .unwrap();

        assert_eq!(outcome.scheduled, vec![unit(7, EventType::SetupChange, 0)]);
        assert_eq!(state.current_setup, None);
    }

    #[test]
    fn test_setup_change_commits_and_schedules_machining() {
        let processor = processor();
        let mut state = ResourceState::new();

        let outcome = processor
            .process(unit(7, EventType::SetupChange, 0), &mut rng(), &mut state)
            .unwrap();

        assert_eq!(state.current_setup, Some(ProductType(0)));
        assert_eq!(outcome.scheduled, vec![unit(10, EventType::EndMachining, 0)]);
    }

    #[test]
    fn test_matching_setup_skips_setup_change() {
        let mut state = ResourceState {
            current_setup: Some(ProductType(1)),
            maintenance_scheduled: false,
        };
        let outcome = processor()
            .process(unit(3, EventType::EndRawMaterial, 1), &mut rng(), &mut state)
            .unwrap();

        assert_eq!(outcome.scheduled, vec![unit(5, EventType::EndMachining, 1)]);
    }

    #[test]
    fn test_other_product_setup_forces_retooling() {
        let mut state = ResourceState {
            current_setup: Some(ProductType(0)),
            maintenance_scheduled: false,
        };
        let outcome = processor()
            .process(unit(3, EventType::EndRawMaterial, 1), &mut rng(), &mut state)
            .unwrap();

        assert_eq!(outcome.scheduled, vec![unit(8, EventType::SetupChange, 1)]);
        assert_eq!(state.current_setup, Some(ProductType(0)));
    }

    #[test]
    fn test_downstream_stage_chain() {
        let processor = processor();
        let mut rng = rng();
        let mut state = ResourceState::new();

        let chain = [
            (EventType::EndMachining, EventType::EndAssembly, 14),
            (EventType::EndAssembly, EventType::EndQualityControl, 11),
            (EventType::EndQualityControl, EventType::EndPackaging, 11),
        ];
        for (current, next, expected_time) in chain {
            let outcome = processor
                .process(unit(10, current, 0), &mut rng, &mut state)
                .unwrap();
            assert_eq!(outcome.scheduled, vec![unit(expected_time, next, 0)]);
        }

        let outcome = processor
            .process(unit(12, EventType::EndPackaging, 0), &mut rng, &mut state)
            .unwrap();
        assert!(outcome.scheduled.is_empty());
    }

    #[test]
    fn test_machine_counts_speed_up_stages() {
        let processor = processor_with(MachineCounts {
            assembly: 2,
            ..MachineCounts::uniform(1)
        });
        let outcome = processor
            .process(
                unit(10, EventType::EndMachining, 0),
                &mut rng(),
                &mut ResourceState::new(),
            )
            .unwrap();
        assert_eq!(outcome.scheduled, vec![unit(12, EventType::EndAssembly, 0)]);
    }

    #[test]
    fn test_machine_failure_schedules_repair_completion() {
        let mut state = ResourceState::new();
        let outcome = processor()
            .process(
                Event::machine_wide(10, EventType::MachineFailure),
                &mut rng(),
                &mut state,
            )
            .unwrap();

        assert_eq!(outcome.scheduled.len(), 1);
        let repair = outcome.scheduled[0];
        assert_eq!(repair.event_type, EventType::Maintenance);
        assert_eq!(repair.product_type, None);
        assert!((40..=130).contains(&repair.time));

        let note = outcome.record.note.unwrap();
        assert!(note.contains(&repair.time.to_string()));
    }

    #[test]
    fn test_machine_wide_event_ignores_product_type() {
        let outcome = processor()
            .process(
                Event::new(10, EventType::MachineFailure, Some(ProductType(99))),
                &mut rng(),
                &mut ResourceState::new(),
            )
            .unwrap();
        assert_eq!(outcome.record.product_type, None);
    }

    #[test]
    fn test_maintenance_before_shift_end_recurs() {
        let mut state = ResourceState::new();
        let outcome = processor()
            .process(Event::machine_wide(10, EventType::Maintenance), &mut rng(), &mut state)
            .unwrap();

        assert!(!state.maintenance_scheduled);
        assert_eq!(outcome.scheduled, vec![Event::machine_wide(70, EventType::Maintenance)]);
    }

    #[test]
    fn test_recurring_maintenance_keeps_shift_maintenance_pending() {
        let mut state = ResourceState {
            current_setup: None,
            maintenance_scheduled: true,
        };
        let outcome = processor()
            .process(Event::machine_wide(45, EventType::Maintenance), &mut rng(), &mut state)
            .unwrap();

        assert!(state.maintenance_scheduled);
        assert_eq!(outcome.scheduled, vec![Event::machine_wide(105, EventType::Maintenance)]);
        assert!(!outcome.record.shift_boundary);
    }

    #[test]
    fn test_shift_maintenance_after_shift_end_schedules_two() {
        let mut state = ResourceState {
            current_setup: None,
            maintenance_scheduled: true,
        };
        let outcome = processor()
            .process(Event::shift_maintenance(45), &mut rng(), &mut state)
            .unwrap();

        // Recurring cycle plus the next shift maintenance
        assert!(state.maintenance_scheduled);
        assert!(outcome.record.shift_boundary);
        assert_eq!(
            outcome.scheduled,
            vec![
                Event::machine_wide(105, EventType::Maintenance),
                Event::shift_maintenance(85),
            ]
        );
    }

    #[test]
    fn test_repair_completion_does_not_release_shift_guard() {
        let processor = processor();
        let mut rng = rng();
        let mut state = ResourceState {
            current_setup: None,
            maintenance_scheduled: true,
        };
        let failure = processor
            .process(Event::machine_wide(50, EventType::MachineFailure), &mut rng, &mut state)
            .unwrap();
        let repaired = processor.process(failure.scheduled[0], &mut rng, &mut state).unwrap();

        assert!(state.maintenance_scheduled);
        assert_eq!(repaired.scheduled.len(), 1);
        assert!(!repaired.scheduled[0].shift_boundary);
    }

    #[test]
    fn test_shift_maintenance_fires_once_until_cleared() {
        let processor = processor();
        let mut rng = rng();
        let mut state = ResourceState::new();

        let first = processor
            .process(unit(40, EventType::EndPackaging, 0), &mut rng, &mut state)
            .unwrap();
        assert_eq!(first.scheduled, vec![Event::shift_maintenance(80)]);
        assert!(state.maintenance_scheduled);

        let second = processor
            .process(unit(41, EventType::EndPackaging, 1), &mut rng, &mut state)
            .unwrap();
        assert!(second.scheduled.is_empty());
        assert!(state.maintenance_scheduled);
    }

    #[test]
    fn test_no_shift_maintenance_before_shift_end() {
        let mut state = ResourceState::new();
        let outcome = processor()
            .process(unit(39, EventType::EndPackaging, 0), &mut rng(), &mut state)
            .unwrap();
        assert!(outcome.scheduled.is_empty());
        assert!(!state.maintenance_scheduled);
    }

    #[test]
    fn test_missing_product_type_fails_fast() {
        let result = processor().process(
            Event::machine_wide(3, EventType::Arrival),
            &mut rng(),
            &mut ResourceState::new(),
        );
        assert_eq!(
            result,
            Err(SimError::InvalidProductType {
                event_type: EventType::Arrival,
                product_type: None,
            })
        );
    }

    #[test]
    fn test_out_of_range_product_type_fails_fast() {
        let mut state = ResourceState::new();
        let result = processor().process(unit(3, EventType::SetupChange, 2), &mut rng(), &mut state);
        assert!(matches!(result, Err(SimError::InvalidProductType { .. })));
        assert_eq!(state.current_setup, None);
    }
}
