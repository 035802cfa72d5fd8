//! Integration tests for the orchestrator.
//!
//! Concurrency tests run the real thread-per-agent simulation with
//! millisecond time units and rely only on properties that hold for every
//! interleaving (bounds, conservation, per-agent determinism).

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use bks_core::{EventSink, ResidentId, SimConfig, StationId};
use bks_output::{MemorySink, SimEvent};

use crate::{SimBuilder, SimError};

fn fast_config(seed: u64) -> SimConfig {
    let mut cfg = SimConfig::reference(4, 12, 10, 44, seed);
    cfg.time_unit = Duration::from_millis(1);
    cfg.waiting_time = 3;
    cfg.break_time = 2;
    cfg
}

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn valid_config_builds() {
        let sim = SimBuilder::new(fast_config(1)).build().unwrap();
        assert_eq!(sim.stations().len(), 4);
        assert_eq!(sim.depot().get(), 12);
    }

    #[test]
    fn zero_stations_rejected() {
        let mut cfg = fast_config(1);
        cfg.station_count = 0;
        assert!(matches!(
            SimBuilder::new(cfg).build(),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn undersized_docks_rejected() {
        let mut cfg = fast_config(1);
        cfg.docks_per_station = 1;
        assert!(matches!(
            SimBuilder::new(cfg).build(),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn overfull_initial_fill_rejected() {
        let mut cfg = fast_config(1);
        cfg.initial_fill = cfg.docks_per_station + 1;
        assert!(matches!(
            SimBuilder::new(cfg).build(),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn insufficient_fleet_rejected() {
        let mut cfg = fast_config(1);
        cfg.total_fleet = 31; // 4 stations × 8 initial = 32 needed
        let err = SimBuilder::new(cfg).build().unwrap_err();
        assert!(matches!(
            err,
            SimError::FleetTooSmall { configured: 31, station_count: 4, initial_fill: 8 }
        ));
    }

    #[test]
    fn zero_waiting_time_rejected() {
        let mut cfg = fast_config(1);
        cfg.waiting_time = 0;
        assert!(matches!(
            SimBuilder::new(cfg).build(),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn build_announces_initial_inventory() {
        let sink = Arc::new(MemorySink::new());
        SimBuilder::new(fast_config(1))
            .sink(Arc::clone(&sink) as Arc<dyn EventSink>)
            .build()
            .unwrap();

        let events = sink.events();
        let inits: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, SimEvent::StationInit { count: 8, .. }))
            .collect();
        assert_eq!(inits.len(), 4);
        assert!(events.contains(&SimEvent::DepotCountChanged { count: 12 }));
    }
}

#[cfg(test)]
mod run {
    use super::*;

    #[test]
    fn start_announces_agents() {
        let sink = Arc::new(MemorySink::new());
        let sim = SimBuilder::new(fast_config(2))
            .sink(Arc::clone(&sink) as Arc<dyn EventSink>)
            .build()
            .unwrap();
        let handle = sim.start().unwrap();
        handle.shutdown();
        handle.join().unwrap();

        let events = sink.events();
        assert!(events.contains(&SimEvent::TruckInit));
        let resident_inits = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    SimEvent::ResidentInit { station: StationId(s), .. } if *s < 4
                )
            })
            .count();
        assert_eq!(resident_inits, 12);
    }

    #[test]
    fn shutdown_terminates_an_unbounded_run() {
        let sim = SimBuilder::new(fast_config(3)).build().unwrap();
        let handle = sim.start().unwrap();
        handle.shutdown();
        // Would block forever without the cancellation token.
        handle.join().unwrap();
    }

    #[test]
    fn conservation_holds_after_a_concurrent_run() {
        let sim = SimBuilder::new(fast_config(4)).build().unwrap();
        let report = sim.run_for(Duration::from_millis(150)).unwrap();

        assert_eq!(report.total(), 44, "the audit and the report must agree");
        assert_eq!(report.station_counts.len(), 4);
        assert!(report.station_counts.iter().all(|&c| c <= 10));
        // At most one bike per resident plus a truck load can be in hands.
        assert!(report.bikes_in_transit <= 12 + 4);
    }

    #[test]
    fn trip_budget_lets_residents_retire() {
        let mut cfg = fast_config(5);
        cfg.trips_per_resident = Some(2);
        let sink = Arc::new(MemorySink::new());
        let sim = SimBuilder::new(cfg)
            .sink(Arc::clone(&sink) as Arc<dyn EventSink>)
            .build()
            .unwrap();
        let report = sim.run_for(Duration::from_millis(300)).unwrap();

        assert_eq!(report.total(), 44);
        for i in 0..12 {
            // Reroute legs can add trips, but the budget bounds the cycles.
            let trips = sink.trips_for(ResidentId(i));
            assert!(!trips.is_empty(), "resident {i} never rode");
        }
    }
}

#[cfg(test)]
mod determinism {
    use super::*;

    /// Stations so large they can neither fill up nor drain during the run,
    /// and an exactly-covered fleet so the truck finds nothing to move:
    /// no agent ever retries, so every random draw is consumed on schedule
    /// and per-resident sequences depend only on the seed.
    fn roomy_config(seed: u64) -> SimConfig {
        let mut cfg = SimConfig::reference(4, 12, 100, 200, seed);
        cfg.initial_fill = 50;
        cfg.trips_per_resident = Some(5);
        cfg.time_unit = Duration::from_millis(1);
        cfg
    }

    fn run_once(seed: u64) -> Vec<Vec<(StationId, StationId, u32)>> {
        let sink = Arc::new(MemorySink::new());
        let sim = SimBuilder::new(roomy_config(seed))
            .sink(Arc::clone(&sink) as Arc<dyn EventSink>)
            .build()
            .unwrap();
        let handle = sim.start().unwrap();

        let deadline = Instant::now() + Duration::from_secs(10);
        while !(0..12).all(|i| sink.trips_for(ResidentId(i)).len() >= 5) {
            assert!(
                Instant::now() < deadline,
                "residents did not finish their trip budgets in time"
            );
            thread::sleep(Duration::from_millis(5));
        }
        handle.shutdown();
        handle.join().unwrap();

        (0..12).map(|i| sink.trips_for(ResidentId(i))).collect()
    }

    #[test]
    fn same_seed_same_trip_sequences() {
        assert_eq!(run_once(42), run_once(42));
    }

    #[test]
    fn different_seeds_diverge() {
        assert_ne!(run_once(1), run_once(2));
    }
}
