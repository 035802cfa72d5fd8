//! Unit tests for bks-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ResidentId, StationId};

    #[test]
    fn index_roundtrip() {
        let id = StationId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(StationId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(StationId(0) < StationId(1));
        assert!(ResidentId(100) > ResidentId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(StationId::INVALID.0, u32::MAX);
        assert_eq!(ResidentId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(StationId(7).to_string(), "StationId(7)");
    }
}

#[cfg(test)]
mod config {
    use std::time::Duration;

    use crate::SimConfig;

    #[test]
    fn reference_defaults() {
        let cfg = SimConfig::reference(6, 20, 10, 60, 42);
        assert_eq!(cfg.initial_fill, 8);
        assert_eq!(cfg.truck_capacity, 4);
        assert_eq!(cfg.max_withdraw_from_depot, 2);
        assert_eq!(cfg.target_fill_level(), 8);
    }

    #[test]
    fn depot_gets_the_remainder() {
        // 6 stations × 8 initial = 48 docked, 60 total → 12 spare.
        let cfg = SimConfig::reference(6, 20, 10, 60, 42);
        assert_eq!(cfg.initial_depot_count(), 12);
    }

    #[test]
    fn depot_count_saturates_instead_of_underflowing() {
        let mut cfg = SimConfig::reference(6, 20, 10, 60, 42);
        cfg.total_fleet = 10; // less than the 48 the stations would need
        assert_eq!(cfg.initial_depot_count(), 0);
    }

    #[test]
    fn scale_maps_units_to_wall_clock() {
        let mut cfg = SimConfig::reference(1, 1, 4, 4, 0);
        cfg.time_unit = Duration::from_millis(10);
        assert_eq!(cfg.scale(3), Duration::from_millis(30));
        cfg.time_unit = Duration::ZERO;
        assert_eq!(cfg.scale(100), Duration::ZERO);
    }
}

#[cfg(test)]
mod rng {
    use crate::AgentRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, 0);
        let mut r2 = AgentRng::new(12345, 0);
        for _ in 0..100 {
            let a: u64 = r1.random();
            let b: u64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, 0);
        let mut r1 = AgentRng::new(1, 1);
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "seeds for adjacent agents should diverge");
    }

    #[test]
    fn trip_time_in_bounds() {
        let mut rng = AgentRng::new(0, 0);
        for _ in 0..1000 {
            let t = rng.trip_time(5);
            assert!((1..=5).contains(&t), "got {t}");
        }
    }

    #[test]
    fn trip_time_tolerates_zero_waiting_time() {
        let mut rng = AgentRng::new(0, 0);
        assert_eq!(rng.trip_time(0), 1);
    }
}

#[cfg(test)]
mod shutdown {
    use std::thread;
    use std::time::{Duration, Instant};

    use crate::ShutdownToken;

    #[test]
    fn sleep_completes_when_not_cancelled() {
        let token = ShutdownToken::new();
        assert!(token.sleep(Duration::from_millis(5)));
        assert!(!token.is_cancelled());
    }

    #[test]
    fn zero_sleep_reports_state() {
        let token = ShutdownToken::new();
        assert!(token.sleep(Duration::ZERO));
        token.cancel();
        assert!(!token.sleep(Duration::ZERO));
    }

    #[test]
    fn cancel_wakes_sleeper_early() {
        let token = ShutdownToken::new();
        let sleeper = token.clone();
        let start = Instant::now();
        let handle = thread::spawn(move || sleeper.sleep(Duration::from_secs(60)));
        thread::sleep(Duration::from_millis(20));
        token.cancel();
        assert!(!handle.join().unwrap(), "sleep should report cancellation");
        assert!(
            start.elapsed() < Duration::from_secs(10),
            "sleeper should wake well before the full minute"
        );
    }

    #[test]
    fn cancelled_token_never_sleeps() {
        let token = ShutdownToken::new();
        token.cancel();
        let start = Instant::now();
        assert!(!token.sleep(Duration::from_secs(60)));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
