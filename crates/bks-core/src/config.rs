//! Simulation configuration.
//!
//! # Design
//!
//! All parameters are fixed for the lifetime of a run.  Trip and break
//! durations are expressed in abstract *time units* drawn from
//! `1..=waiting_time`; [`SimConfig::time_unit`] maps one unit to wall-clock
//! time.  Setting it to `Duration::ZERO` turns every simulated delay into a
//! no-op, which is how the deterministic tests drive agent loops inline.

use std::time::Duration;

/// Top-level simulation configuration.
///
/// Typically built via [`SimConfig::reference`] and adjusted field by field;
/// validated by the orchestrator before any agent thread is spawned.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of docking stations.
    pub station_count: u32,

    /// Number of resident riders.
    pub resident_count: u32,

    /// Docks per station — the hard upper bound on a station's bike count.
    pub docks_per_station: u32,

    /// Total bikes in the system: docked + in the depot + in transit.
    pub total_fleet: u32,

    /// Bikes docked at each station at startup.  The reference behavior fills
    /// every station to the target level (`docks_per_station - 2`).
    pub initial_fill: u32,

    /// Maximum bikes the maintenance truck can carry.  Default: 4.
    pub truck_capacity: u32,

    /// Maximum bikes the truck withdraws from the depot per circuit.
    /// Default: 2.
    pub max_withdraw_from_depot: u32,

    /// Upper bound of the trip-time distribution: every simulated ride and
    /// backoff lasts `1..=waiting_time` time units.
    pub waiting_time: u32,

    /// Pause (in time units) the truck takes after each full circuit.
    pub break_time: u32,

    /// Trips each resident makes before retiring.  `None` = ride until the
    /// simulation is shut down.
    pub trips_per_resident: Option<u64>,

    /// Wall-clock length of one time unit.  `Duration::ZERO` makes all
    /// simulated delays instantaneous.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub time_unit: Duration,

    /// Master RNG seed.  The same seed always produces identical per-agent
    /// random sequences.
    pub seed: u64,
}

impl SimConfig {
    /// A configuration matching the reference behavior: stations filled to
    /// the target level, truck capacity 4, depot withdrawal cap 2.
    pub fn reference(
        station_count:     u32,
        resident_count:    u32,
        docks_per_station: u32,
        total_fleet:       u32,
        seed:              u64,
    ) -> Self {
        Self {
            station_count,
            resident_count,
            docks_per_station,
            total_fleet,
            initial_fill: docks_per_station.saturating_sub(2),
            truck_capacity: 4,
            max_withdraw_from_depot: 2,
            waiting_time: 5,
            break_time: 10,
            trips_per_resident: None,
            time_unit: Duration::from_millis(100),
            seed,
        }
    }

    /// The per-station bike count the rebalancing truck steers toward.
    #[inline]
    pub fn target_fill_level(&self) -> u32 {
        self.docks_per_station.saturating_sub(2)
    }

    /// Bikes placed in the depot at startup: whatever the initial station
    /// fill leaves over from the total fleet.
    #[inline]
    pub fn initial_depot_count(&self) -> u32 {
        self.total_fleet
            .saturating_sub(self.station_count * self.initial_fill)
    }

    /// Wall-clock duration of `units` simulated time units.
    #[inline]
    pub fn scale(&self, units: u32) -> Duration {
        self.time_unit * units
    }
}
