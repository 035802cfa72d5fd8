//! The resident rider: an unending borrow → ride → return cycle.

use std::sync::Arc;

use bks_core::{
    AgentRng, EventSink, ResidentId, ResidentState, ShutdownToken, SimConfig, StationId,
};
use bks_inventory::StationRegistry;

/// What ended a ride.
pub(crate) enum Ride {
    /// The bike is docked at the destination.
    Parked,
    /// Shutdown arrived while the bike was still in hand.
    Cancelled,
}

/// One simulated resident.
///
/// Holds shared handles to the station registry and the event sink; owns its
/// RNG outright so its sequence of destinations and trip times depends only
/// on the master seed, never on thread interleaving.
pub struct Resident {
    id:       ResidentId,
    station:  StationId,
    rng:      AgentRng,
    stations: Arc<StationRegistry>,
    sink:     Arc<dyn EventSink>,
    shutdown: ShutdownToken,
    config:   SimConfig,
}

impl Resident {
    pub fn new(
        id:       ResidentId,
        station:  StationId,
        rng:      AgentRng,
        stations: Arc<StationRegistry>,
        sink:     Arc<dyn EventSink>,
        shutdown: ShutdownToken,
        config:   SimConfig,
    ) -> Self {
        Self {
            id,
            station,
            rng,
            stations,
            sink,
            shutdown,
            config,
        }
    }

    /// The station the resident is currently parked at.
    pub fn station(&self) -> StationId {
        self.station
    }

    /// The resident's full life: repeat the trip cycle until cancelled or
    /// the configured trip budget runs out.
    ///
    /// Returns the number of bikes still in hand at exit — 1 when shutdown
    /// interrupted a ride, 0 otherwise.
    pub fn run(mut self) -> u32 {
        let mut trips: u64 = 0;
        loop {
            if self.shutdown.is_cancelled() {
                return 0;
            }
            if self.config.trips_per_resident.is_some_and(|max| trips >= max) {
                return 0;
            }
            if !self.withdraw_one() {
                return 0;
            }
            match self.ride_and_deposit() {
                Ride::Parked => trips += 1,
                Ride::Cancelled => return 1,
            }
        }
    }

    /// Take one bike from the current station, waiting out empty racks.
    ///
    /// Returns `false` if shutdown arrived while waiting.  The adjustment
    /// can only fail with a capacity violation (the station id comes from
    /// the configured range), which here means "no bike to take".
    pub(crate) fn withdraw_one(&mut self) -> bool {
        loop {
            if self.stations.adjust(self.station, -1).is_ok() {
                return true;
            }
            let backoff = self.rng.trip_time(self.config.waiting_time);
            if !self.shutdown.sleep(self.config.scale(backoff)) {
                return false;
            }
        }
    }

    /// Ride to a random station and dock the borrowed bike.
    ///
    /// A full destination is handled by waiting a beat and rerolling a fresh
    /// destination (an extra leg, with its own trip event) rather than
    /// queueing indefinitely at one rack.
    pub(crate) fn ride_and_deposit(&mut self) -> Ride {
        let mut to = self.random_station();
        let trip = self.rng.trip_time(self.config.waiting_time);
        self.sink
            .on_resident_state_changed(self.id, ResidentState::Riding);
        self.sink.on_resident_trip(self.id, self.station, to, trip);
        if !self.shutdown.sleep(self.config.scale(trip)) {
            return Ride::Cancelled;
        }

        loop {
            match self.stations.adjust(to, 1) {
                Ok(_) => {
                    self.station = to;
                    self.sink
                        .on_resident_state_changed(self.id, ResidentState::AtStation);
                    return Ride::Parked;
                }
                Err(_) => {
                    // Destination full: pause, then try somewhere else.
                    let backoff = self.rng.trip_time(self.config.waiting_time);
                    if !self.shutdown.sleep(self.config.scale(backoff)) {
                        return Ride::Cancelled;
                    }
                    let from = to;
                    to = self.random_station();
                    let trip = self.rng.trip_time(self.config.waiting_time);
                    self.sink.on_resident_trip(self.id, from, to, trip);
                    if !self.shutdown.sleep(self.config.scale(trip)) {
                        return Ride::Cancelled;
                    }
                }
            }
        }
    }

    /// Uniform draw over all stations; riding back to the current station is
    /// allowed.
    fn random_station(&mut self) -> StationId {
        StationId(self.rng.gen_range(0..self.config.station_count))
    }
}
