//! The maintenance truck: a greedy rebalancing circuit over all stations.
//!
//! # The greedy single-pass rule
//!
//! Per circuit the truck withdraws up to `max_withdraw_from_depot` bikes
//! from the depot, visits stations `0..station_count` in order — skimming
//! surplus above the target fill level into its free space, topping up
//! deficits from its load — then returns to the depot, empties out, and
//! takes a break.  Each station ends the circuit at or closer to the target
//! using only local information (current count, remaining truck space) and
//! O(station_count) work; the rule does not look ahead to stations later in
//! the route.

use std::sync::Arc;

use bks_core::{AgentRng, EventSink, ShutdownToken, SimConfig, StationId, TruckStop};
use bks_inventory::{Depot, StationRegistry};

/// The single rebalancing vehicle.
///
/// Sole writer of the [`Depot`] — see the single-writer contract there.
pub struct MaintenanceTruck {
    position: TruckStop,
    carried:  u32,
    rng:      AgentRng,
    stations: Arc<StationRegistry>,
    depot:    Arc<Depot>,
    sink:     Arc<dyn EventSink>,
    shutdown: ShutdownToken,
    config:   SimConfig,
}

impl MaintenanceTruck {
    pub fn new(
        rng:      AgentRng,
        stations: Arc<StationRegistry>,
        depot:    Arc<Depot>,
        sink:     Arc<dyn EventSink>,
        shutdown: ShutdownToken,
        config:   SimConfig,
    ) -> Self {
        Self {
            position: TruckStop::Depot,
            carried: 0,
            rng,
            stations,
            depot,
            sink,
            shutdown,
            config,
        }
    }

    /// Bikes currently in the truck bed.
    pub fn carried(&self) -> u32 {
        self.carried
    }

    /// Where the truck currently is (or is heading).
    pub fn position(&self) -> TruckStop {
        self.position
    }

    /// Circuits forever, pausing `break_time` units between rounds, until
    /// cancelled.  Returns the bikes still aboard at exit (zero unless
    /// shutdown hit mid-circuit) for the conservation audit.
    pub fn run(mut self) -> u32 {
        while !self.shutdown.is_cancelled() {
            if !self.run_circuit() {
                break;
            }
            if !self.shutdown.sleep(self.config.scale(self.config.break_time)) {
                break;
            }
        }
        self.carried
    }

    /// One full circuit: depot withdrawal, ordered station pass, return,
    /// unload.  Returns `false` if shutdown interrupted a leg.
    pub fn run_circuit(&mut self) -> bool {
        self.load_from_depot();
        for i in 0..self.config.station_count {
            if !self.travel_to(TruckStop::Station(StationId(i))) {
                return false;
            }
            self.service_station(StationId(i));
        }
        if !self.travel_to(TruckStop::Depot) {
            return false;
        }
        self.unload_at_depot();
        true
    }

    /// Take `min(max_withdraw_from_depot, depot)` bikes aboard.
    fn load_from_depot(&mut self) {
        let available = self.depot.get();
        let take = self.config.max_withdraw_from_depot.min(available);
        self.depot.set(available - take);
        self.carried += take;
        self.sink.on_truck_count_changed(self.carried);
    }

    /// Drive to `to` over a random trip time; cancellable.
    fn travel_to(&mut self, to: TruckStop) -> bool {
        let trip = self.rng.trip_time(self.config.waiting_time);
        self.sink.on_truck_trip(self.position, to, trip);
        self.position = to;
        self.shutdown.sleep(self.config.scale(trip))
    }

    /// Apply the greedy rule at one station.
    ///
    /// A station is in surplus or in deficit, never both.  Residents may
    /// move the count between the read and the adjustment; on a capacity
    /// violation the transfer is recomputed from a fresh read, stopping once
    /// it reaches zero.
    fn service_station(&mut self, station: StationId) {
        let target = self.config.target_fill_level();
        loop {
            let Ok(count) = self.stations.get(station) else {
                return;
            };
            let (delta, moved) = if count > target {
                let room = self.config.truck_capacity - self.carried;
                let take = (count - target).min(room);
                (-(take as i64), take)
            } else {
                let give = (target - count).min(self.carried);
                (give as i64, give)
            };
            if moved == 0 {
                return;
            }
            match self.stations.adjust(station, delta as i32) {
                Ok(_) => {
                    if delta > 0 {
                        self.carried -= moved;
                    } else {
                        self.carried += moved;
                    }
                    self.sink.on_truck_count_changed(self.carried);
                    return;
                }
                // A resident beat us to the rack; recompute.
                Err(_) => continue,
            }
        }
    }

    /// Empty the truck bed into the depot.
    fn unload_at_depot(&mut self) {
        self.depot.set(self.depot.get() + self.carried);
        self.carried = 0;
        self.sink.on_truck_count_changed(self.carried);
    }
}
