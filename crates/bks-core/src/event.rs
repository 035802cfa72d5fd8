//! Event sink — the one-way notification boundary toward presentation code.
//!
//! The core emits an event after every committed state change (station,
//! depot, truck) and at the key points of each agent's life cycle.  Sinks are
//! fire-and-forget: they must return quickly (buffer, don't block) and can
//! never feed information back into the simulation.
//!
//! All methods have default no-op implementations so implementors only need
//! to override what they care about.
//!
//! # Example — trip printer
//!
//! ```rust,ignore
//! struct TripPrinter;
//!
//! impl EventSink for TripPrinter {
//!     fn on_resident_trip(&self, r: ResidentId, from: StationId, to: StationId, t: u32) {
//!         println!("{r}: {from} -> {to} ({t}u)");
//!     }
//! }
//! ```

use crate::{ResidentId, StationId};

// ── Event vocabulary ──────────────────────────────────────────────────────────

/// What a resident is currently doing.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResidentState {
    /// Parked at `current_station`, between trips.
    AtStation,
    /// Riding a borrowed bike toward a destination.
    Riding,
}

/// A stop on the maintenance truck's route: the depot or a station.
///
/// Flat encodings (CSV, wire) map `Depot` to the reserved sentinel `-1`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TruckStop {
    Depot,
    Station(StationId),
}

// ── EventSink ─────────────────────────────────────────────────────────────────

/// Callbacks emitted by the simulation core.
///
/// Implementations must be `Send + Sync`: every agent thread holds the same
/// `Arc<dyn EventSink>` and emits concurrently.  Events for a single station
/// arrive in commit order per adjustment, but no ordering is guaranteed
/// across stations or across agents.
pub trait EventSink: Send + Sync {
    /// A station was created with `count` docked bikes.
    fn on_station_init(&self, _station: StationId, _count: u32) {}

    /// A resident was created at `station`.
    fn on_resident_init(&self, _resident: ResidentId, _station: StationId) {}

    /// A resident transitioned between parked and riding.
    fn on_resident_state_changed(&self, _resident: ResidentId, _state: ResidentState) {}

    /// A station's bike count changed; `count` is the post-adjustment value.
    fn on_station_count_changed(&self, _station: StationId, _count: u32) {}

    /// A resident set off from `from` toward `to`, riding for `trip_time`
    /// time units.
    fn on_resident_trip(
        &self,
        _resident:  ResidentId,
        _from:      StationId,
        _to:        StationId,
        _trip_time: u32,
    ) {
    }

    /// The depot's bike count changed; `count` is the new value.
    fn on_depot_count_changed(&self, _count: u32) {}

    /// The maintenance truck was created.
    fn on_truck_init(&self) {}

    /// The truck's carried-bike count changed; `count` is the new value.
    fn on_truck_count_changed(&self, _count: u32) {}

    /// The truck set off from `from` toward `to`, travelling for `trip_time`
    /// time units.
    fn on_truck_trip(&self, _from: TruckStop, _to: TruckStop, _trip_time: u32) {}
}

/// An [`EventSink`] that discards everything.  Use when running headless.
pub struct NoopSink;

impl EventSink for NoopSink {}
