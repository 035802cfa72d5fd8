//! `SimEvent` — one value per sink callback, for capture and replay.

use bks_core::{ResidentId, ResidentState, StationId, TruckStop};

/// A recorded notification, in the order the emitting agent committed it.
///
/// Events from different agents interleave arbitrarily; events for one
/// station arrive in that station's commit order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SimEvent {
    StationInit {
        station: StationId,
        count:   u32,
    },
    ResidentInit {
        resident: ResidentId,
        station:  StationId,
    },
    ResidentStateChanged {
        resident: ResidentId,
        state:    ResidentState,
    },
    StationCountChanged {
        station: StationId,
        count:   u32,
    },
    ResidentTrip {
        resident:  ResidentId,
        from:      StationId,
        to:        StationId,
        trip_time: u32,
    },
    DepotCountChanged {
        count: u32,
    },
    TruckInit,
    TruckCountChanged {
        count: u32,
    },
    TruckTrip {
        from:      TruckStop,
        to:        TruckStop,
        trip_time: u32,
    },
}
