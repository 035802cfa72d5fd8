//! In-memory event capture.

use std::sync::Mutex;

use bks_core::{EventSink, ResidentId, ResidentState, StationId, TruckStop};

use crate::SimEvent;

/// An [`EventSink`] that appends every event to an in-memory log.
///
/// The push is a short critical section around a `Vec`, cheap enough for the
/// fire-and-forget contract.  Intended for tests and small analysis runs;
/// use [`CsvEventLog`][crate::CsvEventLog] for anything long-lived.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<SimEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything recorded so far.
    pub fn events(&self) -> Vec<SimEvent> {
        self.lock().clone()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The `(from, to, trip_time)` legs of one resident, in ride order.
    ///
    /// Per-agent order is exact even though the global log interleaves.
    pub fn trips_for(&self, resident: ResidentId) -> Vec<(StationId, StationId, u32)> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                SimEvent::ResidentTrip { resident: r, from, to, trip_time } if *r == resident => {
                    Some((*from, *to, *trip_time))
                }
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SimEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventSink for MemorySink {
    fn on_station_init(&self, station: StationId, count: u32) {
        self.lock().push(SimEvent::StationInit { station, count });
    }
    fn on_resident_init(&self, resident: ResidentId, station: StationId) {
        self.lock().push(SimEvent::ResidentInit { resident, station });
    }
    fn on_resident_state_changed(&self, resident: ResidentId, state: ResidentState) {
        self.lock()
            .push(SimEvent::ResidentStateChanged { resident, state });
    }
    fn on_station_count_changed(&self, station: StationId, count: u32) {
        self.lock()
            .push(SimEvent::StationCountChanged { station, count });
    }
    fn on_resident_trip(
        &self,
        resident:  ResidentId,
        from:      StationId,
        to:        StationId,
        trip_time: u32,
    ) {
        self.lock().push(SimEvent::ResidentTrip {
            resident,
            from,
            to,
            trip_time,
        });
    }
    fn on_depot_count_changed(&self, count: u32) {
        self.lock().push(SimEvent::DepotCountChanged { count });
    }
    fn on_truck_init(&self) {
        self.lock().push(SimEvent::TruckInit);
    }
    fn on_truck_count_changed(&self, count: u32) {
        self.lock().push(SimEvent::TruckCountChanged { count });
    }
    fn on_truck_trip(&self, from: TruckStop, to: TruckStop, trip_time: u32) {
        self.lock().push(SimEvent::TruckTrip {
            from,
            to,
            trip_time,
        });
    }
}
