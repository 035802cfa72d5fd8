//! `StationRegistry` — per-station bike counts with atomic bounds-checked
//! adjustment.
//!
//! # Concurrency
//!
//! Each station is an independent `AtomicU32`; an adjustment is a
//! compare-and-swap retry loop that re-validates the `[0, capacity]` bounds
//! against every freshly observed value.  Same-station adjustments serialize
//! through the CAS, different stations proceed in parallel, and there is no
//! registry-wide lock.  A sequence of calls by one agent is *not* atomic as a
//! whole — observers may see intermediate states, which is fine because they
//! only ever consume committed counts.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use bks_core::{EventSink, StationId};

use crate::{InventoryError, InventoryResult};

/// One docking station: immutable capacity, atomic bike count.
struct StationSlot {
    capacity: u32,
    count:    AtomicU32,
}

/// The shared registry of all docking stations.
pub struct StationRegistry {
    slots: Vec<StationSlot>,
    sink:  Arc<dyn EventSink>,
}

impl StationRegistry {
    /// Build `station_count` stations, each with `capacity` docks and
    /// `initial_fill` bikes, and emit one `station_init` event per station.
    ///
    /// `initial_fill` is clamped to `capacity`; the orchestrator validates
    /// the configuration before construction.
    pub fn new(
        station_count: u32,
        capacity:      u32,
        initial_fill:  u32,
        sink:          Arc<dyn EventSink>,
    ) -> Self {
        let fill = initial_fill.min(capacity);
        Self::from_counts(capacity, &vec![fill; station_count as usize], sink)
    }

    /// Build one station per entry of `counts`, each with `capacity` docks.
    ///
    /// Lets scenarios (and tests) start from an uneven distribution; counts
    /// are clamped to `capacity`.
    pub fn from_counts(capacity: u32, counts: &[u32], sink: Arc<dyn EventSink>) -> Self {
        let slots = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let count = count.min(capacity);
                sink.on_station_init(StationId(i as u32), count);
                StationSlot {
                    capacity,
                    count: AtomicU32::new(count),
                }
            })
            .collect();
        Self { slots, sink }
    }

    /// Number of stations in the registry.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The dock capacity shared by all stations.
    pub fn capacity(&self) -> u32 {
        self.slots.first().map_or(0, |s| s.capacity)
    }

    /// Current bike count at `station`.
    pub fn get(&self, station: StationId) -> InventoryResult<u32> {
        let slot = self
            .slots
            .get(station.index())
            .ok_or(InventoryError::UnknownStation(station))?;
        Ok(slot.count.load(Ordering::Acquire))
    }

    /// Atomically add `delta` bikes to `station` (negative = withdraw).
    ///
    /// Returns the post-adjustment count and emits exactly one
    /// `station_count_changed` event.  Fails with
    /// [`InventoryError::CapacityViolation`] — emitting nothing — if the
    /// result would leave `[0, capacity]`; the caller backs off and retries
    /// or reroutes.
    pub fn adjust(&self, station: StationId, delta: i32) -> InventoryResult<u32> {
        let slot = self
            .slots
            .get(station.index())
            .ok_or(InventoryError::UnknownStation(station))?;

        let mut current = slot.count.load(Ordering::Acquire);
        loop {
            let next = current as i64 + delta as i64;
            if next < 0 || next > slot.capacity as i64 {
                return Err(InventoryError::CapacityViolation {
                    station,
                    count: current,
                    capacity: slot.capacity,
                    delta,
                });
            }
            match slot.count.compare_exchange_weak(
                current,
                next as u32,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    self.sink.on_station_count_changed(station, next as u32);
                    return Ok(next as u32);
                }
                Err(observed) => current = observed,
            }
        }
    }

    /// A point-in-time copy of every station's count, in station order.
    ///
    /// Taken while agents run it is only a sampling; taken after all agents
    /// have stopped it is exact (used by the conservation audit and tests).
    pub fn snapshot(&self) -> Vec<u32> {
        self.slots
            .iter()
            .map(|s| s.count.load(Ordering::Acquire))
            .collect()
    }

    /// Sum of all docked bikes, from the same sampling as [`snapshot`][Self::snapshot].
    pub fn total_docked(&self) -> u32 {
        self.snapshot().iter().sum()
    }
}
