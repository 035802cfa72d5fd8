//! `Depot` — the spare-bike pool outside the station network.
//!
//! # Single-writer contract
//!
//! Only the maintenance truck writes to the depot, and there is exactly one
//! truck, so `set` is a plain unconditional overwrite — the truck always
//! recomputes the full new value (withdraw at circuit start, deposit at
//! circuit end).  Residents never receive a depot handle, which the
//! orchestrator's wiring enforces.  If that assumption is ever relaxed, this
//! accessor must adopt the same bounds-checked compare-and-swap discipline as
//! [`StationRegistry`][crate::StationRegistry].

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use bks_core::EventSink;

/// The shared spare-bike pool.  Bounded only by the total fleet size.
pub struct Depot {
    count: AtomicU32,
    sink:  Arc<dyn EventSink>,
}

impl Depot {
    /// Create the depot with `initial` spare bikes and emit the initial
    /// `depot_count_changed` event.
    pub fn new(initial: u32, sink: Arc<dyn EventSink>) -> Self {
        sink.on_depot_count_changed(initial);
        Self {
            count: AtomicU32::new(initial),
            sink,
        }
    }

    /// Current spare-bike count.
    pub fn get(&self) -> u32 {
        self.count.load(Ordering::Acquire)
    }

    /// Overwrite the spare-bike count and emit one `depot_count_changed`
    /// event.  Truck-only, per the single-writer contract above.
    pub fn set(&self, count: u32) {
        self.count.store(count, Ordering::Release);
        self.sink.on_depot_count_changed(count);
    }
}
