//! `bks-inventory` — the shared bike inventory every agent mutates.
//!
//! Two structures, both owned by the orchestrator and handed to agents as
//! shared references:
//!
//! - [`StationRegistry`] — per-station bounds-checked atomic counters.
//!   Adjustments on the same station serialize through a compare-and-swap
//!   loop; different stations never contend.
//! - [`Depot`] — the spare-bike pool.  Single writer (the maintenance
//!   truck), so a plain atomic load/store pair suffices.
//!
//! Every committed mutation emits exactly one event to the attached
//! [`EventSink`][bks_core::EventSink]; failed adjustments emit nothing.

pub mod depot;
pub mod error;
pub mod registry;


pub use depot::Depot;
pub use error::{InventoryError, InventoryResult};
pub use registry::StationRegistry;
