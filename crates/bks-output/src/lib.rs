//! `bks-output` — sinks that record the simulation's event stream.
//!
//! The core emits events through the [`EventSink`][bks_core::EventSink]
//! boundary; this crate provides the two recording implementations:
//!
//! | Sink           | Use                                                  |
//! |----------------|------------------------------------------------------|
//! | [`MemorySink`] | In-memory capture, for tests and post-run analysis   |
//! | [`CsvEventLog`]| One flat CSV row per event, streamed to any writer   |
//!
//! Sinks are called from every agent thread concurrently and must never
//! block the emitter for long or feed errors back into it: the CSV sink
//! parks its first write error for later retrieval instead of panicking.

pub mod csv;
pub mod error;
pub mod event;
pub mod memory;

#[cfg(test)]
mod tests;

pub use csv::CsvEventLog;
pub use error::{OutputError, OutputResult};
pub use event::SimEvent;
pub use memory::MemorySink;
