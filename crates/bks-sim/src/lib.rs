//! `bks-sim` — the simulation orchestrator.
//!
//! # Run lifecycle
//!
//! ```text
//! SimBuilder::new(config).sink(sink).build()?   validate, build shared inventory
//!   .start()?                                   spawn resident + truck threads
//!     handle.shutdown()                         broadcast the cancellation token
//!     handle.join()?                            join all threads, audit conservation
//! ```
//!
//! Configuration problems fail in `build`, before any concurrency exists.
//! Capacity violations never reach this crate — agents absorb them.  The one
//! error `join` can produce on a healthy run is the fleet-conservation audit
//! tripping, and that means a synchronization bug, not a simulation event.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bks_core::SimConfig;
//! use bks_sim::SimBuilder;
//!
//! let config = SimConfig::reference(6, 20, 10, 60, 42);
//! let sim = SimBuilder::new(config).build()?;
//! let report = sim.run_for(std::time::Duration::from_secs(2))?;
//! println!("{report:?}");
//! ```

pub mod builder;
pub mod error;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use sim::{SimHandle, SimReport, Simulation};
