//! `bks-core` — foundational types for the `rust_bikeshare` simulation.
//!
//! This crate is a dependency of every other `bks-*` crate.  It intentionally
//! has no `bks-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                             |
//! |--------------|------------------------------------------------------|
//! | [`ids`]      | `StationId`, `ResidentId`                            |
//! | [`config`]   | `SimConfig` and its derived values                   |
//! | [`rng`]      | `AgentRng` (per-agent), `SimRng` (orchestrator)      |
//! | [`event`]    | `EventSink`, `NoopSink`, `ResidentState`, `TruckStop`|
//! | [`shutdown`] | `ShutdownToken` — cancellable simulated delays       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.  |
//!           | Required by `bks-output`.                            |

pub mod config;
pub mod event;
pub mod ids;
pub mod rng;
pub mod shutdown;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use event::{EventSink, NoopSink, ResidentState, TruckStop};
pub use ids::{ResidentId, StationId};
pub use rng::{AgentRng, SimRng};
pub use shutdown::ShutdownToken;
