//! `bks-agent` — the two agent behaviors of the bike-share network.
//!
//! Each agent is a plain struct with a `run(self) -> u32` loop, designed to
//! be moved onto its own OS thread by the orchestrator.  The return value is
//! the number of bikes the agent still holds when it stops (a resident
//! cancelled mid-ride carries one; the truck cancelled mid-circuit carries
//! its load) — the orchestrator feeds these into the fleet-conservation
//! audit.
//!
//! | Agent              | Behavior                                          |
//! |--------------------|---------------------------------------------------|
//! | [`Resident`]       | borrow → ride to a random station → return, forever |
//! | [`MaintenanceTruck`] | greedy rebalancing circuit over all stations, forever |
//!
//! Capacity violations are expected traffic, not errors: residents back off
//! and reroute, the truck recomputes its transfer.  Nothing here ever
//! propagates them upward.

pub mod resident;
pub mod truck;


pub use resident::Resident;
pub use truck::MaintenanceTruck;
