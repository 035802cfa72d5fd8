//! The `Simulation` struct, its thread spawning, and the join-time audit.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use bks_agent::{MaintenanceTruck, Resident};
use bks_core::{AgentRng, EventSink, ResidentId, ShutdownToken, SimConfig, SimRng, StationId};
use bks_inventory::{Depot, StationRegistry};

use crate::{SimError, SimResult};

// ── Simulation ────────────────────────────────────────────────────────────────

/// A validated, not-yet-started simulation.
///
/// Owns the shared inventory and hands agents `Arc` handles at spawn time —
/// agents never reach for globals.  Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulation {
    pub(crate) config:   SimConfig,
    pub(crate) stations: Arc<StationRegistry>,
    pub(crate) depot:    Arc<Depot>,
    pub(crate) sink:     Arc<dyn EventSink>,
    pub(crate) shutdown: ShutdownToken,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("config", &self.config)
            .field("stations", &"<StationRegistry>")
            .field("depot", &"<Depot>")
            .field("sink", &"<dyn EventSink>")
            .field("shutdown", &"<ShutdownToken>")
            .finish()
    }
}

impl Simulation {
    /// The shared station registry (counts are live once started).
    pub fn stations(&self) -> &Arc<StationRegistry> {
        &self.stations
    }

    /// The shared depot.
    pub fn depot(&self) -> &Arc<Depot> {
        &self.depot
    }

    /// Spawn every agent on its own named OS thread and return the handle
    /// used to stop and reap them.
    ///
    /// Residents are placed on uniformly random stations drawn from an
    /// orchestrator-level RNG, so placement depends only on the seed.
    /// Per-agent RNGs use the agent's index; the truck takes the index one
    /// past the last resident.
    pub fn start(self) -> SimResult<SimHandle> {
        let cfg = &self.config;
        let mut placement = SimRng::new(cfg.seed);

        self.sink.on_truck_init();
        let truck = MaintenanceTruck::new(
            AgentRng::new(cfg.seed, cfg.resident_count as u64),
            Arc::clone(&self.stations),
            Arc::clone(&self.depot),
            Arc::clone(&self.sink),
            self.shutdown.clone(),
            cfg.clone(),
        );
        let truck_handle = match thread::Builder::new()
            .name("maintenance".into())
            .spawn(move || truck.run())
        {
            Ok(handle) => handle,
            Err(e) => {
                self.shutdown.cancel();
                return Err(e.into());
            }
        };

        let mut residents = Vec::with_capacity(cfg.resident_count as usize);
        for i in 0..cfg.resident_count {
            let id = ResidentId(i);
            let station = StationId(placement.gen_range(0..cfg.station_count));
            self.sink.on_resident_init(id, station);
            let resident = Resident::new(
                id,
                station,
                AgentRng::new(cfg.seed, i as u64),
                Arc::clone(&self.stations),
                Arc::clone(&self.sink),
                self.shutdown.clone(),
                cfg.clone(),
            );
            match thread::Builder::new()
                .name(format!("resident-{i}"))
                .spawn(move || resident.run())
            {
                Ok(handle) => residents.push(handle),
                Err(e) => {
                    // Reap nothing: cancel so already-running threads exit.
                    self.shutdown.cancel();
                    return Err(e.into());
                }
            }
        }

        Ok(SimHandle {
            shutdown:    self.shutdown,
            residents,
            truck:       truck_handle,
            stations:    self.stations,
            depot:       self.depot,
            total_fleet: self.config.total_fleet,
        })
    }

    /// Convenience wrapper: start, let the network run for `duration`, then
    /// shut down and audit.
    pub fn run_for(self, duration: Duration) -> SimResult<SimReport> {
        let handle = self.start()?;
        thread::sleep(duration);
        handle.shutdown();
        handle.join()
    }
}

// ── SimHandle ─────────────────────────────────────────────────────────────────

/// Handle to a running simulation.
pub struct SimHandle {
    shutdown:    ShutdownToken,
    residents:   Vec<JoinHandle<u32>>,
    truck:       JoinHandle<u32>,
    stations:    Arc<StationRegistry>,
    depot:       Arc<Depot>,
    total_fleet: u32,
}

impl SimHandle {
    /// Broadcast shutdown to every agent.  Idempotent.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Wait for every agent thread to stop, then audit fleet conservation.
    ///
    /// Blocks until all agents exit — call [`shutdown`][Self::shutdown]
    /// first (or use [`Simulation::run_for`]); the truck never stops on its
    /// own.  The audit requires
    /// `sum(stations) + depot + bikes-in-agent-hands == total_fleet`;
    /// a mismatch is reported as [`SimError::InvariantViolation`].
    pub fn join(self) -> SimResult<SimReport> {
        let mut in_transit: u32 = 0;
        let mut panicked: Option<String> = None;

        let mut reap = |handle: JoinHandle<u32>, carried: &mut u32| {
            let name = handle.thread().name().unwrap_or("agent").to_owned();
            match handle.join() {
                Ok(held) => *carried += held,
                Err(_) => panicked = Some(name),
            }
        };
        for handle in self.residents {
            reap(handle, &mut in_transit);
        }
        reap(self.truck, &mut in_transit);
        if let Some(name) = panicked {
            return Err(SimError::AgentPanicked(name));
        }

        let station_counts = self.stations.snapshot();
        let depot_count = self.depot.get();
        let counted = station_counts.iter().sum::<u32>() + depot_count + in_transit;
        if counted != self.total_fleet {
            return Err(SimError::InvariantViolation {
                expected: self.total_fleet,
                counted,
            });
        }

        Ok(SimReport {
            station_counts,
            depot_count,
            bikes_in_transit: in_transit,
        })
    }
}

// ── SimReport ─────────────────────────────────────────────────────────────────

/// Final, audited inventory snapshot of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimReport {
    /// Docked bikes per station, in station order.
    pub station_counts: Vec<u32>,
    /// Spare bikes in the depot.
    pub depot_count: u32,
    /// Bikes that were still in agent hands at shutdown (riding residents
    /// plus the truck bed).
    pub bikes_in_transit: u32,
}

impl SimReport {
    /// Total bikes accounted for; always equals the configured fleet size
    /// for a report that passed the audit.
    pub fn total(&self) -> u32 {
        self.station_counts.iter().sum::<u32>() + self.depot_count + self.bikes_in_transit
    }
}
