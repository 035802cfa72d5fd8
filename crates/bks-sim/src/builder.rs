//! Fluent builder for constructing a [`Simulation`].

use std::sync::Arc;

use bks_core::{EventSink, NoopSink, ShutdownToken, SimConfig};
use bks_inventory::{Depot, StationRegistry};

use crate::{SimError, SimResult, Simulation};

/// Validates a [`SimConfig`] and assembles the shared inventory.
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(SimConfig::reference(6, 20, 10, 60, 42))
///     .sink(Arc::new(MySink))
///     .build()?;
/// ```
pub struct SimBuilder {
    config: SimConfig,
    sink:   Option<Arc<dyn EventSink>>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, sink: None }
    }

    /// Attach a notification sink.  Defaults to [`NoopSink`].
    pub fn sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Validate the configuration and build a ready-to-start [`Simulation`].
    ///
    /// All checks happen here, before any agent thread exists; a
    /// configuration error can never take down a running simulation.
    pub fn build(self) -> SimResult<Simulation> {
        let cfg = &self.config;
        if cfg.station_count == 0 {
            return Err(SimError::Config("station_count must be at least 1"));
        }
        if cfg.docks_per_station < 2 {
            return Err(SimError::Config("docks_per_station must be at least 2"));
        }
        if cfg.waiting_time == 0 {
            return Err(SimError::Config("waiting_time must be at least 1"));
        }
        if cfg.truck_capacity == 0 {
            return Err(SimError::Config("truck_capacity must be at least 1"));
        }
        if cfg.initial_fill > cfg.docks_per_station {
            return Err(SimError::Config(
                "initial_fill cannot exceed docks_per_station",
            ));
        }
        let docked = cfg.station_count.checked_mul(cfg.initial_fill);
        match docked {
            Some(docked) if docked <= cfg.total_fleet => {}
            _ => {
                return Err(SimError::FleetTooSmall {
                    configured:    cfg.total_fleet,
                    station_count: cfg.station_count,
                    initial_fill:  cfg.initial_fill,
                });
            }
        }

        let sink = self.sink.unwrap_or_else(|| Arc::new(NoopSink));
        let stations = Arc::new(StationRegistry::new(
            cfg.station_count,
            cfg.docks_per_station,
            cfg.initial_fill,
            Arc::clone(&sink),
        ));
        let depot = Arc::new(Depot::new(cfg.initial_depot_count(), Arc::clone(&sink)));

        Ok(Simulation {
            config: self.config,
            stations,
            depot,
            sink,
            shutdown: ShutdownToken::new(),
        })
    }
}
