//! small — smallest runnable bike-share network.
//!
//! Six stations, twenty residents, one maintenance truck, a few wall-clock
//! seconds of simulated traffic.  Prints the interesting events to the
//! terminal, streams the full log to `events.csv`, then reports the final
//! audited inventory.

use std::fs::File;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use bks_core::{EventSink, ResidentId, ResidentState, SimConfig, StationId, TruckStop};
use bks_output::CsvEventLog;
use bks_sim::SimBuilder;

// ── Constants ─────────────────────────────────────────────────────────────────

const STATION_COUNT:     u32 = 6;
const RESIDENT_COUNT:    u32 = 20;
const DOCKS_PER_STATION: u32 = 10;
const TOTAL_FLEET:       u32 = 60;
const SEED:              u64 = 42;
const RUN_SECS:          u64 = 3;

// ── Console sink ──────────────────────────────────────────────────────────────

/// Prints movements and depot/truck loads; per-station counter churn stays
/// quiet.
struct ConsoleSink;

fn stop_name(stop: TruckStop) -> String {
    match stop {
        TruckStop::Depot => "depot".to_owned(),
        TruckStop::Station(s) => format!("station {}", s.0),
    }
}

impl EventSink for ConsoleSink {
    fn on_resident_trip(&self, r: ResidentId, from: StationId, to: StationId, t: u32) {
        println!("resident {} rides {} -> {} ({t}u)", r.0, from.0, to.0);
    }
    fn on_truck_trip(&self, from: TruckStop, to: TruckStop, t: u32) {
        println!("truck drives {} -> {} ({t}u)", stop_name(from), stop_name(to));
    }
    fn on_truck_count_changed(&self, count: u32) {
        println!("truck now carries {count}");
    }
    fn on_depot_count_changed(&self, count: u32) {
        println!("depot now holds {count}");
    }
}

// ── Tee sink ──────────────────────────────────────────────────────────────────

/// Fans every event out to both attached sinks.
struct TeeSink(Arc<dyn EventSink>, Arc<dyn EventSink>);

impl EventSink for TeeSink {
    fn on_station_init(&self, station: StationId, count: u32) {
        self.0.on_station_init(station, count);
        self.1.on_station_init(station, count);
    }
    fn on_resident_init(&self, resident: ResidentId, station: StationId) {
        self.0.on_resident_init(resident, station);
        self.1.on_resident_init(resident, station);
    }
    fn on_resident_state_changed(&self, resident: ResidentId, state: ResidentState) {
        self.0.on_resident_state_changed(resident, state);
        self.1.on_resident_state_changed(resident, state);
    }
    fn on_station_count_changed(&self, station: StationId, count: u32) {
        self.0.on_station_count_changed(station, count);
        self.1.on_station_count_changed(station, count);
    }
    fn on_resident_trip(&self, r: ResidentId, from: StationId, to: StationId, t: u32) {
        self.0.on_resident_trip(r, from, to, t);
        self.1.on_resident_trip(r, from, to, t);
    }
    fn on_depot_count_changed(&self, count: u32) {
        self.0.on_depot_count_changed(count);
        self.1.on_depot_count_changed(count);
    }
    fn on_truck_init(&self) {
        self.0.on_truck_init();
        self.1.on_truck_init();
    }
    fn on_truck_count_changed(&self, count: u32) {
        self.0.on_truck_count_changed(count);
        self.1.on_truck_count_changed(count);
    }
    fn on_truck_trip(&self, from: TruckStop, to: TruckStop, t: u32) {
        self.0.on_truck_trip(from, to, t);
        self.1.on_truck_trip(from, to, t);
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = SimConfig::reference(
        STATION_COUNT,
        RESIDENT_COUNT,
        DOCKS_PER_STATION,
        TOTAL_FLEET,
        SEED,
    );

    let csv = Arc::new(CsvEventLog::new(File::create("events.csv")?));
    let sink = Arc::new(TeeSink(
        Arc::new(ConsoleSink),
        Arc::clone(&csv) as Arc<dyn EventSink>,
    ));

    println!(
        "{STATION_COUNT} stations × {DOCKS_PER_STATION} docks, \
         {RESIDENT_COUNT} residents, fleet {TOTAL_FLEET}, seed {SEED}"
    );

    let report = SimBuilder::new(config)
        .sink(sink)
        .build()?
        .run_for(Duration::from_secs(RUN_SECS))?;

    csv.flush()?;

    println!("\n── final inventory ──");
    for (i, count) in report.station_counts.iter().enumerate() {
        println!("station {i}: {count}/{DOCKS_PER_STATION}");
    }
    println!("depot: {}", report.depot_count);
    println!("in transit at shutdown: {}", report.bikes_in_transit);
    println!("audited total: {}", report.total());

    Ok(())
}
