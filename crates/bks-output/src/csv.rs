//! CSV event stream.
//!
//! One flat row per event.  Columns unused by a given event kind are left
//! empty; truck positions use `-1` as the reserved depot sentinel so rows
//! stay numeric.

use std::io::Write;
use std::sync::Mutex;

use bks_core::{EventSink, ResidentId, ResidentState, StationId, TruckStop};

use crate::{OutputError, OutputResult};

/// One CSV row.  Serialized via serde so the header row matches the fields.
#[derive(Debug, Default, serde::Serialize)]
struct EventRow {
    event:     &'static str,
    resident:  Option<u32>,
    station:   Option<u32>,
    from:      Option<i64>,
    to:        Option<i64>,
    count:     Option<u32>,
    trip_time: Option<u32>,
    state:     Option<&'static str>,
}

/// `TruckStop` → flat position id (`-1` = depot).
fn stop_code(stop: TruckStop) -> i64 {
    match stop {
        TruckStop::Depot => -1,
        TruckStop::Station(s) => s.0 as i64,
    }
}

fn state_name(state: ResidentState) -> &'static str {
    match state {
        ResidentState::AtStation => "at_station",
        ResidentState::Riding => "riding",
    }
}

/// An [`EventSink`] that streams every event as a CSV row.
///
/// Agent threads write concurrently through an internal mutex; rows are
/// buffered by the underlying `csv::Writer`.  Sink callbacks cannot return
/// errors, so the first write failure is parked and all later events are
/// dropped — check [`take_error`][Self::take_error] (or the `flush` result)
/// when the run ends.
pub struct CsvEventLog<W: Write + Send> {
    writer: Mutex<csv::Writer<W>>,
    error:  Mutex<Option<csv::Error>>,
}

impl<W: Write + Send> CsvEventLog<W> {
    /// Wrap `writer` in a CSV event stream.  The header row is written with
    /// the first event.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(csv::Writer::from_writer(writer)),
            error:  Mutex::new(None),
        }
    }

    /// Flush buffered rows to the underlying writer.
    pub fn flush(&self) -> OutputResult<()> {
        if let Some(e) = self.take_error() {
            return Err(e.into());
        }
        let mut writer = lock(&self.writer);
        writer.flush()?;
        Ok(())
    }

    /// The first write error since the last call, if any.
    pub fn take_error(&self) -> Option<csv::Error> {
        lock(&self.error).take()
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> OutputResult<W> {
        let writer = self
            .writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writer
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }

    fn record(&self, row: EventRow) {
        let mut error = lock(&self.error);
        if error.is_some() {
            return;
        }
        let mut writer = lock(&self.writer);
        if let Err(e) = writer.serialize(row) {
            *error = Some(e);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<W: Write + Send> EventSink for CsvEventLog<W> {
    fn on_station_init(&self, station: StationId, count: u32) {
        self.record(EventRow {
            event: "station_init",
            station: Some(station.0),
            count: Some(count),
            ..EventRow::default()
        });
    }

    fn on_resident_init(&self, resident: ResidentId, station: StationId) {
        self.record(EventRow {
            event: "resident_init",
            resident: Some(resident.0),
            station: Some(station.0),
            ..EventRow::default()
        });
    }

    fn on_resident_state_changed(&self, resident: ResidentId, state: ResidentState) {
        self.record(EventRow {
            event: "resident_state",
            resident: Some(resident.0),
            state: Some(state_name(state)),
            ..EventRow::default()
        });
    }

    fn on_station_count_changed(&self, station: StationId, count: u32) {
        self.record(EventRow {
            event: "station_count",
            station: Some(station.0),
            count: Some(count),
            ..EventRow::default()
        });
    }

    fn on_resident_trip(
        &self,
        resident:  ResidentId,
        from:      StationId,
        to:        StationId,
        trip_time: u32,
    ) {
        self.record(EventRow {
            event: "resident_trip",
            resident: Some(resident.0),
            from: Some(from.0 as i64),
            to: Some(to.0 as i64),
            trip_time: Some(trip_time),
            ..EventRow::default()
        });
    }

    fn on_depot_count_changed(&self, count: u32) {
        self.record(EventRow {
            event: "depot_count",
            count: Some(count),
            ..EventRow::default()
        });
    }

    fn on_truck_init(&self) {
        self.record(EventRow {
            event: "truck_init",
            ..EventRow::default()
        });
    }

    fn on_truck_count_changed(&self, count: u32) {
        self.record(EventRow {
            event: "truck_count",
            count: Some(count),
            ..EventRow::default()
        });
    }

    fn on_truck_trip(&self, from: TruckStop, to: TruckStop, trip_time: u32) {
        self.record(EventRow {
            event: "truck_trip",
            from: Some(stop_code(from)),
            to: Some(stop_code(to)),
            trip_time: Some(trip_time),
            ..EventRow::default()
        });
    }
}
