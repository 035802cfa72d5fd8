//! Tests for the recording sinks.

use bks_core::{EventSink, ResidentId, ResidentState, StationId, TruckStop};

use crate::{CsvEventLog, MemorySink, SimEvent};

#[cfg(test)]
mod memory {
    use super::*;

    #[test]
    fn records_in_emission_order() {
        let sink = MemorySink::new();
        sink.on_truck_init();
        sink.on_station_init(StationId(0), 8);
        sink.on_depot_count_changed(12);

        assert_eq!(
            sink.events(),
            vec![
                SimEvent::TruckInit,
                SimEvent::StationInit { station: StationId(0), count: 8 },
                SimEvent::DepotCountChanged { count: 12 },
            ]
        );
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn trips_for_filters_one_resident() {
        let sink = MemorySink::new();
        sink.on_resident_trip(ResidentId(0), StationId(0), StationId(1), 3);
        sink.on_resident_trip(ResidentId(1), StationId(2), StationId(0), 1);
        sink.on_resident_trip(ResidentId(0), StationId(1), StationId(2), 5);

        assert_eq!(
            sink.trips_for(ResidentId(0)),
            vec![(StationId(0), StationId(1), 3), (StationId(1), StationId(2), 5)]
        );
        assert_eq!(sink.trips_for(ResidentId(7)), vec![]);
    }
}

#[cfg(test)]
mod csv_log {
    use super::*;

    fn rows(log: CsvEventLog<Vec<u8>>) -> Vec<String> {
        let bytes = log.into_inner().unwrap();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn header_and_row_shape() {
        let log = CsvEventLog::new(Vec::new());
        log.on_station_count_changed(StationId(3), 7);

        let rows = rows(log);
        assert_eq!(
            rows,
            vec![
                "event,resident,station,from,to,count,trip_time,state",
                "station_count,,3,,,7,,",
            ]
        );
    }

    #[test]
    fn depot_stop_uses_minus_one_sentinel() {
        let log = CsvEventLog::new(Vec::new());
        log.on_truck_trip(TruckStop::Depot, TruckStop::Station(StationId(2)), 4);
        log.on_truck_trip(TruckStop::Station(StationId(2)), TruckStop::Depot, 1);

        let rows = rows(log);
        assert_eq!(rows[1], "truck_trip,,,-1,2,,4,");
        assert_eq!(rows[2], "truck_trip,,,2,-1,,1,");
    }

    #[test]
    fn resident_events_round_out_the_columns() {
        let log = CsvEventLog::new(Vec::new());
        log.on_resident_init(ResidentId(4), StationId(1));
        log.on_resident_state_changed(ResidentId(4), ResidentState::Riding);
        log.on_resident_trip(ResidentId(4), StationId(1), StationId(0), 2);
        log.on_resident_state_changed(ResidentId(4), ResidentState::AtStation);

        let rows = rows(log);
        assert_eq!(rows[1], "resident_init,4,1,,,,,");
        assert_eq!(rows[2], "resident_state,4,,,,,,riding");
        assert_eq!(rows[3], "resident_trip,4,,1,0,,2,");
        assert_eq!(rows[4], "resident_state,4,,,,,,at_station");
    }

    #[test]
    fn flush_succeeds_on_healthy_stream() {
        let log = CsvEventLog::new(Vec::new());
        log.on_truck_count_changed(2);
        log.flush().unwrap();
        assert!(log.take_error().is_none());
    }
}
