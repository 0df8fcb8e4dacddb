//! Builders for domain values in tests.

use chrono::{DateTime, Duration};

use super::*;

/// 2024-03-01 at `hh:mm` in Swiss winter time.
pub fn at(hh_mm: &str) -> Timestamp {
    DateTime::parse_from_rfc3339(&format!("2024-03-01T{hh_mm}:00+01:00")).unwrap()
}

fn stop(name: &str) -> StopPoint {
    StopPoint {
        stop_point_ref: format!("ref:{name}"),
        stop_point_name: InternationalText::new(name),
        name_suffix: None,
        planned_quay: None,
        estimated_quay: None,
    }
}

pub fn service(published_name: &str) -> Service {
    Service {
        conventional_mode_of_operation: None,
        operating_day_ref: "2024-03-01".into(),
        journey_ref: format!("journey:{published_name}"),
        public_code: None,
        line_ref: format!("line:{published_name}"),
        direction_ref: None,
        mode: Mode {
            pt_mode: PtMode::Rail,
            bus_submode: None,
            rail_submode: None,
            name: None,
            short_name: None,
        },
        product_category: None,
        published_service_name: InternationalText::new(published_name),
        train_number: None,
        vehicle_ref: None,
        attributes: vec![],
        operator_ref: None,
        origin_text: None,
        origin_stop_point_ref: None,
        destination_text: None,
        destination_stop_point_ref: None,
    }
}

pub fn timed_leg(line: &str, from: &str, departs: &str, to: &str, arrives: &str) -> Leg {
    Leg {
        id: 1,
        duration: Some(at(arrives) - at(departs)),
        leg_type: LegType::Timed(TimedLeg {
            leg_board: LegBoard {
                stop: stop(from),
                service_arrival: None,
                service_departure: ServiceTime {
                    timetabled_time: at(departs),
                    estimated_time: None,
                },
                status: StopCallStatus::default(),
            },
            legs_intermediate: vec![],
            leg_alight: LegAlight {
                stop: stop(to),
                service_arrival: ServiceTime {
                    timetabled_time: at(arrives),
                    estimated_time: None,
                },
                service_departure: None,
                status: StopCallStatus::default(),
            },
            service: service(line),
            leg_track: None,
        }),
    }
}

pub fn transfer_leg(minutes: i64) -> Leg {
    Leg {
        id: 2,
        duration: Some(Duration::minutes(minutes)),
        leg_type: LegType::Transfer(TransferLeg {
            transfer_types: vec![TransferType::Walk],
            leg_start: PlaceRefChoice::stop_point("ref:a", "Platform 1"),
            leg_end: PlaceRefChoice::stop_point("ref:b", "Platform 2"),
            duration: Duration::minutes(minutes),
        }),
    }
}

pub fn continuous(id: u32) -> Leg {
    Leg {
        id,
        duration: None,
        leg_type: LegType::Continuous(ContinuousLeg),
    }
}

/// A twenty-minute trip starting at `hh:mm`.
pub fn trip_at(id: &str, starts: &str, legs: Vec<Leg>) -> Trip {
    let start = at(starts);
    Trip {
        id: id.to_string(),
        duration: Duration::minutes(20),
        start_time: start,
        end_time: start + Duration::minutes(20),
        transfers: 0,
        distance: None,
        legs,
    }
}
