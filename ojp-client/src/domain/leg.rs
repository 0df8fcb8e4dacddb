//! Trip legs.
//!
//! A leg is one of three kinds: a timed leg on a scheduled service, a
//! transfer between two places, or a continuous leg (walking, cycling,
//! driving). Continuous legs are carried as an opaque placeholder.

use chrono::Duration;
use serde::Serialize;

use super::{GeoPosition, InternationalText, PlaceRefChoice, Service, Timestamp};

/// Scheduled and estimated time of an arrival or departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceTime {
    pub timetabled_time: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<Timestamp>,
}

impl ServiceTime {
    /// Best known time: the estimate if there is one, else the timetable.
    pub fn best(&self) -> Timestamp {
        self.estimated_time.unwrap_or(self.timetabled_time)
    }
}

/// Identification of the stop point a leg calls at (`StopPointGroup`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopPoint {
    pub stop_point_ref: String,
    pub stop_point_name: InternationalText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_suffix: Option<InternationalText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_quay: Option<InternationalText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_quay: Option<InternationalText>,
}

/// Status flags of a call (`StopCallStatusGroup`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StopCallStatus {
    pub order: Option<u32>,
    pub request_stop: Option<bool>,
    pub unplanned_stop: Option<bool>,
    pub not_serviced_stop: Option<bool>,
    pub no_boarding_at_stop: Option<bool>,
    pub no_alighting_at_stop: Option<bool>,
}

/// Where a timed leg is boarded. A departure time is required.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegBoard {
    #[serde(flatten)]
    pub stop: StopPoint,
    pub service_arrival: Option<ServiceTime>,
    pub service_departure: ServiceTime,
    #[serde(flatten)]
    pub status: StopCallStatus,
}

/// An intermediate call of a timed leg.
///
/// Some producers omit both times on intermediate calls, so neither is
/// required.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegIntermediate {
    #[serde(flatten)]
    pub stop: StopPoint,
    pub service_arrival: Option<ServiceTime>,
    pub service_departure: Option<ServiceTime>,
    #[serde(flatten)]
    pub status: StopCallStatus,
}

/// Where a timed leg is left. An arrival time is required.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegAlight {
    #[serde(flatten)]
    pub stop: StopPoint,
    pub service_arrival: ServiceTime,
    pub service_departure: Option<ServiceTime>,
    #[serde(flatten)]
    pub status: StopCallStatus,
}

/// One section of a leg's geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSection {
    pub track_section_start: Option<PlaceRefChoice>,
    pub track_section_end: Option<PlaceRefChoice>,
    /// Polyline of the section (`LinkProjection`).
    pub link_projection: Vec<GeoPosition>,
}

/// Geometry of a timed leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegTrack {
    pub track_sections: Vec<TrackSection>,
}

/// A ride on a scheduled service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedLeg {
    pub leg_board: LegBoard,
    pub legs_intermediate: Vec<LegIntermediate>,
    pub leg_alight: LegAlight,
    pub service: Service,
    pub leg_track: Option<LegTrack>,
}

/// Kind of a transfer (`TransferTypeEnumeration`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TransferType {
    Walk,
    Shuttle,
    Taxi,
    ProtectedConnection,
    GuaranteedConnection,
    RemainInVehicle,
    ChangeWithinVehicle,
    CheckIn,
    CheckOut,
    ParkAndRide,
    BikeAndRide,
    CarHire,
    BikeHire,
    Other,
}

impl TransferType {
    /// Parse a wire value. Unlike modes this enumeration is closed.
    pub fn from_wire(s: &str) -> Option<Self> {
        Some(match s {
            "walk" => TransferType::Walk,
            "shuttle" => TransferType::Shuttle,
            "taxi" => TransferType::Taxi,
            "protectedConnection" => TransferType::ProtectedConnection,
            "guaranteedConnection" => TransferType::GuaranteedConnection,
            "remainInVehicle" => TransferType::RemainInVehicle,
            "changeWithinVehicle" => TransferType::ChangeWithinVehicle,
            "checkIn" => TransferType::CheckIn,
            "checkOut" => TransferType::CheckOut,
            "parkAndRide" => TransferType::ParkAndRide,
            "bikeAndRide" => TransferType::BikeAndRide,
            "carHire" => TransferType::CarHire,
            "bikeHire" => TransferType::BikeHire,
            "other" => TransferType::Other,
            _ => return None,
        })
    }

    /// The wire value of this transfer type.
    pub fn as_wire(&self) -> &'static str {
        match self {
            TransferType::Walk => "walk",
            TransferType::Shuttle => "shuttle",
            TransferType::Taxi => "taxi",
            TransferType::ProtectedConnection => "protectedConnection",
            TransferType::GuaranteedConnection => "guaranteedConnection",
            TransferType::RemainInVehicle => "remainInVehicle",
            TransferType::ChangeWithinVehicle => "changeWithinVehicle",
            TransferType::CheckIn => "checkIn",
            TransferType::CheckOut => "checkOut",
            TransferType::ParkAndRide => "parkAndRide",
            TransferType::BikeAndRide => "bikeAndRide",
            TransferType::CarHire => "carHire",
            TransferType::BikeHire => "bikeHire",
            TransferType::Other => "other",
        }
    }
}

/// A change between two places, usually on foot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferLeg {
    pub transfer_types: Vec<TransferType>,
    pub leg_start: PlaceRefChoice,
    pub leg_end: PlaceRefChoice,
    #[serde(serialize_with = "super::duration::serialize")]
    pub duration: Duration,
}

/// Placeholder for continuous legs, whose content is not modelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContinuousLeg;

/// The kind of a leg. Exactly one is present on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LegType {
    Continuous(ContinuousLeg),
    Timed(TimedLeg),
    Transfer(TransferLeg),
}

/// One leg of a trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    pub id: u32,
    #[serde(serialize_with = "super::duration::serialize_opt")]
    pub duration: Option<Duration>,
    pub leg_type: LegType,
}

impl Leg {
    /// The timed leg, if this is one.
    pub fn as_timed(&self) -> Option<&TimedLeg> {
        match &self.leg_type {
            LegType::Timed(timed) => Some(timed),
            _ => None,
        }
    }

    /// The transfer leg, if this is one.
    pub fn as_transfer(&self) -> Option<&TransferLeg> {
        match &self.leg_type {
            LegType::Transfer(transfer) => Some(transfer),
            _ => None,
        }
    }

    /// Name of the place the leg starts at. Unknown for continuous legs.
    pub fn start_name(&self) -> Option<&str> {
        match &self.leg_type {
            LegType::Continuous(_) => None,
            LegType::Timed(timed) => Some(&timed.leg_board.stop.stop_point_name.text),
            LegType::Transfer(transfer) => Some(transfer.leg_start.title()),
        }
    }

    /// Name of the place the leg ends at. Unknown for continuous legs.
    pub fn end_name(&self) -> Option<&str> {
        match &self.leg_type {
            LegType::Continuous(_) => None,
            LegType::Timed(timed) => Some(&timed.leg_alight.stop.stop_point_name.text),
            LegType::Transfer(transfer) => Some(transfer.leg_end.title()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_type_wire_values() {
        let all = [
            TransferType::Walk,
            TransferType::Shuttle,
            TransferType::Taxi,
            TransferType::ProtectedConnection,
            TransferType::GuaranteedConnection,
            TransferType::RemainInVehicle,
            TransferType::ChangeWithinVehicle,
            TransferType::CheckIn,
            TransferType::CheckOut,
            TransferType::ParkAndRide,
            TransferType::BikeAndRide,
            TransferType::CarHire,
            TransferType::BikeHire,
            TransferType::Other,
        ];
        for t in all {
            assert_eq!(TransferType::from_wire(t.as_wire()), Some(t));
        }
        assert_eq!(TransferType::from_wire("teleport"), None);
    }

    #[test]
    fn transfer_leg_names() {
        let leg = Leg {
            id: 2,
            duration: Some(Duration::minutes(5)),
            leg_type: LegType::Transfer(TransferLeg {
                transfer_types: vec![TransferType::Walk],
                leg_start: PlaceRefChoice::stop_point("a", "Bern, Gleis 5"),
                leg_end: PlaceRefChoice::stop_point("b", "Bern, Gleis 7"),
                duration: Duration::minutes(5),
            }),
        };
        assert_eq!(leg.start_name(), Some("Bern, Gleis 5"));
        assert_eq!(leg.end_name(), Some("Bern, Gleis 7"));
        assert!(leg.as_transfer().is_some());
        assert!(leg.as_timed().is_none());
    }

    #[test]
    fn continuous_leg_has_no_names() {
        let leg = Leg {
            id: 1,
            duration: None,
            leg_type: LegType::Continuous(ContinuousLeg),
        };
        assert_eq!(leg.start_name(), None);
        assert_eq!(leg.end_name(), None);
    }
}
