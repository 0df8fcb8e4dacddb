//! Trips and trip results.

use chrono::Duration;
use serde::Serialize;

use super::{Leg, Timestamp, TripFingerprint, fingerprint};

/// A trip from origin to destination.
///
/// Legs are non-empty and kept in wire order, and `start_time` is never
/// after `end_time`; both are checked when decoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    pub id: String,
    #[serde(serialize_with = "super::duration::serialize")]
    pub duration: Duration,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub transfers: u32,
    /// Distance in metres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    pub legs: Vec<Leg>,
}

impl Trip {
    /// Name of the first place the trip reaches a known name for.
    ///
    /// Continuous legs carry no names, so a trip that starts with a walk is
    /// named after the first timed or transfer leg.
    pub fn origin_name(&self) -> Option<&str> {
        self.legs.iter().find_map(Leg::start_name)
    }

    /// Name of the last known place of the trip.
    pub fn destination_name(&self) -> Option<&str> {
        self.legs.iter().rev().find_map(Leg::end_name)
    }

    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Content fingerprint used to recognise the same trip across pages.
    pub fn fingerprint(&self) -> TripFingerprint {
        fingerprint(self)
    }
}

/// A condensed trip. Its content is not modelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TripSummary;

/// A fare attached to a trip result. Its content is not modelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TripFare;

/// Either a full trip or a summary. Exactly one is present on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TripType {
    Trip(Trip),
    TripSummary(TripSummary),
}

/// One result of a trip request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripResult {
    pub id: String,
    pub trip_type: TripType,
    pub trip_fares: Vec<TripFare>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_alternative_option: Option<bool>,
}

impl TripResult {
    /// The full trip, or `None` for a summary.
    pub fn trip(&self) -> Option<&Trip> {
        match &self.trip_type {
            TripType::Trip(trip) => Some(trip),
            TripType::TripSummary(_) => None,
        }
    }
}
