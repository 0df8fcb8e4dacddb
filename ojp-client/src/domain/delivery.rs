//! Top-level response payloads.

use serde::Serialize;

use super::{PlaceResult, Situation, TripResult};

/// Answer to a location information request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationInformationDelivery {
    pub response_timestamp: String,
    pub request_message_ref: Option<String>,
    pub default_language: Option<String>,
    /// Server-side calculation time in milliseconds.
    pub calc_time: Option<u64>,
    pub place_results: Vec<PlaceResult>,
}

/// Situations relevant to the trips of a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TripResponseContext {
    pub situations: Vec<Situation>,
}

/// Answer to a trip request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripDelivery {
    pub response_timestamp: String,
    pub request_message_ref: String,
    pub calc_time: Option<u64>,
    pub trip_response_context: Option<TripResponseContext>,
    pub trip_results: Vec<TripResult>,
}

/// Answer to a stop event request. Its content is not modelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StopEventDelivery;

/// The payload of a service delivery. Exactly one is present on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryType {
    LocationInformation(LocationInformationDelivery),
    Trip(TripDelivery),
    StopEvent(StopEventDelivery),
}

/// `siri:ServiceDelivery`, the body of every OJP response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceDelivery {
    pub response_timestamp: String,
    pub producer_ref: Option<String>,
    pub delivery: DeliveryType,
}

impl DeliveryType {
    /// Wire name of the payload, for logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            DeliveryType::LocationInformation(_) => "OJPLocationInformationDelivery",
            DeliveryType::Trip(_) => "OJPTripDelivery",
            DeliveryType::StopEvent(_) => "OJPStopEventDelivery",
        }
    }
}

impl ServiceDelivery {
    pub fn kind(&self) -> &'static str {
        self.delivery.kind()
    }
}
