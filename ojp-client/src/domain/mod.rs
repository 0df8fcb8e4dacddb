//! Domain types for OJP journey planning.
//!
//! Everything here is produced by the decoders in [`crate::ojp`] and is
//! immutable afterwards, apart from the trip results of a
//! [`TripDelivery`], which the pagination cursor filters in place. Choice
//! groups of the wire format are sum types: a value holds exactly one
//! variant.

mod delivery;
pub(crate) mod duration;
mod fingerprint;
mod leg;
mod place;
mod place_ref;
mod service;
mod situation;
#[cfg(test)]
pub(crate) mod testing;
mod text;
mod trip;

pub use delivery::{
    DeliveryType, LocationInformationDelivery, ServiceDelivery, StopEventDelivery, TripDelivery,
    TripResponseContext,
};
pub use duration::{format_xs_duration, parse_xs_duration};
pub use fingerprint::{TripFingerprint, fingerprint};
pub use leg::{
    ContinuousLeg, Leg, LegAlight, LegBoard, LegIntermediate, LegTrack, LegType, ServiceTime,
    StopCallStatus, StopPoint, TimedLeg, TrackSection, TransferLeg, TransferType,
};
pub use place::{Address, Place, PlaceResult, PlaceType, StopPlace};
pub use place_ref::PlaceRefChoice;
pub use service::{Attribute, ConventionalModeOfOperation, ProductCategory, Service};
pub use situation::{PtSituation, RoadSituation, Situation, TextualContent, ValidityPeriod};
pub use text::{GeoPosition, InternationalText, Mode, PrivateCode, PtMode};
pub use trip::{Trip, TripFare, TripResult, TripSummary, TripType};

/// A point in time as written by the server, offset preserved.
pub type Timestamp = chrono::DateTime<chrono::FixedOffset>;
