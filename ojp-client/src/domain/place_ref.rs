//! References to places, as used in requests and leg endpoints.

use std::hash::{Hash, Hasher};

use serde::Serialize;

use super::{GeoPosition, InternationalText};

/// A reference to a place (`PlaceRefGroup`).
///
/// Equality and hashing use only the identity of the reference (the stop
/// place ref, the stop point ref, or the coordinates); display names are
/// ignored.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaceRefChoice {
    StopPlaceRef {
        #[serde(rename = "ref")]
        stop_place_ref: String,
        name: InternationalText,
    },
    StopPointRef {
        #[serde(rename = "ref")]
        stop_point_ref: String,
        name: InternationalText,
    },
    GeoPosition {
        position: GeoPosition,
        name: InternationalText,
    },
}

impl PlaceRefChoice {
    /// Reference a stop place by id.
    pub fn stop_place(stop_place_ref: impl Into<String>, name: impl Into<String>) -> Self {
        PlaceRefChoice::StopPlaceRef {
            stop_place_ref: stop_place_ref.into(),
            name: InternationalText::new(name),
        }
    }

    /// Reference a stop point (platform, quay) by id.
    pub fn stop_point(stop_point_ref: impl Into<String>, name: impl Into<String>) -> Self {
        PlaceRefChoice::StopPointRef {
            stop_point_ref: stop_point_ref.into(),
            name: InternationalText::new(name),
        }
    }

    /// Reference an arbitrary coordinate.
    pub fn position(position: GeoPosition, name: impl Into<String>) -> Self {
        PlaceRefChoice::GeoPosition {
            position,
            name: InternationalText::new(name),
        }
    }

    /// Display name of the referenced place.
    pub fn title(&self) -> &str {
        match self {
            PlaceRefChoice::StopPlaceRef { name, .. }
            | PlaceRefChoice::StopPointRef { name, .. }
            | PlaceRefChoice::GeoPosition { name, .. } => &name.text,
        }
    }
}

impl PartialEq for PlaceRefChoice {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                PlaceRefChoice::StopPlaceRef {
                    stop_place_ref: a, ..
                },
                PlaceRefChoice::StopPlaceRef {
                    stop_place_ref: b, ..
                },
            ) => a == b,
            (
                PlaceRefChoice::StopPointRef {
                    stop_point_ref: a, ..
                },
                PlaceRefChoice::StopPointRef {
                    stop_point_ref: b, ..
                },
            ) => a == b,
            (
                PlaceRefChoice::GeoPosition { position: a, .. },
                PlaceRefChoice::GeoPosition { position: b, .. },
            ) => {
                a.latitude.to_bits() == b.latitude.to_bits()
                    && a.longitude.to_bits() == b.longitude.to_bits()
            }
            _ => false,
        }
    }
}

impl Eq for PlaceRefChoice {}

impl Hash for PlaceRefChoice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            PlaceRefChoice::StopPlaceRef { stop_place_ref, .. } => stop_place_ref.hash(state),
            PlaceRefChoice::StopPointRef { stop_point_ref, .. } => stop_point_ref.hash(state),
            PlaceRefChoice::GeoPosition { position, .. } => {
                position.latitude.to_bits().hash(state);
                position.longitude.to_bits().hash(state);
            }
        }
    }
}
