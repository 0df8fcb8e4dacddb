//! Places returned by location information requests.

use serde::Serialize;

use super::{GeoPosition, InternationalText, Mode, PlaceRefChoice, PrivateCode};

/// A stop place (station) as returned by a location lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopPlace {
    pub stop_place_ref: String,
    pub stop_place_name: InternationalText,
    pub private_codes: Vec<PrivateCode>,
    /// Topographic place the stop belongs to (`TopographicPlaceRef`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_ref: Option<String>,
}

/// A postal address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    pub public_code: String,
    pub name: InternationalText,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub topographic_place_name: Option<String>,
    pub topographic_place_ref: Option<String>,
    pub post_code: Option<String>,
    pub country_name: Option<String>,
    pub cross_road: Option<String>,
}

/// The kind of a place. Exactly one is present on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaceType {
    StopPlace(StopPlace),
    Address(Address),
}

impl PlaceType {
    /// Stable identifier: the stop place ref or the address public code.
    pub fn id(&self) -> &str {
        match self {
            PlaceType::StopPlace(stop) => &stop.stop_place_ref,
            PlaceType::Address(address) => &address.public_code,
        }
    }
}

/// A place with its display name, position and served modes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub place_type: PlaceType,
    pub name: InternationalText,
    pub geo_position: Option<GeoPosition>,
    pub modes: Vec<Mode>,
}

/// One hit of a location information request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceResult {
    pub place: Place,
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f32>,
}

impl PlaceResult {
    /// Identity of the underlying place.
    pub fn id(&self) -> &str {
        self.place.place_type.id()
    }

    /// Name to show for this result.
    ///
    /// Stop places use their stop place name, addresses their address name.
    pub fn title(&self) -> &str {
        match &self.place.place_type {
            PlaceType::StopPlace(stop) => &stop.stop_place_name.text,
            PlaceType::Address(address) => &address.name.text,
        }
    }

    /// A reference suitable for use as trip origin, destination or via.
    ///
    /// Stop places are referenced by id. Addresses have no id a trip request
    /// accepts, so they are referenced by position; an address without a
    /// position yields `None`.
    pub fn place_ref(&self) -> Option<PlaceRefChoice> {
        match &self.place.place_type {
            PlaceType::StopPlace(stop) => Some(PlaceRefChoice::StopPlaceRef {
                stop_place_ref: stop.stop_place_ref.clone(),
                name: stop.stop_place_name.clone(),
            }),
            PlaceType::Address(address) => {
                self.place
                    .geo_position
                    .map(|position| PlaceRefChoice::GeoPosition {
                        position,
                        name: address.name.clone(),
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop_result() -> PlaceResult {
        PlaceResult {
            place: Place {
                place_type: PlaceType::StopPlace(StopPlace {
                    stop_place_ref: "8507000".into(),
                    stop_place_name: InternationalText::new("Bern"),
                    private_codes: vec![],
                    parent_ref: None,
                }),
                name: InternationalText::new("Bern (Bern)"),
                geo_position: Some(GeoPosition::new(7.43913, 46.94883)),
                modes: vec![],
            },
            complete: true,
            probability: Some(1.0),
        }
    }

    fn address_result(position: Option<GeoPosition>) -> PlaceResult {
        PlaceResult {
            place: Place {
                place_type: PlaceType::Address(Address {
                    public_code: "address-1".into(),
                    name: InternationalText::new("Route des Russilles 48"),
                    street: Some("Route des Russilles".into()),
                    house_number: Some("48".into()),
                    topographic_place_name: Some("Le Mouret".into()),
                    topographic_place_ref: None,
                    post_code: None,
                    country_name: None,
                    cross_road: None,
                }),
                name: InternationalText::new("Le Mouret, Route des Russilles 48"),
                geo_position: position,
                modes: vec![],
            },
            complete: true,
            probability: None,
        }
    }

    #[test]
    fn identity_follows_variant() {
        assert_eq!(stop_result().id(), "8507000");
        assert_eq!(address_result(None).id(), "address-1");
    }

    #[test]
    fn title_uses_variant_name() {
        assert_eq!(stop_result().title(), "Bern");
        assert_eq!(address_result(None).title(), "Route des Russilles 48");
    }

    #[test]
    fn stop_place_becomes_stop_place_ref() {
        let place_ref = stop_result().place_ref().unwrap();
        assert_eq!(place_ref, PlaceRefChoice::stop_place("8507000", ""));
        assert_eq!(place_ref.title(), "Bern");
    }

    #[test]
    fn address_becomes_position_ref() {
        let position = GeoPosition::new(7.1, 46.7);
        let place_ref = address_result(Some(position)).place_ref().unwrap();
        assert_eq!(place_ref, PlaceRefChoice::position(position, ""));
        assert!(address_result(None).place_ref().is_none());
    }
}
