use crate::domain::{Address, Place, PlaceResult, PlaceType, PrivateCode, StopPlace};
use crate::xml::{Choice, DecodeError, Element, FromXml};

use super::{optional_string, required_string};

impl FromXml for PrivateCode {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(PrivateCode {
            system: required_string(element, "System")?,
            value: required_string(element, "Value")?,
        })
    }
}

impl FromXml for StopPlace {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(StopPlace {
            stop_place_ref: required_string(element, "StopPlaceRef")?,
            stop_place_name: element.decode_required("StopPlaceName")?,
            private_codes: element.decode_all("PrivateCode")?,
            parent_ref: optional_string(element, "TopographicPlaceRef"),
        })
    }
}

impl FromXml for Address {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(Address {
            public_code: required_string(element, "PublicCode")?,
            name: element.decode_required("Name")?,
            street: optional_string(element, "Street"),
            house_number: optional_string(element, "HouseNumber"),
            topographic_place_name: optional_string(element, "TopographicPlaceName"),
            topographic_place_ref: optional_string(element, "TopographicPlaceRef"),
            post_code: optional_string(element, "PostCode"),
            country_name: optional_string(element, "CountryName"),
            cross_road: optional_string(element, "CrossRoad"),
        })
    }
}

impl FromXml for Place {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        let place_type = Choice::new(element, "PlaceTypeChoice")
            .variant("StopPlace", |el| StopPlace::from_xml(el).map(PlaceType::StopPlace))
            .variant("Address", |el| Address::from_xml(el).map(PlaceType::Address))
            .finish()?;

        Ok(Place {
            place_type,
            name: element.decode_required("Name")?,
            geo_position: element.decode_child("GeoPosition")?,
            modes: element.decode_all("Mode")?,
        })
    }
}

impl FromXml for PlaceResult {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        let complete = element
            .flag("Complete")?
            .ok_or_else(|| DecodeError::MissingElement {
                parent: element.name().to_string(),
                element: "Complete",
            })?;

        Ok(PlaceResult {
            place: element.decode_required("Place")?,
            complete,
            probability: element.parse_child("Probability")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeoPosition, PtMode};
    use crate::xml::parse_document;

    const STOP_RESULT: &[u8] = br#"<PlaceResult>
        <Place>
            <StopPlace>
                <StopPlaceRef>8507000</StopPlaceRef>
                <StopPlaceName><Text xml:lang="de">Bern</Text></StopPlaceName>
                <PrivateCode><System>EFA</System><Value>8507000</Value></PrivateCode>
                <TopographicPlaceRef>23006351:1</TopographicPlaceRef>
            </StopPlace>
            <Name><Text xml:lang="de">Bern (Bern)</Text></Name>
            <GeoPosition>
                <siri:Longitude>7.452178</siri:Longitude>
                <siri:Latitude>46.948474</siri:Latitude>
            </GeoPosition>
            <Mode><PtMode>rail</PtMode><siri:RailSubmode>interregionalRail</siri:RailSubmode></Mode>
            <Mode><PtMode>bus</PtMode></Mode>
        </Place>
        <Complete>true</Complete>
        <Probability>0.95</Probability>
    </PlaceResult>"#;

    #[test]
    fn decodes_stop_place_result() {
        let result = PlaceResult::from_xml(&parse_document(STOP_RESULT).unwrap()).unwrap();

        assert_eq!(result.id(), "8507000");
        assert_eq!(result.title(), "Bern");
        assert_eq!(result.place.name.text, "Bern (Bern)");
        assert_eq!(
            result.place.geo_position,
            Some(GeoPosition::new(7.452178, 46.948474))
        );
        assert!(result.complete);
        assert_eq!(result.probability, Some(0.95));

        let PlaceType::StopPlace(stop) = &result.place.place_type else {
            panic!("expected a stop place");
        };
        assert_eq!(stop.parent_ref.as_deref(), Some("23006351:1"));
        assert_eq!(stop.private_codes[0].system, "EFA");

        let modes: Vec<_> = result.place.modes.iter().map(|m| m.pt_mode).collect();
        assert_eq!(modes, vec![PtMode::Rail, PtMode::Bus]);
        assert_eq!(
            result.place.modes[0].rail_submode.as_deref(),
            Some("interregionalRail")
        );
    }

    #[test]
    fn decodes_address() {
        let xml = br#"<Place>
            <Address>
                <PublicCode>address-1234</PublicCode>
                <Name><Text>Le Mouret, Route des Russilles 48</Text></Name>
                <Street>Route des Russilles</Street>
                <HouseNumber>48</HouseNumber>
                <TopographicPlaceName>Le Mouret</TopographicPlaceName>
                <PostCode>1724</PostCode>
                <CountryName>Switzerland</CountryName>
            </Address>
            <Name><Text>Le Mouret, Route des Russilles 48</Text></Name>
            <GeoPosition><Longitude>7.18</Longitude><Latitude>46.75</Latitude></GeoPosition>
        </Place>"#;

        let place = Place::from_xml(&parse_document(xml).unwrap()).unwrap();
        let PlaceType::Address(address) = &place.place_type else {
            panic!("expected an address");
        };
        assert_eq!(address.house_number.as_deref(), Some("48"));
        assert_eq!(address.topographic_place_name.as_deref(), Some("Le Mouret"));
        assert_eq!(address.street.as_deref(), Some("Route des Russilles"));
        assert_eq!(address.cross_road, None);
        assert!(place.modes.is_empty());
    }

    #[test]
    fn unknown_place_kind_is_schema_mismatch() {
        let xml = b"<Place><PointOfInterest/><Name><Text>Zoo</Text></Name></Place>";
        let err = Place::from_xml(&parse_document(xml).unwrap()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::SchemaMismatch {
                context: "PlaceTypeChoice"
            }
        );
    }

    #[test]
    fn missing_complete_is_an_error() {
        let xml = br#"<PlaceResult><Place><StopPlace>
            <StopPlaceRef>1</StopPlaceRef><StopPlaceName><Text>A</Text></StopPlaceName>
            </StopPlace><Name><Text>A</Text></Name></Place></PlaceResult>"#;
        let err = PlaceResult::from_xml(&parse_document(xml).unwrap()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MissingElement {
                element: "Complete",
                ..
            }
        ));
    }
}
