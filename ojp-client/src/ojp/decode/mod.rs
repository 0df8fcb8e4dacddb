//! Decoding of OJP response documents into domain types.
//!
//! Each wire type gets a [`FromXml`] impl. All element lookups go through
//! [`Element`], which compares local names only, so the same decoders read
//! documents with no namespace prefixes, a default namespace, or explicit
//! `siri:`/`ojp:` prefixes on every element.

mod delivery;
mod place;
mod trip;

use chrono::{DateTime, NaiveDateTime};
use tracing::trace;

use crate::domain::{
    GeoPosition, InternationalText, Mode, PlaceRefChoice, PtMode, ServiceDelivery, Timestamp,
    parse_xs_duration,
};
use crate::xml::{Choice, DecodeError, Element, FromXml, parse_document};

/// Decode a complete OJP response (`OJP > OJPResponse > ServiceDelivery`).
///
/// # Examples
///
/// ```
/// use ojp_client::ojp::decode;
///
/// let err = decode(b"I'm not a valid xml").unwrap_err();
/// assert!(!err.is_schema_mismatch());
/// ```
pub fn decode(bytes: &[u8]) -> Result<ServiceDelivery, DecodeError> {
    let root = parse_document(bytes)?;
    if !root.is("OJP") {
        return Err(DecodeError::MissingElement {
            parent: root.name().to_string(),
            element: "OJP",
        });
    }
    let delivery = root.required("OJPResponse")?.required("ServiceDelivery")?;
    let decoded = ServiceDelivery::from_xml(delivery)?;
    trace!(kind = decoded.kind(), "decoded service delivery");
    Ok(decoded)
}

/// Parse an `xs:dateTime`.
///
/// Values without an offset are read as UTC.
pub(crate) fn parse_timestamp(s: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(s).ok().or_else(|| {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc().fixed_offset())
    })
}

pub(crate) fn required_time(el: &Element, tag: &'static str) -> Result<Timestamp, DecodeError> {
    el.parse_required_with(tag, parse_timestamp)
}

pub(crate) fn optional_time(
    el: &Element,
    tag: &'static str,
) -> Result<Option<Timestamp>, DecodeError> {
    el.parse_child_with(tag, parse_timestamp)
}

pub(crate) fn required_duration(
    el: &Element,
    tag: &'static str,
) -> Result<chrono::Duration, DecodeError> {
    el.parse_required_with(tag, parse_xs_duration)
}

pub(crate) fn optional_duration(
    el: &Element,
    tag: &'static str,
) -> Result<Option<chrono::Duration>, DecodeError> {
    el.parse_child_with(tag, parse_xs_duration)
}

pub(crate) fn optional_string(el: &Element, tag: &str) -> Option<String> {
    el.child_text(tag).map(str::to_string)
}

pub(crate) fn required_string(el: &Element, tag: &'static str) -> Result<String, DecodeError> {
    el.required_text(tag).map(str::to_string)
}

/// Names are normally wrapped (`<Name><Text xml:lang="de">Bern</Text></Name>`)
/// but some producers put the text directly in the element.
impl FromXml for InternationalText {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        let source = element.child("Text").unwrap_or(element);
        Ok(InternationalText {
            text: source.text().to_string(),
            lang: source.attribute("lang").map(str::to_string),
        })
    }
}

impl FromXml for GeoPosition {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(GeoPosition {
            longitude: element.parse_required("Longitude")?,
            latitude: element.parse_required("Latitude")?,
        })
    }
}

impl FromXml for Mode {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(Mode {
            pt_mode: PtMode::from_wire(element.required_text("PtMode")?),
            bus_submode: optional_string(element, "BusSubmode"),
            rail_submode: optional_string(element, "RailSubmode"),
            name: element.decode_child("Name")?,
            short_name: element.decode_child("ShortName")?,
        })
    }
}

/// `element` is the container of the reference group, e.g. `LegStart`.
impl FromXml for PlaceRefChoice {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        let name = || element.decode_required::<InternationalText>("Name");
        Choice::new(element, "PlaceRefChoice")
            .variant("StopPlaceRef", |el| {
                Ok(PlaceRefChoice::StopPlaceRef {
                    stop_place_ref: el.text().to_string(),
                    name: name()?,
                })
            })
            .variant("StopPointRef", |el| {
                Ok(PlaceRefChoice::StopPointRef {
                    stop_point_ref: el.text().to_string(),
                    name: name()?,
                })
            })
            .variant("GeoPosition", |el| {
                Ok(PlaceRefChoice::GeoPosition {
                    position: GeoPosition::from_xml(el)?,
                    name: name()?,
                })
            })
            .finish()
    }
}
