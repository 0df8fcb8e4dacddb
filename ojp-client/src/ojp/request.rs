//! Request documents.
//!
//! Requests are small and fully determined by a handful of parameters, so
//! they are written directly with a `quick_xml` event writer rather than
//! through a serialisation model. Every request is wrapped as
//! `OJP > OJPRequest > siri:ServiceRequest > ...` with the OJP namespace as
//! default namespace and the SIRI namespace under the `siri` prefix.

use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::domain::{GeoPosition, PlaceRefChoice, PtMode, Timestamp};

use super::OjpError;

const OJP_NAMESPACE: &str = "http://www.vdv.de/ojp";
const SIRI_NAMESPACE: &str = "http://www.siri.org.uk/siri";
const OJP_VERSION: &str = "2.0";

/// The time a trip search is anchored at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepArrTime {
    /// Depart from the origin at or after this time.
    Departure(Timestamp),
    /// Arrive at the destination at or before this time.
    Arrival(Timestamp),
}

/// How many trips to ask for, relative to the anchor time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberOfResults {
    /// Trips before the anchor time.
    Before(u32),
    /// Trips after the anchor time.
    After(u32),
    /// At least this many trips around the anchor time.
    Minimum(u32),
}

impl Default for NumberOfResults {
    fn default() -> Self {
        NumberOfResults::Minimum(10)
    }
}

/// Restrict or exclude public transport modes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeAndModeOfOperationFilter {
    pub pt_modes: Vec<PtMode>,
    /// `true` to exclude the listed modes, `false` to allow only them.
    pub exclude: Option<bool>,
}

/// Trip search parameters.
///
/// Unset flags are omitted from the request, leaving the server default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripParams {
    pub number_of_results: NumberOfResults,
    pub include_track_sections: Option<bool>,
    pub include_leg_projection: Option<bool>,
    pub include_turn_description: Option<bool>,
    pub include_intermediate_stops: Option<bool>,
    pub include_all_restricted_lines: Option<bool>,
    pub mode_filter: Option<ModeAndModeOfOperationFilter>,
}

impl TripParams {
    /// Set the result window.
    pub fn with_number_of_results(mut self, n: NumberOfResults) -> Self {
        self.number_of_results = n;
        self
    }

    /// Ask for intermediate stops of timed legs.
    pub fn with_intermediate_stops(mut self, include: bool) -> Self {
        self.include_intermediate_stops = Some(include);
        self
    }

    /// Ask for leg geometry.
    pub fn with_track_sections(mut self, include: bool) -> Self {
        self.include_track_sections = Some(include);
        self.include_leg_projection = Some(include);
        self
    }

    /// Restrict the modes used.
    pub fn with_mode_filter(mut self, filter: ModeAndModeOfOperationFilter) -> Self {
        self.mode_filter = Some(filter);
        self
    }
}

/// A trip search from one place to another.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    pub from: PlaceRefChoice,
    pub to: PlaceRefChoice,
    pub via: Vec<PlaceRefChoice>,
    pub at: DepArrTime,
    pub params: TripParams,
}

impl TripRequest {
    pub fn new(from: PlaceRefChoice, to: PlaceRefChoice, at: DepArrTime) -> Self {
        Self {
            from,
            to,
            via: Vec::new(),
            at,
            params: TripParams::default(),
        }
    }

    pub fn with_via(mut self, via: impl IntoIterator<Item = PlaceRefChoice>) -> Self {
        self.via = via.into_iter().collect();
        self
    }

    pub fn with_params(mut self, params: TripParams) -> Self {
        self.params = params;
        self
    }
}

/// Kind of place a location lookup may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceTypeRestriction {
    Stop,
    Address,
}

impl PlaceTypeRestriction {
    fn as_wire(&self) -> &'static str {
        match self {
            PlaceTypeRestriction::Stop => "stop",
            PlaceTypeRestriction::Address => "address",
        }
    }
}

/// Restrictions of a location lookup (`PlaceParam`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceParam {
    pub types: Vec<PlaceTypeRestriction>,
    pub number_of_results: u32,
    pub include_pt_modes: bool,
}

impl PlaceParam {
    pub fn new(types: impl IntoIterator<Item = PlaceTypeRestriction>) -> Self {
        Self {
            types: types.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_number_of_results(mut self, n: u32) -> Self {
        self.number_of_results = n;
        self
    }
}

impl Default for PlaceParam {
    fn default() -> Self {
        Self {
            types: vec![PlaceTypeRestriction::Stop],
            number_of_results: 10,
            include_pt_modes: true,
        }
    }
}

/// A geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub upper_left: GeoPosition,
    pub lower_right: GeoPosition,
}

impl Rectangle {
    /// Build from the extremes of a bounding box.
    pub fn from_bbox(
        min_longitude: f64,
        min_latitude: f64,
        max_longitude: f64,
        max_latitude: f64,
    ) -> Self {
        Self {
            upper_left: GeoPosition::new(min_longitude, max_latitude),
            lower_right: GeoPosition::new(max_longitude, min_latitude),
        }
    }
}

/// What a location lookup searches by.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialInput {
    /// Free-text name search.
    Name(String),
    /// All places inside a rectangle.
    Rectangle(Rectangle),
}

/// Values that go into every request envelope.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub requestor_ref: &'a str,
    pub language: Option<&'a str>,
    pub timestamp: DateTime<Utc>,
}

/// Encode an `OJPLocationInformationRequest`.
pub fn encode_location_information_request(
    ctx: &RequestContext<'_>,
    input: &InitialInput,
    restrictions: &PlaceParam,
) -> Result<Vec<u8>, OjpError> {
    let mut w = XmlOut::new();
    w.envelope(ctx, |w| {
        w.open("OJPLocationInformationRequest")?;
        w.text("siri:RequestTimestamp", &format_time(&ctx.timestamp))?;

        w.open("InitialInput")?;
        match input {
            InitialInput::Name(name) => w.text("Name", name)?,
            InitialInput::Rectangle(rect) => {
                w.open("GeoRestriction")?;
                w.open("Rectangle")?;
                w.position("UpperLeft", &rect.upper_left)?;
                w.position("LowerRight", &rect.lower_right)?;
                w.close("Rectangle")?;
                w.close("GeoRestriction")?;
            }
        }
        w.close("InitialInput")?;

        w.open("Restrictions")?;
        for t in &restrictions.types {
            w.text("Type", t.as_wire())?;
        }
        w.text("NumberOfResults", &restrictions.number_of_results.to_string())?;
        w.text("IncludePtModes", bool_text(restrictions.include_pt_modes))?;
        w.close("Restrictions")?;

        w.close("OJPLocationInformationRequest")
    })?;
    Ok(w.finish())
}

/// Encode an `OJPTripRequest`.
pub fn encode_trip_request(
    ctx: &RequestContext<'_>,
    request: &TripRequest,
) -> Result<Vec<u8>, OjpError> {
    let mut w = XmlOut::new();
    w.envelope(ctx, |w| {
        w.open("OJPTripRequest")?;
        w.text("siri:RequestTimestamp", &format_time(&ctx.timestamp))?;

        let (departure, arrival) = match request.at {
            DepArrTime::Departure(t) => (Some(t), None),
            DepArrTime::Arrival(t) => (None, Some(t)),
        };
        w.place_context("Origin", &request.from, departure.as_ref())?;
        w.place_context("Destination", &request.to, arrival.as_ref())?;

        for via in &request.via {
            w.open("Via")?;
            w.place_ref("ViaPoint", via)?;
            w.close("Via")?;
        }

        w.trip_params(&request.params)?;
        w.close("OJPTripRequest")
    })?;
    Ok(w.finish())
}

fn format_time<Tz: chrono::TimeZone>(t: &DateTime<Tz>) -> String {
    t.with_timezone(&Utc).format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn bool_text(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

/// Thin wrapper over the event writer with OJP-shaped helpers.
struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), OjpError> {
        self.writer
            .write_event(event)
            .map_err(|e| OjpError::Encoding(e.to_string()))
    }

    fn open(&mut self, name: &str) -> Result<(), OjpError> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    fn close(&mut self, name: &str) -> Result<(), OjpError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn text(&mut self, name: &str, value: &str) -> Result<(), OjpError> {
        self.open(name)?;
        self.event(Event::Text(BytesText::new(value)))?;
        self.close(name)
    }

    fn envelope(
        &mut self,
        ctx: &RequestContext<'_>,
        body: impl FnOnce(&mut Self) -> Result<(), OjpError>,
    ) -> Result<(), OjpError> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let root = BytesStart::new("OJP").with_attributes([
            ("xmlns", OJP_NAMESPACE),
            ("xmlns:siri", SIRI_NAMESPACE),
            ("version", OJP_VERSION),
        ]);
        self.event(Event::Start(root))?;
        self.open("OJPRequest")?;
        self.open("siri:ServiceRequest")?;

        if let Some(language) = ctx.language {
            self.open("siri:ServiceRequestContext")?;
            self.text("siri:Language", language)?;
            self.close("siri:ServiceRequestContext")?;
        }
        self.text("siri:RequestTimestamp", &format_time(&ctx.timestamp))?;
        self.text("siri:RequestorRef", ctx.requestor_ref)?;

        body(self)?;

        self.close("siri:ServiceRequest")?;
        self.close("OJPRequest")?;
        self.close("OJP")
    }

    fn position(&mut self, name: &str, position: &GeoPosition) -> Result<(), OjpError> {
        self.open(name)?;
        self.text("siri:Longitude", &position.longitude.to_string())?;
        self.text("siri:Latitude", &position.latitude.to_string())?;
        self.close(name)
    }

    fn international_text(&mut self, name: &str, text: &str) -> Result<(), OjpError> {
        self.open(name)?;
        self.text("Text", text)?;
        self.close(name)
    }

    fn place_ref(&mut self, name: &str, place_ref: &PlaceRefChoice) -> Result<(), OjpError> {
        self.open(name)?;
        match place_ref {
            PlaceRefChoice::StopPlaceRef { stop_place_ref, .. } => {
                self.text("StopPlaceRef", stop_place_ref)?
            }
            PlaceRefChoice::StopPointRef { stop_point_ref, .. } => {
                self.text("siri:StopPointRef", stop_point_ref)?
            }
            PlaceRefChoice::GeoPosition { position, .. } => self.position("GeoPosition", position)?,
        }
        self.international_text("Name", place_ref.title())?;
        self.close(name)
    }

    fn place_context(
        &mut self,
        name: &str,
        place_ref: &PlaceRefChoice,
        at: Option<&Timestamp>,
    ) -> Result<(), OjpError> {
        self.open(name)?;
        self.place_ref("PlaceRef", place_ref)?;
        if let Some(at) = at {
            self.text("DepArrTime", &format_time(at))?;
        }
        self.close(name)
    }

    fn flag(&mut self, name: &str, value: Option<bool>) -> Result<(), OjpError> {
        match value {
            Some(b) => self.text(name, bool_text(b)),
            None => Ok(()),
        }
    }

    fn trip_params(&mut self, params: &TripParams) -> Result<(), OjpError> {
        self.open("Params")?;

        if let Some(filter) = &params.mode_filter {
            self.open("ModeAndModeOfOperationFilter")?;
            for mode in &filter.pt_modes {
                if let Some(wire) = mode.as_wire() {
                    self.text("PtMode", wire)?;
                }
            }
            self.flag("Exclude", filter.exclude)?;
            self.close("ModeAndModeOfOperationFilter")?;
        }

        match params.number_of_results {
            NumberOfResults::Before(n) => self.text("NumberOfResultsBefore", &n.to_string())?,
            NumberOfResults::After(n) => self.text("NumberOfResultsAfter", &n.to_string())?,
            NumberOfResults::Minimum(n) => self.text("NumberOfResults", &n.to_string())?,
        }

        self.flag("IncludeTrackSections", params.include_track_sections)?;
        self.flag("IncludeLegProjection", params.include_leg_projection)?;
        self.flag("IncludeTurnDescription", params.include_turn_description)?;
        self.flag("IncludeIntermediateStops", params.include_intermediate_stops)?;
        self.flag("IncludeAllRestrictedLines", params.include_all_restricted_lines)?;

        self.close("Params")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{Element, parse_document};
    use chrono::TimeZone;

    fn ctx() -> RequestContext<'static> {
        RequestContext {
            requestor_ref: "ojp-client-test",
            language: Some("de"),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 8, 55, 0).unwrap(),
        }
    }

    fn service_request(bytes: &[u8]) -> Element {
        let root = parse_document(bytes).unwrap();
        assert!(root.is("OJP"));
        assert_eq!(root.attribute("version"), Some("2.0"));
        root.required("OJPRequest")
            .unwrap()
            .required("ServiceRequest")
            .unwrap()
            .clone()
    }

    #[test]
    fn location_request_by_name() {
        let bytes = encode_location_information_request(
            &ctx(),
            &InitialInput::Name("Bern".into()),
            &PlaceParam::new([PlaceTypeRestriction::Stop, PlaceTypeRestriction::Address])
                .with_number_of_results(5),
        )
        .unwrap();

        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains(r#"xmlns="http://www.vdv.de/ojp""#));
        assert!(text.contains(r#"xmlns:siri="http://www.siri.org.uk/siri""#));

        let sr = service_request(&bytes);
        assert_eq!(sr.child_text("RequestorRef"), Some("ojp-client-test"));
        assert_eq!(sr.child_text("RequestTimestamp"), Some("2024-03-01T08:55:00Z"));
        assert_eq!(
            sr.child("ServiceRequestContext").and_then(|c| c.child_text("Language")),
            Some("de")
        );

        let lir = sr.required("OJPLocationInformationRequest").unwrap();
        assert_eq!(
            lir.required("InitialInput").unwrap().child_text("Name"),
            Some("Bern")
        );
        let restrictions = lir.required("Restrictions").unwrap();
        let types: Vec<_> = restrictions.children_named("Type").map(Element::text).collect();
        assert_eq!(types, vec!["stop", "address"]);
        assert_eq!(restrictions.child_text("NumberOfResults"), Some("5"));
        assert_eq!(restrictions.child_text("IncludePtModes"), Some("true"));
    }

    #[test]
    fn location_request_escapes_name() {
        let bytes = encode_location_information_request(
            &ctx(),
            &InitialInput::Name("Bahnhof <Süd> & Co".into()),
            &PlaceParam::default(),
        )
        .unwrap();
        let sr = service_request(&bytes);
        let name = sr
            .required("OJPLocationInformationRequest")
            .and_then(|l| l.required("InitialInput"))
            .unwrap()
            .child_text("Name");
        assert_eq!(name, Some("Bahnhof <Süd> & Co"));
    }

    #[test]
    fn location_request_by_rectangle() {
        let rect = Rectangle::from_bbox(7.372097, 46.904860, 7.479042, 46.942787);
        let bytes = encode_location_information_request(
            &ctx(),
            &InitialInput::Rectangle(rect),
            &PlaceParam::default(),
        )
        .unwrap();
        let sr = service_request(&bytes);
        let rectangle = sr
            .required("OJPLocationInformationRequest")
            .and_then(|l| l.required("InitialInput"))
            .and_then(|i| i.required("GeoRestriction"))
            .and_then(|g| g.required("Rectangle"))
            .unwrap();
        let upper_left = rectangle.required("UpperLeft").unwrap();
        assert_eq!(upper_left.child_text("Longitude"), Some("7.372097"));
        assert_eq!(upper_left.child_text("Latitude"), Some("46.942787"));
    }

    #[test]
    fn trip_request_shape() {
        let departure = chrono::DateTime::parse_from_rfc3339("2024-03-01T10:00:00+01:00").unwrap();
        let request = TripRequest::new(
            PlaceRefChoice::stop_place("8507000", "Bern"),
            PlaceRefChoice::stop_place("8507100", "Thun"),
            DepArrTime::Departure(departure),
        )
        .with_via([PlaceRefChoice::stop_point("ch:1:sloid:8206", "Münsingen")])
        .with_params(
            TripParams::default()
                .with_number_of_results(NumberOfResults::After(5))
                .with_intermediate_stops(true)
                .with_mode_filter(ModeAndModeOfOperationFilter {
                    pt_modes: vec![PtMode::Rail, PtMode::Bus, PtMode::Underground],
                    exclude: Some(false),
                }),
        );

        let bytes = encode_trip_request(&ctx(), &request).unwrap();
        let sr = service_request(&bytes);
        let tr = sr.required("OJPTripRequest").unwrap();

        let origin = tr.required("Origin").unwrap();
        assert_eq!(
            origin.required("PlaceRef").unwrap().child_text("StopPlaceRef"),
            Some("8507000")
        );
        assert_eq!(origin.child_text("DepArrTime"), Some("2024-03-01T09:00:00Z"));
        assert!(tr.required("Destination").unwrap().child("DepArrTime").is_none());

        let via = tr.required("Via").and_then(|v| v.required("ViaPoint")).unwrap();
        assert_eq!(via.child_text("StopPointRef"), Some("ch:1:sloid:8206"));

        let params = tr.required("Params").unwrap();
        assert_eq!(params.child_text("NumberOfResultsAfter"), Some("5"));
        assert!(params.child("NumberOfResults").is_none());
        assert_eq!(params.child_text("IncludeIntermediateStops"), Some("true"));
        assert!(params.child("IncludeTrackSections").is_none());

        let filter = params.required("ModeAndModeOfOperationFilter").unwrap();
        let modes: Vec<_> = filter.children_named("PtMode").map(Element::text).collect();
        assert_eq!(modes, vec!["rail", "bus", "underground"]);
        assert_eq!(filter.child_text("Exclude"), Some("false"));
    }

    #[test]
    fn track_sections_ask_for_projection_too() {
        let departure = chrono::DateTime::parse_from_rfc3339("2024-03-01T10:00:00+01:00").unwrap();
        let request = TripRequest::new(
            PlaceRefChoice::stop_place("8507000", "Bern"),
            PlaceRefChoice::stop_place("8507100", "Thun"),
            DepArrTime::Departure(departure),
        )
        .with_params(TripParams::default().with_track_sections(true));

        let bytes = encode_trip_request(&ctx(), &request).unwrap();
        let sr = service_request(&bytes);
        let params = sr
            .required("OJPTripRequest")
            .and_then(|tr| tr.required("Params"))
            .unwrap();
        assert_eq!(params.child_text("IncludeTrackSections"), Some("true"));
        assert_eq!(params.child_text("IncludeLegProjection"), Some("true"));
        assert!(params.child("IncludeIntermediateStops").is_none());

        let off = TripParams::default().with_track_sections(false);
        assert_eq!(off.include_track_sections, Some(false));
        assert_eq!(off.include_leg_projection, Some(false));
    }

    #[test]
    fn arrival_time_goes_on_destination() {
        let arrival = chrono::DateTime::parse_from_rfc3339("2024-03-01T18:00:00+01:00").unwrap();
        let request = TripRequest::new(
            PlaceRefChoice::position(GeoPosition::new(7.44, 46.95), "Home"),
            PlaceRefChoice::stop_place("8507100", "Thun"),
            DepArrTime::Arrival(arrival),
        );
        let bytes = encode_trip_request(&ctx(), &request).unwrap();
        let tr = service_request(&bytes).required("OJPTripRequest").unwrap().clone();

        let origin = tr.required("Origin").unwrap();
        assert!(origin.child("DepArrTime").is_none());
        let position = origin
            .required("PlaceRef")
            .and_then(|p| p.required("GeoPosition"))
            .unwrap();
        assert_eq!(position.child_text("Longitude"), Some("7.44"));

        let destination = tr.required("Destination").unwrap();
        assert_eq!(destination.child_text("DepArrTime"), Some("2024-03-01T17:00:00Z"));
        assert_eq!(
            tr.required("Params").unwrap().child_text("NumberOfResults"),
            Some("10")
        );
    }
}
