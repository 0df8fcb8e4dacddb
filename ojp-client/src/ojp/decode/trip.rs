use tracing::debug;

use crate::domain::{
    Attribute, ConventionalModeOfOperation, ContinuousLeg, GeoPosition, Leg, LegAlight, LegBoard,
    LegIntermediate, LegTrack, LegType, ProductCategory, Service, ServiceTime, StopCallStatus,
    StopPoint, TimedLeg, TrackSection, TransferLeg, TransferType, Trip, TripFare, TripResult,
    TripSummary, TripType,
};
use crate::xml::{Choice, DecodeError, Element, FromXml};

use super::{
    optional_duration, optional_string, optional_time, required_duration, required_string,
    required_time,
};

impl FromXml for ProductCategory {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(ProductCategory {
            name: element.decode_child("Name")?,
            short_name: element.decode_child("ShortName")?,
            product_category_ref: optional_string(element, "ProductCategoryRef"),
        })
    }
}

impl FromXml for Attribute {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(Attribute {
            user_text: element.decode_required("UserText")?,
            code: required_string(element, "Code")?,
        })
    }
}

impl FromXml for Service {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(Service {
            conventional_mode_of_operation: element
                .child_text("ConventionalModeOfOperation")
                .map(ConventionalModeOfOperation::from_wire),
            operating_day_ref: required_string(element, "OperatingDayRef")?,
            journey_ref: required_string(element, "JourneyRef")?,
            public_code: optional_string(element, "PublicCode"),
            line_ref: required_string(element, "LineRef")?,
            direction_ref: optional_string(element, "DirectionRef"),
            mode: element.decode_required("Mode")?,
            product_category: element.decode_child("ProductCategory")?,
            published_service_name: element.decode_required("PublishedServiceName")?,
            train_number: optional_string(element, "TrainNumber"),
            vehicle_ref: optional_string(element, "VehicleRef"),
            attributes: element.decode_all("Attribute")?,
            operator_ref: optional_string(element, "OperatorRef"),
            origin_text: element.decode_child("OriginText")?,
            origin_stop_point_ref: optional_string(element, "OriginStopPointRef"),
            destination_text: element.decode_child("DestinationText")?,
            destination_stop_point_ref: optional_string(element, "DestinationStopPointRef"),
        })
    }
}

impl FromXml for ServiceTime {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(ServiceTime {
            timetabled_time: required_time(element, "TimetabledTime")?,
            estimated_time: optional_time(element, "EstimatedTime")?,
        })
    }
}

impl FromXml for StopPoint {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(StopPoint {
            stop_point_ref: required_string(element, "StopPointRef")?,
            stop_point_name: element.decode_required("StopPointName")?,
            name_suffix: element.decode_child("NameSuffix")?,
            planned_quay: element.decode_child("PlannedQuay")?,
            estimated_quay: element.decode_child("EstimatedQuay")?,
        })
    }
}

impl FromXml for StopCallStatus {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(StopCallStatus {
            order: element.parse_child("Order")?,
            request_stop: element.flag("RequestStop")?,
            unplanned_stop: element.flag("UnplannedStop")?,
            not_serviced_stop: element.flag("NotServicedStop")?,
            no_boarding_at_stop: element.flag("NoBoardingAtStop")?,
            no_alighting_at_stop: element.flag("NoAlightingAtStop")?,
        })
    }
}

impl FromXml for LegBoard {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(LegBoard {
            stop: StopPoint::from_xml(element)?,
            service_arrival: element.decode_child("ServiceArrival")?,
            service_departure: element.decode_required("ServiceDeparture")?,
            status: StopCallStatus::from_xml(element)?,
        })
    }
}

impl FromXml for LegIntermediate {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(LegIntermediate {
            stop: StopPoint::from_xml(element)?,
            service_arrival: element.decode_child("ServiceArrival")?,
            service_departure: element.decode_child("ServiceDeparture")?,
            status: StopCallStatus::from_xml(element)?,
        })
    }
}

impl FromXml for LegAlight {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(LegAlight {
            stop: StopPoint::from_xml(element)?,
            service_arrival: element.decode_required("ServiceArrival")?,
            service_departure: element.decode_child("ServiceDeparture")?,
            status: StopCallStatus::from_xml(element)?,
        })
    }
}

impl FromXml for TrackSection {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        let link_projection = match element.child("LinkProjection") {
            Some(projection) => projection.decode_all::<GeoPosition>("Position")?,
            None => Vec::new(),
        };
        Ok(TrackSection {
            track_section_start: element.decode_child("TrackSectionStart")?,
            track_section_end: element.decode_child("TrackSectionEnd")?,
            link_projection,
        })
    }
}

impl FromXml for LegTrack {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(LegTrack {
            track_sections: element.decode_all("TrackSection")?,
        })
    }
}

impl FromXml for TimedLeg {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(TimedLeg {
            leg_board: element.decode_required("LegBoard")?,
            legs_intermediate: element.decode_all("LegIntermediate")?,
            leg_alight: element.decode_required("LegAlight")?,
            service: element.decode_required("Service")?,
            leg_track: element.decode_child("LegTrack")?,
        })
    }
}

impl FromXml for TransferType {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        TransferType::from_wire(element.text()).ok_or_else(|| DecodeError::InvalidValue {
            element: "TransferType",
            value: element.text().to_string(),
        })
    }
}

impl FromXml for TransferLeg {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(TransferLeg {
            transfer_types: element.decode_all("TransferType")?,
            leg_start: element.decode_required("LegStart")?,
            leg_end: element.decode_required("LegEnd")?,
            duration: required_duration(element, "Duration")?,
        })
    }
}

impl FromXml for Leg {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        let leg_type = Choice::new(element, "LegTypeChoice")
            .variant("ContinuousLeg", |_| Ok(LegType::Continuous(ContinuousLeg)))
            .variant("TimedLeg", |el| TimedLeg::from_xml(el).map(LegType::Timed))
            .variant("TransferLeg", |el| {
                TransferLeg::from_xml(el).map(LegType::Transfer)
            })
            .finish()?;

        Ok(Leg {
            id: element.parse_required("Id")?,
            duration: optional_duration(element, "Duration")?,
            leg_type,
        })
    }
}

impl FromXml for Trip {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        let id = required_string(element, "Id")?;
        let start_time = required_time(element, "StartTime")?;
        let end_time = required_time(element, "EndTime")?;
        let legs: Vec<Leg> = element.decode_all("Leg")?;

        if legs.is_empty() {
            return Err(DecodeError::InvalidTrip {
                id,
                reason: "trip has no legs",
            });
        }
        if start_time > end_time {
            return Err(DecodeError::InvalidTrip {
                id,
                reason: "trip ends before it starts",
            });
        }

        Ok(Trip {
            duration: required_duration(element, "Duration")?,
            transfers: element.parse_required("Transfers")?,
            distance: element.parse_child("Distance")?,
            id,
            start_time,
            end_time,
            legs,
        })
    }
}

impl FromXml for TripResult {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        let trip_type = Choice::new(element, "TripTypeChoice")
            .variant("Trip", |el| Trip::from_xml(el).map(TripType::Trip))
            .variant("TripSummary", |_| Ok(TripType::TripSummary(TripSummary)))
            .finish()?;

        let id = required_string(element, "Id")?;
        if matches!(trip_type, TripType::TripSummary(_)) {
            debug!(id = %id, "trip summary in response");
        }

        Ok(TripResult {
            id,
            trip_type,
            trip_fares: element.children_named("TripFare").map(|_| TripFare).collect(),
            is_alternative_option: element.flag("IsAlternativeOption")?,
        })
    }
}
