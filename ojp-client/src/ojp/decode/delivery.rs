use crate::domain::{
    DeliveryType, InternationalText, LocationInformationDelivery, PtSituation, RoadSituation,
    ServiceDelivery, Situation, StopEventDelivery, TextualContent, TripDelivery,
    TripResponseContext, ValidityPeriod,
};
use crate::xml::{Choice, DecodeError, Element, FromXml};

use super::{optional_string, optional_time, required_string, required_time};

impl FromXml for ValidityPeriod {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(ValidityPeriod {
            start_time: required_time(element, "StartTime")?,
            end_time: optional_time(element, "EndTime")?,
        })
    }
}

impl FromXml for TextualContent {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        // Each content is a wrapper around a single text element, e.g.
        // `<siri:ReasonContent><siri:ReasonText>..</siri:ReasonText></siri:ReasonContent>`.
        let texts = |content: &'static str, text: &'static str| {
            element
                .children_named(content)
                .map(|c| c.decode_required::<InternationalText>(text))
                .collect::<Result<Vec<_>, _>>()
        };

        Ok(TextualContent {
            summary: element
                .required("SummaryContent")?
                .decode_required("SummaryText")?,
            reason: texts("ReasonContent", "ReasonText")?.into_iter().next(),
            description: texts("DescriptionContent", "DescriptionText")?,
            consequence: texts("ConsequenceContent", "ConsequenceText")?,
            recommendation: texts("RecommendationContent", "RecommendationText")?,
            duration: texts("DurationContent", "DurationText")?.into_iter().next(),
            remark: texts("RemarkContent", "RemarkText")?,
        })
    }
}

impl FromXml for PtSituation {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        let mut textual_contents = Vec::new();
        if let Some(actions) = element.child("PublishingActions") {
            for action in actions.children_named("PublishingAction") {
                for info in action.children_named("PassengerInformationAction") {
                    textual_contents.extend(info.decode_all::<TextualContent>("TextualContent")?);
                }
            }
        }

        Ok(PtSituation {
            situation_number: required_string(element, "SituationNumber")?,
            validity_periods: element.decode_all("ValidityPeriod")?,
            textual_contents,
        })
    }
}

impl FromXml for Situation {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Choice::tagged(element, "SituationTypeChoice")
            .variant("PtSituation", |el| PtSituation::from_xml(el).map(Situation::Pt))
            .variant("RoadSituation", |_| Ok(Situation::Road(RoadSituation)))
            .finish()
    }
}

impl FromXml for TripResponseContext {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        let mut situations = Vec::new();
        for group in element.children_named("Situations") {
            for item in group.children() {
                situations.push(Situation::from_xml(item)?);
            }
        }
        Ok(TripResponseContext { situations })
    }
}

impl FromXml for TripDelivery {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(TripDelivery {
            response_timestamp: required_string(element, "ResponseTimestamp")?,
            request_message_ref: required_string(element, "RequestMessageRef")?,
            calc_time: element.parse_child("CalcTime")?,
            trip_response_context: element.decode_child("TripResponseContext")?,
            trip_results: element.decode_all("TripResult")?,
        })
    }
}

impl FromXml for LocationInformationDelivery {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(LocationInformationDelivery {
            response_timestamp: required_string(element, "ResponseTimestamp")?,
            request_message_ref: optional_string(element, "RequestMessageRef"),
            default_language: optional_string(element, "DefaultLanguage"),
            calc_time: element.parse_child("CalcTime")?,
            place_results: element.decode_all("PlaceResult")?,
        })
    }
}

impl FromXml for ServiceDelivery {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        let delivery = Choice::new(element, "ServiceDeliveryTypeChoice")
            .variant("OJPLocationInformationDelivery", |el| {
                LocationInformationDelivery::from_xml(el).map(DeliveryType::LocationInformation)
            })
            .variant("OJPTripDelivery", |el| {
                TripDelivery::from_xml(el).map(DeliveryType::Trip)
            })
            .variant("OJPStopEventDelivery", |_| {
                Ok(DeliveryType::StopEvent(StopEventDelivery))
            })
            .finish()?;

        Ok(ServiceDelivery {
            response_timestamp: required_string(element, "ResponseTimestamp")?,
            producer_ref: optional_string(element, "ProducerRef"),
            delivery,
        })
    }
}
