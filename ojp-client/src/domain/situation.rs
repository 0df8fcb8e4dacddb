//! Situations (disruption messages) attached to a trip response.

use serde::Serialize;

use super::{InternationalText, Timestamp};

/// Period during which a situation applies. An open end means "until
/// further notice".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidityPeriod {
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
}

impl ValidityPeriod {
    pub fn contains(&self, at: Timestamp) -> bool {
        at >= self.start_time && self.end_time.is_none_or(|end| at <= end)
    }
}

/// The texts a passenger sees for a situation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextualContent {
    pub summary: InternationalText,
    pub reason: Option<InternationalText>,
    pub description: Vec<InternationalText>,
    pub consequence: Vec<InternationalText>,
    pub recommendation: Vec<InternationalText>,
    pub duration: Option<InternationalText>,
    pub remark: Vec<InternationalText>,
}

/// A public transport situation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PtSituation {
    pub situation_number: String,
    pub validity_periods: Vec<ValidityPeriod>,
    pub textual_contents: Vec<TextualContent>,
}

/// A road situation. Its content is not modelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoadSituation;

/// One situation. Exactly one kind is present on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Situation {
    Pt(PtSituation),
    Road(RoadSituation),
}

impl Situation {
    pub fn as_pt(&self) -> Option<&PtSituation> {
        match self {
            Situation::Pt(pt) => Some(pt),
            Situation::Road(_) => None,
        }
    }
}
