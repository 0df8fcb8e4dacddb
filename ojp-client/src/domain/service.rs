//! The scheduled service a timed leg rides on.

use serde::Serialize;

use super::{InternationalText, Mode};

/// Operating pattern of a service (`ConventionalModesOfOperationEnumeration`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConventionalModeOfOperation {
    Scheduled,
    DemandResponsive,
    Flexible,
    Unknown,
}

impl ConventionalModeOfOperation {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "scheduled" => ConventionalModeOfOperation::Scheduled,
            "demandResponsive" => ConventionalModeOfOperation::DemandResponsive,
            "flexible" => ConventionalModeOfOperation::Flexible,
            _ => ConventionalModeOfOperation::Unknown,
        }
    }
}

/// Product category such as "IC" or "S".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCategory {
    pub name: Option<InternationalText>,
    pub short_name: Option<InternationalText>,
    pub product_category_ref: Option<String>,
}

/// A textual attribute of a service, e.g. an accessibility note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub user_text: InternationalText,
    pub code: String,
}

/// A service of a journey (`DatedJourneyStructure`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub conventional_mode_of_operation: Option<ConventionalModeOfOperation>,
    pub operating_day_ref: String,
    pub journey_ref: String,
    pub public_code: Option<String>,
    pub line_ref: String,
    pub direction_ref: Option<String>,
    pub mode: Mode,
    pub product_category: Option<ProductCategory>,
    pub published_service_name: InternationalText,
    pub train_number: Option<String>,
    pub vehicle_ref: Option<String>,
    pub attributes: Vec<Attribute>,
    pub operator_ref: Option<String>,
    pub origin_text: Option<InternationalText>,
    pub origin_stop_point_ref: Option<String>,
    pub destination_text: Option<InternationalText>,
    pub destination_stop_point_ref: Option<String>,
}

impl Service {
    /// Short label for display: product category and line, e.g. "IC 6".
    pub fn label(&self) -> String {
        let category = self
            .product_category
            .as_ref()
            .and_then(|c| c.short_name.as_ref())
            .map(|t| t.text.as_str());
        match (category, self.public_code.as_deref()) {
            (Some(category), Some(code)) if category != code => format!("{category} {code}"),
            (_, Some(code)) => code.to_string(),
            (Some(category), None) => category.to_string(),
            (None, None) => self.published_service_name.text.clone(),
        }
    }
}
