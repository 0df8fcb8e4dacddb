//! Small value types shared by places and trips.

use std::fmt;

use serde::Serialize;

/// A text in one language (`InternationalTextStructure`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InternationalText {
    pub text: String,
    /// Language tag from `xml:lang`, if given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl InternationalText {
    /// Create a text without a language tag.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: None,
        }
    }
}

impl fmt::Display for InternationalText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPosition {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPosition {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// Public transport mode.
///
/// Values outside the known set decode to `Unknown` rather than failing,
/// since producers add modes over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PtMode {
    Rail,
    Bus,
    Tram,
    Water,
    Telecabin,
    Underground,
    Unknown,
}

impl PtMode {
    /// Parse a wire value, falling back to `Unknown`.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "rail" => PtMode::Rail,
            "bus" => PtMode::Bus,
            "tram" => PtMode::Tram,
            "water" => PtMode::Water,
            "telecabin" => PtMode::Telecabin,
            "underground" => PtMode::Underground,
            _ => PtMode::Unknown,
        }
    }

    /// The wire value for this mode. `Unknown` has none.
    pub fn as_wire(&self) -> Option<&'static str> {
        match self {
            PtMode::Rail => Some("rail"),
            PtMode::Bus => Some("bus"),
            PtMode::Tram => Some("tram"),
            PtMode::Water => Some("water"),
            PtMode::Telecabin => Some("telecabin"),
            PtMode::Underground => Some("underground"),
            PtMode::Unknown => None,
        }
    }
}

/// Transport mode of a place or service (`ModeStructure`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mode {
    pub pt_mode: PtMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus_submode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rail_submode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<InternationalText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<InternationalText>,
}

/// A code in a foreign identifier system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PrivateCode {
    pub system: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pt_mode_wire_values() {
        for mode in [
            PtMode::Rail,
            PtMode::Bus,
            PtMode::Tram,
            PtMode::Water,
            PtMode::Telecabin,
            PtMode::Underground,
        ] {
            let wire = mode.as_wire().unwrap();
            assert_eq!(PtMode::from_wire(wire), mode);
        }
    }

    #[test]
    fn unknown_pt_mode_falls_back() {
        assert_eq!(PtMode::from_wire("funicular"), PtMode::Unknown);
        assert_eq!(PtMode::from_wire("Rail"), PtMode::Unknown);
        assert_eq!(PtMode::Unknown.as_wire(), None);
    }

    #[test]
    fn text_display() {
        assert_eq!(InternationalText::new("Bern").to_string(), "Bern");
    }
}
