//! Decoding error types.

/// Errors produced while turning OJP XML into domain types.
///
/// `Malformed`, `MissingElement`, `InvalidValue` and `InvalidTrip` are all
/// "decoding failed" conditions. `SchemaMismatch` is kept separate because it
/// means the document was well formed but carried a variant this client does
/// not know.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// Input is not a well-formed XML document.
    #[error("malformed XML: {0}")]
    Malformed(String),

    /// None of the candidate tags of a choice group was present.
    #[error("schema mismatch: no recognised variant for {context}")]
    SchemaMismatch { context: &'static str },

    /// A required child element was absent.
    #[error("missing required element {element} in {parent}")]
    MissingElement { parent: String, element: &'static str },

    /// An element was present but its text could not be parsed.
    #[error("invalid value for {element}: {value:?}")]
    InvalidValue { element: &'static str, value: String },

    /// A trip violated a structural invariant.
    #[error("invalid trip {id}: {reason}")]
    InvalidTrip { id: String, reason: &'static str },
}

impl DecodeError {
    /// Returns true if this is an unrecognised-variant failure.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, DecodeError::SchemaMismatch { .. })
    }
}

impl From<quick_xml::Error> for DecodeError {
    fn from(err: quick_xml::Error) -> Self {
        DecodeError::Malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DecodeError::SchemaMismatch {
            context: "PlaceRefChoice",
        };
        assert_eq!(
            err.to_string(),
            "schema mismatch: no recognised variant for PlaceRefChoice"
        );
        assert!(err.is_schema_mismatch());

        let err = DecodeError::MissingElement {
            parent: "siri:ServiceDelivery".into(),
            element: "ResponseTimestamp",
        };
        assert_eq!(
            err.to_string(),
            "missing required element ResponseTimestamp in siri:ServiceDelivery"
        );
        assert!(!err.is_schema_mismatch());

        let err = DecodeError::InvalidValue {
            element: "Transfers",
            value: "many".into(),
        };
        assert_eq!(err.to_string(), "invalid value for Transfers: \"many\"");
    }
}
