//! OJP client error types.

use std::fmt;

use crate::xml::DecodeError;

/// Failure to complete a round trip at the transport level.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Network error, timeout, TLS failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The transport was shut down.
    #[error("transport unavailable: {0}")]
    Unavailable(&'static str),

    /// Injected failure from a test transport.
    #[error("transport failure: {0}")]
    Mock(String),
}

/// Errors from the OJP client and the pagination cursor.
#[derive(Debug)]
pub enum OjpError {
    /// The response body could not be decoded.
    Decoding(DecodeError),

    /// The server answered with a non-2xx status.
    UnexpectedStatus(u16),

    /// The request never produced a response.
    Transport(TransportError),

    /// An operation was called in a state that does not allow it.
    PreconditionFailed(&'static str),

    /// The request document could not be written.
    Encoding(String),

    /// The response carried a different delivery than the request asks for.
    UnexpectedDelivery { expected: &'static str, got: &'static str },

    /// Client configuration is unusable.
    InvalidConfig(String),
}

impl OjpError {
    /// Returns true if decoding failed because of an unknown variant.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, OjpError::Decoding(e) if e.is_schema_mismatch())
    }
}

impl fmt::Display for OjpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OjpError::Decoding(e) => write!(f, "decoding failed: {e}"),
            OjpError::UnexpectedStatus(status) => write!(f, "unexpected HTTP status {status}"),
            OjpError::Transport(e) => write!(f, "loading failed: {e}"),
            OjpError::PreconditionFailed(msg) => write!(f, "precondition failed: {msg}"),
            OjpError::Encoding(msg) => write!(f, "could not encode request: {msg}"),
            OjpError::UnexpectedDelivery { expected, got } => {
                write!(f, "expected {expected} but response holds {got}")
            }
            OjpError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for OjpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OjpError::Decoding(e) => Some(e),
            OjpError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DecodeError> for OjpError {
    fn from(err: DecodeError) -> Self {
        OjpError::Decoding(err)
    }
}

impl From<TransportError> for OjpError {
    fn from(err: TransportError) -> Self {
        OjpError::Transport(err)
    }
}
