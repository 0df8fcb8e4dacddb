//! OJP 2.0 client.
//!
//! Requests are XML documents POSTed to a single endpoint; every response
//! is an `OJP > OJPResponse > siri:ServiceDelivery` document whose payload
//! depends on the request kind.
//!
//! Key characteristics of OJP responses:
//! - Namespace prefixes vary between producers (`siri:`, `ojp:`, or a
//!   default namespace), so decoding only looks at local names
//! - Polymorphic elements are encoded by which child is present, not by
//!   a type attribute
//! - Trip ids are only unique within one response, so the same trip
//!   shows up under different ids when a search is repeated

mod client;
mod decode;
mod error;
pub mod mock;
pub mod request;
mod transport;

pub use client::{OjpClient, OjpConfig};
pub use decode::decode;
pub use error::{OjpError, TransportError};
pub use mock::MockTransport;
pub use request::{
    DepArrTime, InitialInput, NumberOfResults, PlaceParam, PlaceTypeRestriction, Rectangle,
    TripParams, TripRequest,
};
pub use transport::{HttpTransport, RawResponse, Transport};
