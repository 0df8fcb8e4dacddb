//! OJP HTTP client.
//!
//! Wraps a [`Transport`] with request encoding, status checking and
//! response decoding. Each public method performs exactly one round trip.

use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::{DeliveryType, LocationInformationDelivery, ServiceDelivery, TripDelivery};

use super::request::{
    InitialInput, PlaceParam, Rectangle, RequestContext, TripRequest,
    encode_location_information_request, encode_trip_request,
};
use super::{HttpTransport, OjpError, Transport, decode};

/// Default endpoint of the Swiss open data platform.
const DEFAULT_ENDPOINT: &str = "https://api.opentransportdata.swiss/ojp20";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the OJP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OjpConfig {
    /// Bearer token for authentication
    pub api_token: String,
    /// Endpoint every request is POSTed to
    pub endpoint: String,
    /// Sent as `siri:RequestorRef`
    pub requestor_ref: String,
    /// Preferred response language (`siri:Language`)
    pub language: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
}

impl OjpConfig {
    /// Create a new config with the given API token.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            requestor_ref: concat!("ojp-client_", env!("CARGO_PKG_VERSION")).to_string(),
            language: None,
            timeout_secs: 30,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Read the config from `OJP_API_TOKEN`, `OJP_ENDPOINT` and
    /// `OJP_REQUESTOR_REF`. Only the token is mandatory.
    pub fn from_env() -> Result<Self, OjpError> {
        let token = std::env::var("OJP_API_TOKEN")
            .map_err(|_| OjpError::InvalidConfig("OJP_API_TOKEN is not set".into()))?;

        let mut config = Self::new(token);
        if let Ok(endpoint) = std::env::var("OJP_ENDPOINT") {
            config = config.with_endpoint(endpoint);
        }
        if let Ok(requestor_ref) = std::env::var("OJP_REQUESTOR_REF") {
            config = config.with_requestor_ref(requestor_ref);
        }
        Ok(config)
    }

    /// Set a custom endpoint (for testing).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_requestor_ref(mut self, requestor_ref: impl Into<String>) -> Self {
        self.requestor_ref = requestor_ref.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }
}

/// OJP API client.
///
/// Generic over the transport so tests can swap in a
/// [`MockTransport`](super::MockTransport).
#[derive(Debug, Clone)]
pub struct OjpClient<T = HttpTransport> {
    transport: T,
    config: OjpConfig,
}

impl OjpClient<HttpTransport> {
    /// Create a client talking HTTP to the configured endpoint.
    pub fn http(config: OjpConfig) -> Result<Self, OjpError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: Transport> OjpClient<T> {
    pub fn new(transport: T, config: OjpConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &OjpConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Look up places by name.
    pub async fn request_place_results(
        &self,
        name: &str,
        restrictions: &PlaceParam,
    ) -> Result<LocationInformationDelivery, OjpError> {
        self.location_information(&InitialInput::Name(name.to_string()), restrictions)
            .await
    }

    /// Look up all places inside a rectangle.
    pub async fn request_place_results_in_rectangle(
        &self,
        rectangle: Rectangle,
        restrictions: &PlaceParam,
    ) -> Result<LocationInformationDelivery, OjpError> {
        self.location_information(&InitialInput::Rectangle(rectangle), restrictions)
            .await
    }

    /// Look up several names concurrently.
    ///
    /// Results are in input order. One failed lookup does not affect the
    /// others. Concurrency is bounded by the transport.
    pub async fn request_place_results_many<S: AsRef<str>>(
        &self,
        names: &[S],
        restrictions: &PlaceParam,
    ) -> Vec<Result<LocationInformationDelivery, OjpError>> {
        join_all(
            names
                .iter()
                .map(|name| self.request_place_results(name.as_ref(), restrictions)),
        )
        .await
    }

    /// Search trips. Trip results are returned as delivered, unfiltered.
    pub async fn request_trips(&self, request: &TripRequest) -> Result<TripDelivery, OjpError> {
        let body = encode_trip_request(&self.context(), request)?;
        match self.round_trip(body).await?.delivery {
            DeliveryType::Trip(trips) => {
                debug!(results = trips.trip_results.len(), "trip delivery");
                Ok(trips)
            }
            other => Err(unexpected("OJPTripDelivery", &other)),
        }
    }

    async fn location_information(
        &self,
        input: &InitialInput,
        restrictions: &PlaceParam,
    ) -> Result<LocationInformationDelivery, OjpError> {
        let body = encode_location_information_request(&self.context(), input, restrictions)?;
        match self.round_trip(body).await?.delivery {
            DeliveryType::LocationInformation(places) => {
                debug!(results = places.place_results.len(), "location information delivery");
                Ok(places)
            }
            other => Err(unexpected("OJPLocationInformationDelivery", &other)),
        }
    }

    fn context(&self) -> RequestContext<'_> {
        RequestContext {
            requestor_ref: &self.config.requestor_ref,
            language: self.config.language.as_deref(),
            timestamp: Utc::now(),
        }
    }

    /// Send, check the status, decode.
    async fn round_trip(&self, body: Vec<u8>) -> Result<ServiceDelivery, OjpError> {
        let response = self.transport.send(body).await?;

        if !response.is_success() {
            warn!(status = response.status, "OJP request rejected");
            return Err(OjpError::UnexpectedStatus(response.status));
        }

        decode(&response.body).map_err(|e| {
            warn!(error = %e, bytes = response.body.len(), "failed to decode OJP response");
            OjpError::Decoding(e)
        })
    }
}

fn unexpected(expected: &'static str, got: &DeliveryType) -> OjpError {
    OjpError::UnexpectedDelivery {
        expected,
        got: got.kind(),
    }
}
