//! Sending request documents to an OJP endpoint.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tokio::sync::Semaphore;
use tracing::{debug, trace};

use super::{OjpConfig, OjpError, TransportError};

/// Status and body of a completed round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can carry a request body to the server and bring back
/// the response.
///
/// Non-2xx statuses are returned as responses, not errors; interpreting
/// them is up to the caller.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        (**self).send(body)
    }
}

/// HTTP transport using `reqwest`.
///
/// Uses a semaphore to limit concurrent requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
    semaphore: Arc<Semaphore>,
}

impl HttpTransport {
    pub fn new(config: &OjpConfig) -> Result<Self, OjpError> {
        let mut headers = HeaderMap::new();

        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_token))
            .map_err(|_| OjpError::InvalidConfig("API token is not a valid header value".into()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/xml; charset=utf-8"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OjpError::Transport(TransportError::Http(e)))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, body: Vec<u8>) -> Result<RawResponse, TransportError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| TransportError::Unavailable("request semaphore closed"))?;

        trace!(bytes = body.len(), endpoint = %self.endpoint, "sending OJP request");
        let response = self.http.post(&self.endpoint).body(body).send().await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        debug!(status, bytes = body.len(), "OJP response received");

        Ok(RawResponse { status, body })
    }
}
