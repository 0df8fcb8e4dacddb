//! Scripted transport for tests and offline development.
//!
//! Responses are queued up front and handed out in order, one per request.
//! Every request body is recorded so tests can inspect what was sent.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use super::{OjpError, RawResponse, Transport, TransportError};

#[derive(Debug)]
enum Canned {
    Response(RawResponse),
    Failure(String),
    /// Never completes. Used to test cancellation.
    Pending,
}

/// A [`Transport`] that replays canned responses.
#[derive(Debug, Default)]
pub struct MockTransport {
    queue: Mutex<VecDeque<Canned>>,
    requests: Mutex<Vec<Vec<u8>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status.
    pub fn push_response(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
        self.push(Canned::Response(RawResponse {
            status,
            body: body.into(),
        }))
    }

    /// Queue a 200 response.
    pub fn push_xml(&self, body: impl Into<Vec<u8>>) -> &Self {
        self.push_response(200, body)
    }

    /// Queue a 200 response read from a file.
    pub fn push_file(&self, path: impl AsRef<Path>) -> Result<&Self, OjpError> {
        let path = path.as_ref();
        let body = std::fs::read(path).map_err(|e| {
            OjpError::InvalidConfig(format!("failed to read mock response {path:?}: {e}"))
        })?;
        Ok(self.push_xml(body))
    }

    /// Queue a transport failure.
    pub fn push_failure(&self, message: impl Into<String>) -> &Self {
        self.push(Canned::Failure(message.into()))
    }

    /// Queue a request that never completes.
    pub fn push_pending(&self) -> &Self {
        self.push(Canned::Pending)
    }

    /// Bodies of all requests sent so far, oldest first.
    pub fn requests(&self) -> Vec<Vec<u8>> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of queued responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn push(&self, canned: Canned) -> &Self {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(canned);
        self
    }
}

impl Transport for MockTransport {
    async fn send(&self, body: Vec<u8>) -> Result<RawResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(body);

        let next = self
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match next {
            Some(Canned::Response(response)) => Ok(response),
            Some(Canned::Failure(message)) => Err(TransportError::Mock(message)),
            Some(Canned::Pending) => futures::future::pending().await,
            None => Err(TransportError::Mock("no canned response left".into())),
        }
    }
}
