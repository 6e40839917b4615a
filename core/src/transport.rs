//! The seam between the gateway and the network.
//!
//! # Design
//! A `Transport` executes one `HttpRequest` and reports what happened as a
//! `TransportOutcome`. The outcome is already classified, so the gateway
//! matches on a sum type instead of probing optional fields of an error.
//!
//! `UreqTransport` is the production implementation. Tests substitute a
//! scripted transport.

use std::sync::Arc;
use std::time::Duration;

use ureq::http;

use crate::http::{decode_body, HttpRequest, HttpResponse, Payload, DEFAULT_CONTENT_TYPE};

/// Result of executing a request.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportOutcome {
    /// The server answered with a 2xx status.
    Success(HttpResponse),
    /// The server answered with any other status.
    RemoteFailure(HttpResponse),
    /// The request was sent but no response arrived.
    Unreachable(String),
    /// The request could not be built or sent.
    DispatchFailure(String),
}

impl TransportOutcome {
    /// Classify a received response by status.
    pub fn from_response(response: HttpResponse) -> Self {
        if (200..300).contains(&response.status) {
            TransportOutcome::Success(response)
        } else {
            TransportOutcome::RemoteFailure(response)
        }
    }
}

/// Executes requests. Implementations must not panic on bad input; every
/// failure is reported through `TransportOutcome`.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> TransportOutcome;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> TransportOutcome {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: &HttpRequest) -> TransportOutcome {
        (**self).send(request)
    }
}

/// Blocking transport backed by a ureq agent.
///
/// Status codes are never treated as errors by the agent, so 4xx/5xx
/// responses come back as data and are reported as `RemoteFailure`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_timeout(None)
    }

    /// `timeout` bounds the whole round-trip.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }

    fn run<B: ureq::AsSendBody>(&self, request: http::Request<B>) -> TransportOutcome {
        let mut response = match self.agent.run(request) {
            Ok(response) => response,
            Err(err) => return classify_error(err),
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // Read bytes, not text: a body that is not UTF-8 or is large is still
        // a response that arrived.
        let raw = match response.body_mut().with_config().limit(u64::MAX).read_to_vec() {
            Ok(raw) => raw,
            Err(err) => return TransportOutcome::Unreachable(err.to_string()),
        };

        TransportOutcome::from_response(HttpResponse {
            status,
            headers,
            body: decode_body(&raw),
        })
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> TransportOutcome {
        let mut builder = http::Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        // Explicit headers leave content negotiation to the transport; a JSON
        // body always goes out labelled as JSON.
        let labelled = request
            .headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(DEFAULT_CONTENT_TYPE.0));
        if matches!(request.body, Some(Payload::Json(_))) && !labelled {
            builder = builder.header(DEFAULT_CONTENT_TYPE.0, DEFAULT_CONTENT_TYPE.1);
        }

        match request.body.clone() {
            None => match builder.body(()) {
                Ok(req) => self.run(req),
                Err(err) => TransportOutcome::DispatchFailure(err.to_string()),
            },
            Some(payload) => {
                let bytes = match payload.into_bytes() {
                    Ok(bytes) => bytes,
                    Err(err) => return TransportOutcome::DispatchFailure(err.to_string()),
                };
                match builder.body(bytes) {
                    Ok(req) => self.run(req),
                    Err(err) => TransportOutcome::DispatchFailure(err.to_string()),
                }
            }
        }
    }
}

/// Agent errors that mean the request went out (or tried to) but nothing
/// came back are `Unreachable`; the rest never reached the network.
fn classify_error(err: ureq::Error) -> TransportOutcome {
    match err {
        ureq::Error::Io(_)
        | ureq::Error::Timeout(_)
        | ureq::Error::HostNotFound
        | ureq::Error::ConnectionFailed => TransportOutcome::Unreachable(err.to_string()),
        other => TransportOutcome::DispatchFailure(other.to_string()),
    }
}
