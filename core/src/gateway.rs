//! Stateless request gateway that turns every transport outcome into a
//! `ResponseEnvelope`.
//!
//! # Design
//! `RequestGateway` holds a transport and an optional base URL and nothing
//! else. `dispatch` builds an `HttpRequest`, hands it to the transport, and
//! matches the classified outcome:
//!
//! - `Success` / `RemoteFailure`: the server response, unchanged.
//! - `Unreachable`: status 503 with a fixed advisory.
//! - `DispatchFailure`: status 0 with the underlying error text.
//!
//! Failures are reported through `tracing` inside an `api_error_report` span
//! carrying the URL and method. Logging never alters the envelope.

use tracing::{debug, error, error_span};

use crate::config::GatewayConfig;
use crate::envelope::{ResponseEnvelope, UNREACHABLE_MESSAGE};
use crate::http::{HttpRequest, Payload, RequestHeaders};
use crate::transport::{Transport, TransportOutcome, UreqTransport};

#[derive(Debug, Clone)]
pub struct RequestGateway<T> {
    transport: T,
    base_url: Option<String>,
}

impl RequestGateway<UreqTransport> {
    /// Gateway over a ureq transport configured from `config`.
    pub fn from_config(config: &GatewayConfig) -> Self {
        let gateway = Self::new(UreqTransport::with_timeout(config.timeout));
        match &config.base_url {
            Some(base_url) => gateway.with_base_url(base_url),
            None => gateway,
        }
    }
}

impl<T: Transport> RequestGateway<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            base_url: None,
        }
    }

    /// URLs starting with `/` are resolved against `base_url`.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.trim_end_matches('/').to_string());
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform one HTTP call. Always resolves to an envelope.
    pub fn dispatch(
        &self,
        method: impl AsRef<str>,
        url: &str,
        body: Option<Payload>,
        headers: RequestHeaders,
    ) -> ResponseEnvelope {
        let request = HttpRequest {
            method: method.as_ref().to_string(),
            url: self.resolve_url(url),
            headers: headers.resolve(),
            body,
        };
        let outcome = self.transport.send(&request);
        classify(&request, outcome)
    }

    fn resolve_url(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if url.starts_with('/') => format!("{base}{url}"),
            _ => url.to_string(),
        }
    }
}

/// Map a transport outcome onto an envelope, logging failures.
pub fn classify(request: &HttpRequest, outcome: TransportOutcome) -> ResponseEnvelope {
    match outcome {
        TransportOutcome::Success(response) => {
            debug!(
                url = %request.url,
                method = %request.method,
                status_code = response.status,
                "request completed"
            );
            ResponseEnvelope::from(response)
        }
        TransportOutcome::RemoteFailure(response) => {
            let _report = error_report(request).entered();
            error!(
                status_code = response.status,
                body = %response.body,
                "server responded with an error"
            );
            ResponseEnvelope::from(response)
        }
        TransportOutcome::Unreachable(detail) => {
            let _report = error_report(request).entered();
            error!(
                detail = %detail,
                advisory = UNREACHABLE_MESSAGE,
                "network error: no response from server"
            );
            ResponseEnvelope::unreachable()
        }
        TransportOutcome::DispatchFailure(message) => {
            let _report = error_report(request).entered();
            error!(error = %message, "technical error: request was not sent");
            ResponseEnvelope::dispatch_failure(&message)
        }
    }
}

fn error_report(request: &HttpRequest) -> tracing::Span {
    error_span!("api_error_report", url = %request.url, method = %request.method)
}
