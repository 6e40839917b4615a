//! Storefront client core: a request gateway with a uniform response
//! envelope, and the seller profile editor built on it.
//!
//! # Overview
//! `RequestGateway::dispatch` performs one HTTP call and always resolves to a
//! `ResponseEnvelope`. Server responses are passed through verbatim; an
//! unanswered request becomes status 503 and a request that could not be sent
//! becomes status 0, both with a `{success: false, message}` body.
//!
//! # Design
//! - The network sits behind the `Transport` trait, which reports a tagged
//!   `TransportOutcome`. `UreqTransport` is the blocking production
//!   implementation; tests drive the gateway with scripted transports.
//! - The gateway is stateless apart from an optional base URL.
//! - `ProfileEditor` holds the seller profile form state and never lets a
//!   transport failure escape; it reports to the UI through `Notice`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod config;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod http;
pub mod profile;
pub mod session;
#[cfg(test)]
mod test_support;
pub mod transport;
pub mod types;

pub use config::{GatewayConfig, PROFILE_PATH};
pub use envelope::ResponseEnvelope;
pub use error::{ConfigError, ValidationError};
pub use gateway::RequestGateway;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Payload, RequestHeaders};
pub use profile::{EditorMode, Notice, NoticeLevel, ProfileEditor};
pub use session::{SessionStore, TokenSource};
pub use transport::{Transport, TransportOutcome, UreqTransport};
pub use types::{ProfileField, SellerProfile};
