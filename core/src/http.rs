//! HTTP request and response values passed between the gateway and a
//! `Transport`.
//!
//! # Design
//! Requests and responses are plain owned data. The gateway builds an
//! `HttpRequest`, the transport executes it, and the result comes back as an
//! `HttpResponse` wrapped in a `TransportOutcome`. Nothing here touches the
//! network, so the gateway can be driven by a scripted transport in tests.
//!
//! The method is kept as a raw string: the gateway passes it through
//! unvalidated and leaves rejection to the transport.

use std::fmt;

use serde_json::Value;

/// Header applied when the caller does not supply any headers.
pub const DEFAULT_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// Standard HTTP verbs used by the storefront.
///
/// Typed callers pass these; `dispatch` still accepts any string because the
/// method travels unvalidated to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for HttpMethod {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Header selection for a dispatch.
///
/// `Default` applies `Content-Type: application/json`. `Explicit` is sent
/// exactly as given, even when empty, so the transport can compute headers
/// itself for multipart or binary payloads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestHeaders {
    #[default]
    Default,
    Explicit(Vec<(String, String)>),
}

impl RequestHeaders {
    /// Shorthand for an explicit header list.
    pub fn explicit<K, V, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        RequestHeaders::Explicit(
            headers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// The header list the transport will receive.
    pub fn resolve(self) -> Vec<(String, String)> {
        match self {
            RequestHeaders::Default => vec![(
                DEFAULT_CONTENT_TYPE.0.to_string(),
                DEFAULT_CONTENT_TYPE.1.to_string(),
            )],
            RequestHeaders::Explicit(headers) => headers,
        }
    }
}

impl From<Option<Vec<(String, String)>>> for RequestHeaders {
    fn from(headers: Option<Vec<(String, String)>>) -> Self {
        headers.map_or(RequestHeaders::Default, RequestHeaders::Explicit)
    }
}

/// Request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Serialized as JSON.
    Json(Value),
    /// Sent as-is; pair with explicit headers.
    Raw(Vec<u8>),
}

impl Payload {
    pub fn into_bytes(self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Payload::Json(value) => serde_json::to_vec(&value),
            Payload::Raw(bytes) => Ok(bytes),
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

/// A single logical HTTP call, as handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Payload>,
}

/// A response received from the server, with the body already decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

/// Decode a raw response body. JSON is parsed; anything else is kept as a
/// JSON string, with invalid UTF-8 replaced, so the response still counts.
pub fn decode_body(raw: &[u8]) -> Value {
    serde_json::from_slice(raw)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(raw).into_owned()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn default_headers_resolve_to_json_content_type() {
        let headers = RequestHeaders::Default.resolve();
        assert_eq!(
            headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn explicit_empty_headers_stay_empty() {
        assert!(RequestHeaders::Explicit(Vec::new()).resolve().is_empty());
    }

    #[test]
    fn explicit_headers_are_not_merged_with_default() {
        let headers = RequestHeaders::explicit([("Authorization", "Bearer abc")]).resolve();
        assert_eq!(
            headers,
            vec![("Authorization".to_string(), "Bearer abc".to_string())]
        );
    }

    #[test]
    fn option_conversion_maps_none_to_default() {
        assert_eq!(RequestHeaders::from(None), RequestHeaders::Default);
        assert_eq!(
            RequestHeaders::from(Some(Vec::new())),
            RequestHeaders::Explicit(Vec::new())
        );
    }

    #[test]
    fn json_payload_serializes() {
        let bytes = Payload::Json(json!({"a": 1})).into_bytes().unwrap();
        assert_eq!(bytes, br#"{"a":1}"#);
    }

    #[test]
    fn raw_payload_is_untouched() {
        let bytes = Payload::Raw(vec![0, 159, 146, 150]).into_bytes().unwrap();
        assert_eq!(bytes, vec![0, 159, 146, 150]);
    }

    #[test]
    fn decode_body_parses_json_and_keeps_text() {
        assert_eq!(decode_body(br#"{"id":1}"#), json!({"id": 1}));
        assert_eq!(decode_body(b"Bad Gateway"), json!("Bad Gateway"));
        assert_eq!(decode_body(b""), json!(""));
    }

    #[test]
    fn decode_body_tolerates_invalid_utf8() {
        assert_eq!(decode_body(&[b'o', b'k', 0xff]), json!("ok\u{fffd}"));
    }

    #[test]
    fn method_display() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Get.as_ref(), "GET");
    }
}
