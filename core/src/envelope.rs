//! The uniform result of a dispatch.
//!
//! # Design
//! Every dispatch resolves to a `ResponseEnvelope`. Responses received from
//! the server are carried over verbatim. The two synthetic cases use fixed
//! sentinel statuses that no real server response can produce here: `503`
//! when nothing came back, `0` when the request never left.

use serde::Serialize;
use serde_json::{json, Value};

use crate::http::HttpResponse;

/// Status reported when the server did not answer.
pub const UNREACHABLE_STATUS: u16 = 503;

/// Status reported when the request could not be built or sent.
pub const DISPATCH_FAILURE_STATUS: u16 = 0;

/// Advisory attached to unreachable envelopes.
pub const UNREACHABLE_MESSAGE: &str =
    "Server is not responding. Please check your internet or backend status.";

/// Prefix of the message attached to dispatch-failure envelopes.
pub const DISPATCH_FAILURE_PREFIX: &str = "Technical issue";

/// Status and body of a finished dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub body: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<(String, String)>,
}

impl ResponseEnvelope {
    pub fn unreachable() -> Self {
        Self::synthetic(UNREACHABLE_STATUS, UNREACHABLE_MESSAGE.to_string())
    }

    pub fn dispatch_failure(error: &str) -> Self {
        Self::synthetic(
            DISPATCH_FAILURE_STATUS,
            format!("{DISPATCH_FAILURE_PREFIX}: {error}"),
        )
    }

    fn synthetic(status_code: u16, message: String) -> Self {
        Self {
            status_code,
            body: json!({ "success": false, "message": message }),
            headers: Vec::new(),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// The `message` field of the body, if it has one.
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl From<HttpResponse> for ResponseEnvelope {
    fn from(response: HttpResponse) -> Self {
        Self {
            status_code: response.status,
            body: response.body,
            headers: response.headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_envelope_is_fixed() {
        let env = ResponseEnvelope::unreachable();
        assert_eq!(env.status_code, 503);
        assert_eq!(
            env.body,
            json!({
                "success": false,
                "message": "Server is not responding. Please check your internet or backend status."
            })
        );
        assert!(env.headers.is_empty());
    }

    #[test]
    fn dispatch_failure_embeds_error_text() {
        let env = ResponseEnvelope::dispatch_failure("invalid HTTP method");
        assert_eq!(env.status_code, 0);
        assert_eq!(env.body["success"], false);
        assert_eq!(env.message(), Some("Technical issue: invalid HTTP method"));
    }

    #[test]
    fn response_is_carried_verbatim() {
        let response = HttpResponse {
            status: 422,
            headers: vec![("x-request-id".to_string(), "r1".to_string())],
            body: json!({"errors": {"phone": "required"}}),
        };
        let env = ResponseEnvelope::from(response.clone());
        assert_eq!(env.status_code, 422);
        assert_eq!(env.body, response.body);
        assert_eq!(env.header("X-Request-Id"), Some("r1"));
        assert!(!env.is_success());
    }

    #[test]
    fn serializes_with_status_code_key() {
        let env = ResponseEnvelope {
            status_code: 200,
            body: json!({"id": 1}),
            headers: Vec::new(),
        };
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value, json!({"statusCode": 200, "body": {"id": 1}}));
    }

    #[test]
    fn success_range() {
        let mut env = ResponseEnvelope::unreachable();
        assert!(!env.is_success());
        env.status_code = 204;
        assert!(env.is_success());
        env.status_code = 300;
        assert!(!env.is_success());
    }
}
