//! Headless controller for the seller profile form.
//!
//! # Design
//! `ProfileEditor` owns the form state (profile fields, view/edit mode,
//! loading flag) and talks to the server only through `RequestGateway`.
//! Rendering is left to the caller: `save` returns a `Notice` for the UI to
//! show, and the mode tells it whether inputs are enabled.
//!
//! Loading never surfaces an error. Anything other than a stored profile
//! drops the form into edit mode so the seller can fill it in.

use serde_json::Value;
use tracing::warn;

use crate::envelope::ResponseEnvelope;
use crate::gateway::RequestGateway;
use crate::http::{HttpMethod, Payload, RequestHeaders};
use crate::session::TokenSource;
use crate::transport::Transport;
use crate::types::{ProfileField, SellerProfile};

pub const SAVE_SUCCESS_MESSAGE: &str = "Profile updated successfully!";
pub const PHONE_REQUIRED_MESSAGE: &str = "Phone number is required";
pub const SAVE_FAILURE_MESSAGE: &str = "Failed to update profile";
pub const NOT_SUBMITTED: &str = "Not Submitted";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Viewing,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient notification for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub struct ProfileEditor<T, S> {
    gateway: RequestGateway<T>,
    session: S,
    endpoint: String,
    profile: SellerProfile,
    mode: EditorMode,
    loading: bool,
}

impl<T: Transport, S: TokenSource> ProfileEditor<T, S> {
    pub fn new(gateway: RequestGateway<T>, session: S, endpoint: &str) -> Self {
        Self {
            gateway,
            session,
            endpoint: endpoint.to_string(),
            profile: SellerProfile::default(),
            mode: EditorMode::Viewing,
            loading: true,
        }
    }

    pub fn profile(&self) -> &SellerProfile {
        &self.profile
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn verification_status(&self) -> &str {
        self.profile.is_verified.as_deref().unwrap_or(NOT_SUBMITTED)
    }

    /// Fetch the stored profile. Without a session token nothing is sent.
    pub fn load(&mut self) {
        if let Some(token) = self.session.token() {
            let envelope = self.gateway.dispatch(
                HttpMethod::Get,
                &self.endpoint,
                None,
                bearer(&token),
            );
            match stored_profile(&envelope) {
                Some(profile) => {
                    self.profile = profile;
                    self.mode = EditorMode::Viewing;
                }
                None => self.mode = EditorMode::Editing,
            }
        }
        self.loading = false;
    }

    /// Update one field. Ignored unless the form is in edit mode.
    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) -> bool {
        if self.mode != EditorMode::Editing {
            return false;
        }
        self.profile.set(field, value.into());
        true
    }

    pub fn begin_edit(&mut self) {
        self.mode = EditorMode::Editing;
    }

    pub fn cancel_edit(&mut self) {
        self.mode = EditorMode::Viewing;
    }

    /// Submit the profile and report the result.
    pub fn save(&mut self) -> Notice {
        if let Err(err) = self.profile.validate() {
            return Notice::error(format!(
                "Please fill in the required fields: {}",
                err.missing.join(", ")
            ));
        }
        let Some(token) = self.session.token() else {
            warn!(endpoint = %self.endpoint, "profile save attempted without a session token");
            return Notice::error(SAVE_FAILURE_MESSAGE);
        };

        let body = match serde_json::to_value(&self.profile) {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "profile could not be serialized");
                return Notice::error(SAVE_FAILURE_MESSAGE);
            }
        };
        let envelope = self.gateway.dispatch(
            HttpMethod::Post,
            &self.endpoint,
            Some(Payload::Json(body)),
            bearer(&token),
        );

        if envelope.is_success() {
            self.mode = EditorMode::Viewing;
            return Notice::success(SAVE_SUCCESS_MESSAGE);
        }

        warn!(status_code = envelope.status_code, body = %envelope.body, "profile update failed");
        if phone_error(&envelope.body) {
            Notice::error(PHONE_REQUIRED_MESSAGE)
        } else {
            Notice::error(SAVE_FAILURE_MESSAGE)
        }
    }
}

fn bearer(token: &str) -> RequestHeaders {
    RequestHeaders::explicit([("Authorization", format!("Bearer {token}"))])
}

/// A 2xx body whose `storeName` is set, decoded leniently.
fn stored_profile(envelope: &ResponseEnvelope) -> Option<SellerProfile> {
    if !envelope.is_success() || !is_set(envelope.body.get("storeName")) {
        return None;
    }
    match serde_json::from_value::<SellerProfile>(envelope.body.clone()) {
        Ok(profile) => Some(profile),
        Err(err) => {
            warn!(error = %err, "profile response could not be decoded");
            None
        }
    }
}

/// True when the server flagged the phone field.
fn phone_error(body: &Value) -> bool {
    is_set(body.get("errors").and_then(|errors| errors.get("phone")))
}

/// Absent, null, false, empty string and zero are unset.
fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(_) => true,
    }
}
