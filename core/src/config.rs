//! Gateway configuration read from the environment.

use std::time::Duration;

use crate::error::ConfigError;

/// Base URL that relative dispatch URLs are resolved against.
pub const API_URL_VAR: &str = "STOREFRONT_API_URL";

/// Round-trip timeout for the default transport, in seconds.
pub const TIMEOUT_VAR: &str = "STOREFRONT_HTTP_TIMEOUT_SECS";

/// Path of the seller profile resource.
pub const PROFILE_PATH: &str = "/api/seller/profile";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: Option<String>,
    /// `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = get(API_URL_VAR).map(|v| v.trim().to_string());
        let timeout = match get(TIMEOUT_VAR) {
            None => None,
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout {
                        key: TIMEOUT_VAR,
                        value: raw.clone(),
                    })?;
                Some(Duration::from_secs(secs))
            }
        };

        Ok(Self { base_url, timeout })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }
}
