//! API client configuration, optionally read from environment variables.

pub const DEFAULT_BASE_URL: &str = "https://www.call2all.co.il/ym/api";

pub const BASE_URL_ENV: &str = "YM_API_BASE_URL";
pub const TIMEOUT_SECS_ENV: &str = "YM_API_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} is not a whole number of seconds")]
    InvalidTimeout { var: &'static str, value: String },
    #[error("invalid {var}: base URL must not be empty")]
    EmptyBaseUrl { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Whole-request timeout. `None` leaves the transport default in place.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_owned(), timeout_secs: None }
    }
}

impl ApiConfig {
    /// Config pointed at a different base URL, e.g. a staging host or a test
    /// server.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: normalize_base_url(&base_url.into()), timeout_secs: None }
    }

    #[must_use]
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `YM_API_BASE_URL`: defaults to the production API
    /// - `YM_API_TIMEOUT_SECS`: no timeout when absent
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::var(BASE_URL_ENV).ok().as_deref(), std::env::var(TIMEOUT_SECS_ENV).ok().as_deref())
    }

    /// Build config from raw variable values as they would appear in the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is blank or the timeout is not a
    /// non-negative integer.
    pub fn from_vars(base_url: Option<&str>, timeout_secs: Option<&str>) -> Result<Self, ConfigError> {
        let base_url = match base_url {
            None => DEFAULT_BASE_URL.to_owned(),
            Some(raw) => {
                let normalized = normalize_base_url(raw);
                if normalized.is_empty() {
                    return Err(ConfigError::EmptyBaseUrl { var: BASE_URL_ENV });
                }
                normalized
            }
        };
        let timeout_secs = timeout_secs
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout { var: TIMEOUT_SECS_ENV, value: raw.to_owned() })
            })
            .transpose()?;
        Ok(Self { base_url, timeout_secs })
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
