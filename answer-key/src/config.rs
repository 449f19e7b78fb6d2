//! Backend client configuration parsed from environment variables.

use crate::error::ApiError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_API_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_API_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for ApiTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_API_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_API_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the `/api` backend, without a trailing slash.
    pub base_url: String,
    pub timeouts: ApiTimeouts,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.to_owned(), timeouts: ApiTimeouts::default() }
    }
}

impl ApiConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `OMR_API_BASE_URL`: default `http://localhost:8000/api`
    /// - `OMR_API_REQUEST_TIMEOUT_SECS`: default 30
    /// - `OMR_API_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] when the base URL is not an http(s) URL.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url = match std::env::var("OMR_API_BASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => DEFAULT_API_BASE_URL.to_owned(),
        };
        let timeouts = ApiTimeouts {
            request_secs: env_parse_u64("OMR_API_REQUEST_TIMEOUT_SECS", DEFAULT_API_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("OMR_API_CONNECT_TIMEOUT_SECS", DEFAULT_API_CONNECT_TIMEOUT_SECS),
        };
        Self::new(&base_url, timeouts)
    }

    /// Validate and normalize an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] when the URL is not http(s).
    pub fn new(base_url: &str, timeouts: ApiTimeouts) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::Config(format!("OMR_API_BASE_URL must be an http(s) URL, got '{base_url}'")));
        }
        Ok(Self { base_url: base_url.to_owned(), timeouts })
    }

    /// Absolute URL of an endpoint path such as `/exams/answer-keys`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key).map(|v| v.trim().parse::<u64>()) {
        Ok(Ok(v)) => v,
        _ => default,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
