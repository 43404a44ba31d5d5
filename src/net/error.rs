//! Error taxonomy for API calls.
//!
//! Only transport and decoding failures are errors here. A server-side
//! rejection arrives as a normal JSON body and is returned as `Ok`.

/// Errors produced by [`ApiClient`](super::api::ApiClient) operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the body could not be read
    /// (DNS, connect, TLS, reset mid-body).
    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body is not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl ApiError {
    /// Whether the failure happened before a response body was decoded.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Whether the server answered but the body was not JSON.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}
