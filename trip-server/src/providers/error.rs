//! Provider client error types.
//!
//! These never leave an adapter: `settle` downgrades every variant to
//! `Unavailable`.

/// Errors from provider HTTP clients and response conversion.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The body carried a vendor error code despite a 2xx status
    #[error("upstream error {code}: {message}")]
    Upstream { code: String, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The body parsed but could not be turned into an itinerary
    #[error("malformed response: {0}")]
    Malformed(String),

    /// No credential for this provider
    #[error("not configured: {0} is not set")]
    NotConfigured(&'static str),
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_ref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}

impl ProviderError {
    /// Build a JSON error quoting the start of the offending body.
    pub(crate) fn json(err: serde_json::Error, body: &str) -> Self {
        ProviderError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}
