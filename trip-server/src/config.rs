//! Provider credentials read from the environment.
//!
//! Every credential is optional. A missing one disables its adapter, which
//! then reports itself unavailable and the pipeline serves catalog data.

/// Public-data portal key for express bus and train schedules.
pub const TAGO_SERVICE_KEY_VAR: &str = "TAGO_SERVICE_KEY";

/// Kakao Mobility REST API key for driving directions.
pub const KAKAO_REST_API_KEY_VAR: &str = "KAKAO_REST_API_KEY";

/// ODsay key for urban public-transit search.
pub const ODSAY_API_KEY_VAR: &str = "ODSAY_API_KEY";

/// Credentials for the upstream sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub tago_service_key: Option<String>,
    pub kakao_rest_api_key: Option<String>,
    pub odsay_api_key: Option<String>,
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through `lookup`; blank values count as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            let value = lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
            if value.is_none() {
                tracing::warn!(variable = name, "credential not set, provider disabled");
            }
            value
        };

        Self {
            tago_service_key: read(TAGO_SERVICE_KEY_VAR),
            kakao_rest_api_key: read(KAKAO_REST_API_KEY_VAR),
            odsay_api_key: read(ODSAY_API_KEY_VAR),
        }
    }
}
