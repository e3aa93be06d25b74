//! ODsay HTTP client.

use reqwest::header::HeaderMap;

use crate::domain::GeoPoint;
use crate::providers::error::ProviderError;
use crate::providers::http::{DEFAULT_MAX_CONCURRENT, DEFAULT_TIMEOUT_SECS, LimitedClient};

use super::types::SearchResponse;

/// Default base URL for ODsay.
const DEFAULT_BASE_URL: &str = "https://api.odsay.com/v1/api";

/// ODsay's `trafficType` codes.
///
/// These are the vendor's conventions, kept as data so a different
/// integration can remap them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrafficCodes {
    pub subway: u8,
    pub bus: u8,
    pub walk: u8,
}

impl Default for TrafficCodes {
    fn default() -> Self {
        Self {
            subway: 1,
            bus: 2,
            walk: 3,
        }
    }
}

/// Configuration for the ODsay client.
#[derive(Debug, Clone)]
pub struct OdsayConfig {
    /// API key, sent as the `apiKey` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Meaning of `trafficType` values
    pub traffic_codes: TrafficCodes,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OdsayConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            traffic_codes: TrafficCodes::default(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Remap `trafficType` codes.
    pub fn with_traffic_codes(mut self, codes: TrafficCodes) -> Self {
        self.traffic_codes = codes;
        self
    }
}

/// ODsay path search client.
#[derive(Debug, Clone)]
pub struct OdsayClient {
    http: LimitedClient,
    base_url: String,
    api_key: String,
    traffic_codes: TrafficCodes,
}

impl OdsayClient {
    pub fn new(config: OdsayConfig) -> Result<Self, ProviderError> {
        let http = LimitedClient::new(HeaderMap::new(), config.timeout_secs, config.max_concurrent)?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            traffic_codes: config.traffic_codes,
        })
    }

    pub fn traffic_codes(&self) -> TrafficCodes {
        self.traffic_codes
    }

    /// Public-transit paths between two points.
    ///
    /// A body carrying an `error` object is turned into
    /// [`ProviderError::Upstream`].
    pub async fn search_paths(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<SearchResponse, ProviderError> {
        let url = format!("{}/searchPubTransPathT", self.base_url);

        let response: SearchResponse = self
            .http
            .get_json(
                &url,
                &[
                    ("SX", origin.longitude.to_string()),
                    ("SY", origin.latitude.to_string()),
                    ("EX", destination.longitude.to_string()),
                    ("EY", destination.latitude.to_string()),
                    ("apiKey", self.api_key.clone()),
                ],
            )
            .await?;

        if let Some(error) = &response.error {
            let detail = error.first();
            return Err(ProviderError::Upstream {
                code: detail
                    .and_then(|d| d.code.as_ref())
                    .map(|c| c.as_str().map_or_else(|| c.to_string(), str::to_string))
                    .unwrap_or_default(),
                message: detail.and_then(|d| d.msg.clone()).unwrap_or_default(),
            });
        }

        Ok(response)
    }
}
