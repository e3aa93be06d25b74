//! Kakao Mobility HTTP client.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::domain::{GeoPoint, RoutePreference};
use crate::providers::error::ProviderError;
use crate::providers::http::{DEFAULT_MAX_CONCURRENT, DEFAULT_TIMEOUT_SECS, LimitedClient};

use super::types::DirectionsResponse;

/// Default base URL for Kakao Mobility.
const DEFAULT_BASE_URL: &str = "https://apis-navi.kakaomobility.com";

/// Configuration for the Kakao Mobility client.
#[derive(Debug, Clone)]
pub struct KakaoConfig {
    /// REST API key, sent as `Authorization: KakaoAK <key>`
    pub rest_api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl KakaoConfig {
    /// Create a new config with the given REST API key.
    pub fn new(rest_api_key: impl Into<String>) -> Self {
        Self {
            rest_api_key: rest_api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
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
}

/// Map a route preference onto Kakao's `priority` and `avoid` parameters.
pub fn priority_params(preference: RoutePreference) -> (&'static str, Option<&'static str>) {
    match preference {
        RoutePreference::Recommended => ("RECOMMEND", None),
        RoutePreference::TimeOptimized => ("TIME", None),
        RoutePreference::DistanceOptimized => ("DISTANCE", None),
        RoutePreference::AvoidHighway => ("RECOMMEND", Some("motorway")),
    }
}

/// Kakao Mobility directions client.
#[derive(Debug, Clone)]
pub struct KakaoClient {
    http: LimitedClient,
    base_url: String,
}

impl KakaoClient {
    pub fn new(config: KakaoConfig) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();

        let auth = HeaderValue::from_str(&format!("KakaoAK {}", config.rest_api_key)).map_err(
            |_| ProviderError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            },
        )?;
        headers.insert(AUTHORIZATION, auth);

        let http = LimitedClient::new(headers, config.timeout_secs, config.max_concurrent)?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Driving directions between two points.
    pub async fn directions(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
        preference: RoutePreference,
    ) -> Result<DirectionsResponse, ProviderError> {
        let url = format!("{}/v1/directions", self.base_url);
        let (priority, avoid) = priority_params(preference);

        let mut query = vec![
            ("origin", lng_lat(origin)),
            ("destination", lng_lat(destination)),
            ("priority", priority.to_string()),
            ("summary", "false".to_string()),
        ];
        if let Some(avoid) = avoid {
            query.push(("avoid", avoid.to_string()));
        }

        self.http.get_json(&url, &query).await
    }
}

/// Kakao takes coordinates as `x,y`, i.e. longitude first.
fn lng_lat(point: &GeoPoint) -> String {
    format!("{},{}", point.longitude, point.latitude)
}
