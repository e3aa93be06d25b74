//! TAGO HTTP client.
//!
//! The portal authenticates with a `serviceKey` query parameter rather than
//! a header, and needs `_type=json` to answer in JSON instead of XML.

use chrono::NaiveDate;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::providers::error::ProviderError;
use crate::providers::http::{DEFAULT_MAX_CONCURRENT, DEFAULT_TIMEOUT_SECS, LimitedClient};

use super::types::{Envelope, ExpressBusItem, RESULT_OK, TrainItem};

/// Default base URL for the TAGO services.
const DEFAULT_BASE_URL: &str = "https://apis.data.go.kr/1613000";

/// Default number of records per request.
const DEFAULT_ROWS: u16 = 30;

/// Configuration for the TAGO client.
#[derive(Debug, Clone)]
pub struct TagoConfig {
    /// Portal service key
    pub service_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Records requested per call
    pub rows: u16,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TagoConfig {
    /// Create a new config with the given service key.
    pub fn new(service_key: impl Into<String>) -> Self {
        Self {
            service_key: service_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            rows: DEFAULT_ROWS,
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

/// TAGO schedule client, shared by the express bus and rail adapters.
#[derive(Debug, Clone)]
pub struct TagoClient {
    http: LimitedClient,
    base_url: String,
    service_key: String,
    rows: u16,
}

impl TagoClient {
    pub fn new(config: TagoConfig) -> Result<Self, ProviderError> {
        let http = LimitedClient::new(HeaderMap::new(), config.timeout_secs, config.max_concurrent)?;

        Ok(Self {
            http,
            base_url: config.base_url,
            service_key: config.service_key,
            rows: config.rows,
        })
    }

    /// Express bus departures between two terminals on a date.
    pub async fn express_bus_schedule(
        &self,
        dep_terminal: &str,
        arr_terminal: &str,
        date: NaiveDate,
    ) -> Result<Vec<ExpressBusItem>, ProviderError> {
        self.fetch_items(
            "ExpBusInfoService/getStrtpntAlocFndExpbusInfo",
            &[
                ("depTerminalId", dep_terminal.to_string()),
                ("arrTerminalId", arr_terminal.to_string()),
                ("depPlandTime", date.format("%Y%m%d").to_string()),
            ],
        )
        .await
    }

    /// Train departures between two stations on a date.
    pub async fn train_schedule(
        &self,
        dep_station: &str,
        arr_station: &str,
        date: NaiveDate,
    ) -> Result<Vec<TrainItem>, ProviderError> {
        self.fetch_items(
            "TrainInfoService/getStrtpntAlocFndTrainInfo",
            &[
                ("depPlaceId", dep_station.to_string()),
                ("arrPlaceId", arr_station.to_string()),
                ("depPlandTime", date.format("%Y%m%d").to_string()),
            ],
        )
        .await
    }

    async fn fetch_items<T: DeserializeOwned>(
        &self,
        operation: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, ProviderError> {
        let url = format!("{}/{}", self.base_url, operation);

        let mut query: Vec<(&str, String)> = vec![
            ("serviceKey", self.service_key.clone()),
            ("_type", "json".to_string()),
            ("pageNo", "1".to_string()),
            ("numOfRows", self.rows.to_string()),
        ];
        query.extend(params.iter().cloned());

        let envelope: Envelope<T> = self.http.get_json(&url, &query).await?;

        let header = &envelope.response.header;
        if header.result_code != RESULT_OK {
            return Err(ProviderError::Upstream {
                code: header.result_code.clone(),
                message: header.result_msg.clone().unwrap_or_default(),
            });
        }

        Ok(envelope.into_items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = TagoConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(60);

        assert_eq!(config.service_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = TagoConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.rows, DEFAULT_ROWS);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn client_creation() {
        assert!(TagoClient::new(TagoConfig::new("test-key")).is_ok());
    }
}
