//! HTTP plumbing shared by the provider clients.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;

use super::error::ProviderError;

/// Default maximum concurrent requests per provider.
pub(crate) const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default request timeout in seconds.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// A reqwest client with a concurrency limit.
#[derive(Debug, Clone)]
pub(crate) struct LimitedClient {
    http: reqwest::Client,
    semaphore: Arc<Semaphore>,
}

impl LimitedClient {
    pub(crate) fn new(
        headers: HeaderMap,
        timeout_secs: u64,
        max_concurrent: usize,
    ) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
        })
    }

    /// GET `url` with query parameters and parse the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ProviderError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ProviderError::json(e, &body))
    }
}
