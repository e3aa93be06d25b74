//! ODsay urban public-transit adapter.
//!
//! One search serves all four aggregator modes; the pipeline decides how
//! each mode views the returned paths.

mod client;
mod convert;
mod types;

use async_trait::async_trait;

use crate::config::ODSAY_API_KEY_VAR;

use super::error::ProviderError;
use super::{Availability, ItineraryProvider, ProviderRequest, settle};

pub use client::{OdsayClient, OdsayConfig, TrafficCodes};
pub use convert::{ConversionError, convert_path, convert_paths};
pub use types::{ErrorBody, ErrorDetail, Lane, Path, PathInfo, SearchResponse, SearchResult, SubPath};

/// Public-transit paths for `transit-min-time`, `transit-min-cost`,
/// `city-bus` and `subway`.
#[derive(Debug, Clone)]
pub struct TransitAdapter {
    client: Option<OdsayClient>,
}

impl TransitAdapter {
    /// `client` is `None` when no API key is configured.
    pub fn new(client: Option<OdsayClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ItineraryProvider for TransitAdapter {
    fn name(&self) -> &'static str {
        "odsay-transit"
    }

    async fn resolve(&self, request: &ProviderRequest) -> Availability {
        let Some(client) = &self.client else {
            return settle(
                self.name(),
                request.mode,
                Err(ProviderError::NotConfigured(ODSAY_API_KEY_VAR)),
            );
        };

        let result = client
            .search_paths(&request.origin.location, &request.destination.location)
            .await
            .map(|response| {
                let paths = response.result.map(|r| r.path).unwrap_or_default();
                convert_paths(
                    &paths,
                    client.traffic_codes(),
                    request.mode,
                    &request.origin.address,
                    &request.destination.address,
                    request.departure,
                )
            });

        settle(self.name(), request.mode, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeoPoint, ModeId, Place, RoutePreference};
    use crate::providers::Unavailable;

    fn request(mode: ModeId) -> ProviderRequest {
        ProviderRequest {
            origin: Place::new("서울시청", GeoPoint::new(37.5665, 126.9780)),
            destination: Place::new("강남역", GeoPoint::new(37.4979, 127.0276)),
            mode,
            departure: None,
            route_preference: RoutePreference::default(),
        }
    }

    #[tokio::test]
    async fn unconfigured_is_unavailable() {
        let adapter = TransitAdapter::new(None);
        for mode in [ModeId::TransitMinTime, ModeId::Subway] {
            assert_eq!(
                adapter.resolve(&request(mode)).await,
                Availability::Unavailable(Unavailable::NotConfigured)
            );
        }
    }

    #[tokio::test]
    async fn transport_failure_is_unavailable() {
        let config = OdsayConfig::new("key")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(2);
        let adapter = TransitAdapter::new(Some(OdsayClient::new(config).unwrap()));
        assert!(matches!(
            adapter.resolve(&request(ModeId::CityBus)).await,
            Availability::Unavailable(Unavailable::Failed(_))
        ));
    }
}
