//! Kakao Mobility road-routing adapter.

mod client;
mod convert;
mod types;

use async_trait::async_trait;

use crate::config::KAKAO_REST_API_KEY_VAR;

use super::error::ProviderError;
use super::{Availability, ItineraryProvider, ProviderRequest, settle};

pub use client::{KakaoClient, KakaoConfig, priority_params};
pub use convert::convert_route;
pub use types::{DirectionsResponse, Fare, Road, Route, Section, Summary};

/// Driving directions for the `drive` mode.
///
/// A route search that finds nothing is reported as unavailable; the
/// adapter never fabricates a route.
#[derive(Debug, Clone)]
pub struct DriveAdapter {
    client: Option<KakaoClient>,
}

impl DriveAdapter {
    /// `client` is `None` when no REST API key is configured.
    pub fn new(client: Option<KakaoClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ItineraryProvider for DriveAdapter {
    fn name(&self) -> &'static str {
        "kakao-directions"
    }

    async fn resolve(&self, request: &ProviderRequest) -> Availability {
        let Some(client) = &self.client else {
            return settle(
                self.name(),
                request.mode,
                Err(ProviderError::NotConfigured(KAKAO_REST_API_KEY_VAR)),
            );
        };

        let result = client
            .directions(
                &request.origin.location,
                &request.destination.location,
                request.route_preference,
            )
            .await
            .and_then(|response| {
                convert_route(
                    &response,
                    &request.origin.address,
                    &request.destination.address,
                    request.departure,
                )
            })
            .map(|option| vec![option]);

        settle(self.name(), request.mode, result)
    }
}
