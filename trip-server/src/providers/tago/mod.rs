//! TAGO schedule adapters: express bus and rail.
//!
//! Both services live on the same portal and share an envelope, a client
//! and a credential, but they are separate upstream sources and therefore
//! separate adapters.

mod client;
mod convert;
mod types;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};

use crate::config::TAGO_SERVICE_KEY_VAR;
use crate::domain::ItineraryOption;

use super::error::ProviderError;
use super::hub::{Hub, HubTable};
use super::{Availability, ItineraryProvider, ProviderRequest, Unavailable, settle};

pub use client::{TagoClient, TagoConfig};
pub use convert::{ConversionError, Endpoints, convert_express_bus_items, convert_train_items};
pub use types::{CompactTime, Envelope, ExpressBusItem, NumberOrText, TrainItem};

/// Express bus schedules between the terminals nearest the two places.
#[derive(Debug, Clone)]
pub struct ExpressBusAdapter {
    client: Option<TagoClient>,
    terminals: HubTable,
}

impl ExpressBusAdapter {
    /// `client` is `None` when no service key is configured.
    pub fn new(client: Option<TagoClient>) -> Self {
        Self {
            client,
            terminals: HubTable::express_bus_terminals(),
        }
    }

    /// Replace the terminal table.
    pub fn with_terminals(mut self, terminals: HubTable) -> Self {
        self.terminals = terminals;
        self
    }
}

#[async_trait]
impl ItineraryProvider for ExpressBusAdapter {
    fn name(&self) -> &'static str {
        "tago-express-bus"
    }

    async fn resolve(&self, request: &ProviderRequest) -> Availability {
        let Some(client) = &self.client else {
            return settle(self.name(), request.mode, Err(not_configured()));
        };
        let (from, to) = match match_hubs(&self.terminals, request, "bus terminal") {
            Ok(pair) => pair,
            Err(reason) => return Availability::Unavailable(reason),
        };

        let endpoints = endpoints(request);
        let result = client
            .express_bus_schedule(&from.id, &to.id, travel_date(request))
            .await
            .map(|items| {
                after_departure(convert_express_bus_items(&items, endpoints), request)
            });

        settle(self.name(), request.mode, result)
    }
}

/// Train schedules between the stations nearest the two places.
#[derive(Debug, Clone)]
pub struct RailAdapter {
    client: Option<TagoClient>,
    stations: HubTable,
}

impl RailAdapter {
    /// `client` is `None` when no service key is configured.
    pub fn new(client: Option<TagoClient>) -> Self {
        Self {
            client,
            stations: HubTable::rail_stations(),
        }
    }

    /// Replace the station table.
    pub fn with_stations(mut self, stations: HubTable) -> Self {
        self.stations = stations;
        self
    }
}

#[async_trait]
impl ItineraryProvider for RailAdapter {
    fn name(&self) -> &'static str {
        "tago-rail"
    }

    async fn resolve(&self, request: &ProviderRequest) -> Availability {
        let Some(client) = &self.client else {
            return settle(self.name(), request.mode, Err(not_configured()));
        };
        let (from, to) = match match_hubs(&self.stations, request, "rail station") {
            Ok(pair) => pair,
            Err(reason) => return Availability::Unavailable(reason),
        };

        let endpoints = endpoints(request);
        let result = client
            .train_schedule(&from.id, &to.id, travel_date(request))
            .await
            .map(|items| after_departure(convert_train_items(&items, endpoints), request));

        settle(self.name(), request.mode, result)
    }
}

fn not_configured() -> ProviderError {
    ProviderError::NotConfigured(TAGO_SERVICE_KEY_VAR)
}

fn endpoints(request: &ProviderRequest) -> Endpoints<'_> {
    Endpoints {
        origin: &request.origin.address,
        destination: &request.destination.address,
    }
}

/// Find hubs for both ends; both must exist and differ.
fn match_hubs<'a>(
    hubs: &'a HubTable,
    request: &ProviderRequest,
    kind: &'static str,
) -> Result<(&'a Hub, &'a Hub), Unavailable> {
    let from = hubs.nearest(&request.origin.location);
    let to = hubs.nearest(&request.destination.location);
    match (from, to) {
        (Some(from), Some(to)) if from.id != to.id => Ok((from, to)),
        (Some(_), Some(_)) => {
            tracing::debug!(kind, "origin and destination share a hub");
            Err(Unavailable::NoRecords)
        }
        _ => {
            tracing::debug!(kind, mode = %request.mode, "no hub near place");
            Err(Unavailable::NoNearbyHub(kind))
        }
    }
}

fn travel_date(request: &ProviderRequest) -> NaiveDate {
    request
        .departure
        .map(|d| d.date())
        .unwrap_or_else(|| Local::now().date_naive())
}

/// Drop departures earlier than the requested departure time.
fn after_departure(
    mut options: Vec<ItineraryOption>,
    request: &ProviderRequest,
) -> Vec<ItineraryOption> {
    if let Some(wanted) = request.departure {
        options.retain(|o| o.departure_clock.is_none_or(|t| t >= wanted.time()));
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeoPoint, ModeId, Place, RoutePreference};

    fn request(mode: ModeId, origin: GeoPoint, destination: GeoPoint) -> ProviderRequest {
        ProviderRequest {
            origin: Place::new("current location", origin),
            destination: Place::new("Busan Station", destination),
            mode,
            departure: None,
            route_preference: RoutePreference::default(),
        }
    }

    fn seoul() -> GeoPoint {
        GeoPoint::new(37.5665, 126.9780)
    }

    fn busan() -> GeoPoint {
        GeoPoint::new(35.1151, 129.0422)
    }

    #[tokio::test]
    async fn unconfigured_rail_is_unavailable() {
        let adapter = RailAdapter::new(None);
        let availability = adapter.resolve(&request(ModeId::Rail, seoul(), busan())).await;
        assert_eq!(availability, Availability::Unavailable(Unavailable::NotConfigured));
    }

    #[tokio::test]
    async fn place_far_from_any_hub_is_unavailable() {
        let client = TagoClient::new(TagoConfig::new("key")).unwrap();
        let adapter = RailAdapter::new(Some(client));
        let jeju = GeoPoint::new(33.4996, 126.5312);
        let availability = adapter.resolve(&request(ModeId::Rail, seoul(), jeju)).await;
        assert_eq!(
            availability,
            Availability::Unavailable(Unavailable::NoNearbyHub("rail station"))
        );
    }

    #[tokio::test]
    async fn transport_failure_is_unavailable() {
        // Nothing listens on port 9 locally; the connection is refused.
        let config = TagoConfig::new("key")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(2);
        let adapter = ExpressBusAdapter::new(Some(TagoClient::new(config).unwrap()));
        let availability = adapter
            .resolve(&request(ModeId::Bus, seoul(), GeoPoint::new(35.2840, 129.0960)))
            .await;
        assert!(matches!(
            availability,
            Availability::Unavailable(Unavailable::Failed(_))
        ));
    }
}
