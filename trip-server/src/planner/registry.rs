//! Mode → provider mapping.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::cache::CachedProvider;
use crate::config::Credentials;
use crate::domain::ModeId;
use crate::providers::kakao::{DriveAdapter, KakaoClient, KakaoConfig};
use crate::providers::odsay::{OdsayClient, OdsayConfig, TransitAdapter};
use crate::providers::tago::{ExpressBusAdapter, RailAdapter, TagoClient, TagoConfig};
use crate::providers::{HubTable, ItineraryProvider, ProviderError};

use super::config::PipelineConfig;

/// Which provider serves each mode.
///
/// A mode with no entry is served from the catalog alone.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ModeId, Arc<dyn ItineraryProvider>>,
}

impl ProviderRegistry {
    /// An empty registry: every mode falls back to the catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` for `mode`, replacing any previous one.
    pub fn register(&mut self, mode: ModeId, provider: Arc<dyn ItineraryProvider>) {
        self.providers.insert(mode, provider);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, mode: ModeId, provider: Arc<dyn ItineraryProvider>) -> Self {
        self.register(mode, provider);
        self
    }

    pub fn get(&self, mode: ModeId) -> Option<&Arc<dyn ItineraryProvider>> {
        self.providers.get(&mode)
    }

    /// Modes with a registered provider, in tab order.
    pub fn modes(&self) -> Vec<ModeId> {
        ModeId::ALL
            .into_iter()
            .filter(|m| self.providers.contains_key(m))
            .collect()
    }

    /// Build the standard registry: express bus and rail from TAGO, driving
    /// from Kakao, and the four transit views from one ODsay adapter, each
    /// behind a cache.
    ///
    /// Adapters are registered even without a credential; they then report
    /// themselves unavailable.
    pub fn from_credentials(credentials: &Credentials, config: &PipelineConfig) -> Self {
        let tago = build_client(
            "tago",
            credentials.tago_service_key.as_deref(),
            |key| TagoClient::new(TagoConfig::new(key)),
        );
        let kakao = build_client(
            "kakao",
            credentials.kakao_rest_api_key.as_deref(),
            |key| KakaoClient::new(KakaoConfig::new(key)),
        );
        let odsay = build_client(
            "odsay",
            credentials.odsay_api_key.as_deref(),
            |key| OdsayClient::new(OdsayConfig::new(key)),
        );

        let express_bus = ExpressBusAdapter::new(tago.clone()).with_terminals(
            HubTable::express_bus_terminals().with_radius(config.hub_radius_m),
        );
        let rail = RailAdapter::new(tago)
            .with_stations(HubTable::rail_stations().with_radius(config.hub_radius_m));

        let transit: Arc<dyn ItineraryProvider> = Arc::new(CachedProvider::new(
            TransitAdapter::new(odsay),
            &config.cache,
        ));

        let mut registry = Self::new()
            .with(
                ModeId::Bus,
                Arc::new(CachedProvider::new(express_bus, &config.cache)),
            )
            .with(
                ModeId::Rail,
                Arc::new(CachedProvider::new(rail, &config.cache)),
            )
            .with(
                ModeId::Drive,
                Arc::new(CachedProvider::new(DriveAdapter::new(kakao), &config.cache)),
            );
        for mode in ModeId::ALL.into_iter().filter(ModeId::is_aggregator) {
            registry.register(mode, Arc::clone(&transit));
        }
        registry
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for mode in self.modes() {
            if let Some(provider) = self.providers.get(&mode) {
                map.entry(&mode.as_str(), &provider.name());
            }
        }
        map.finish()
    }
}

/// Construct a client when a key is present; a client that cannot be built
/// is logged and treated as unconfigured.
fn build_client<C>(
    source: &'static str,
    key: Option<&str>,
    build: impl FnOnce(&str) -> Result<C, ProviderError>,
) -> Option<C> {
    let key = key?;
    match build(key) {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::warn!(source, error = %e, "failed to build provider client");
            None
        }
    }
}
