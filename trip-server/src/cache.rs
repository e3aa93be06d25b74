//! Caching layer for provider responses.
//!
//! Only successful lookups are memoized. An unavailable provider is asked
//! again on the next request so a transient failure does not pin the
//! catalog fallback for a whole TTL.
//!
//! Coordinates are keyed on a ~10 m grid. Place labels are part of the key
//! because converted options embed them in their route steps.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use moka::future::Cache as MokaCache;

use crate::domain::{ItineraryOption, ModeId, RoutePreference};
use crate::providers::{Availability, ItineraryProvider, ProviderRequest};

/// Cache key for one provider call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RequestKey {
    mode: ModeId,
    origin: (i64, i64),
    destination: (i64, i64),
    origin_label: String,
    destination_label: String,
    departure: Option<NaiveDateTime>,
    route_preference: RoutePreference,
}

impl RequestKey {
    fn new(request: &ProviderRequest) -> Self {
        Self {
            mode: request.mode,
            origin: request.origin.location.grid_key(),
            destination: request.destination.location.grid_key(),
            origin_label: request.origin.address.clone(),
            destination_label: request.destination.address.clone(),
            departure: request.departure,
            route_preference: request.route_preference,
        }
    }
}

type Entry = Arc<Vec<ItineraryOption>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }
}

/// A provider with memoized results.
///
/// Wraps any [`ItineraryProvider`] and is one itself, so the registry can
/// hold cached and uncached adapters side by side.
pub struct CachedProvider<P> {
    inner: P,
    entries: MokaCache<RequestKey, Entry>,
}

impl<P: ItineraryProvider> CachedProvider<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, entries }
    }

    /// Access the wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.entries.invalidate_all();
    }
}

#[async_trait]
impl<P: ItineraryProvider> ItineraryProvider for CachedProvider<P> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn resolve(&self, request: &ProviderRequest) -> Availability {
        let key = RequestKey::new(request);

        // Try cache first
        if let Some(cached) = self.entries.get(&key).await {
            tracing::debug!(provider = self.name(), mode = %request.mode, "provider cache hit");
            return Availability::Available(cached.as_ref().clone());
        }

        let availability = self.inner.resolve(request).await;
        if let Availability::Available(options) = &availability {
            self.entries.insert(key, Arc::new(options.clone())).await;
        }

        availability
    }
}
