//! Configuration for itinerary resolution.

use crate::cache::CacheConfig;
use crate::providers::hub::DEFAULT_HUB_RADIUS_M;

/// Configuration parameters for the resolution pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// How many options an aggregator mode keeps after ranking or filtering.
    pub aggregator_limit: usize,

    /// Maximum distance (metres) from a place to a terminal or station for
    /// the schedule adapters to use it.
    pub hub_radius_m: f64,

    /// Memoization of live provider calls.
    pub cache: CacheConfig,
}

impl PipelineConfig {
    pub fn with_aggregator_limit(mut self, limit: usize) -> Self {
        self.aggregator_limit = limit;
        self
    }

    pub fn with_hub_radius(mut self, meters: f64) -> Self {
        self.hub_radius_m = meters;
        self
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            aggregator_limit: 5,
            hub_radius_m: DEFAULT_HUB_RADIUS_M,
            cache: CacheConfig::default(),
        }
    }
}
