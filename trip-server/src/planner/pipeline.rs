//! The itinerary resolution pipeline.
//!
//! For one mode: ask the registered provider, fall back to the catalog when
//! it has nothing, apply the aggregator view, then the sort policy. The
//! pipeline holds no mutable state; identical inputs give identical output
//! apart from what live providers return.

use std::fmt;

use futures::future::join_all;

use crate::catalog::FallbackCatalog;
use crate::domain::{ItineraryOption, ModeId, Place, SortPolicy, TripDraft};
use crate::providers::{Availability, ProviderRequest};

use super::config::PipelineConfig;
use super::rank::{aggregator_view, sort_by_policy};
use super::registry::ProviderRegistry;

/// Which endpoint of the trip is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPlace {
    Origin,
    Destination,
}

impl fmt::Display for MissingPlace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingPlace::Origin => write!(f, "origin"),
            MissingPlace::Destination => write!(f, "destination"),
        }
    }
}

/// Error from resolution. Provider failures never surface here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("incomplete plan: {missing} is not set")]
    IncompletePlan { missing: MissingPlace },
}

/// Resolves a draft and a mode into an ordered list of options.
#[derive(Debug, Clone)]
pub struct ItineraryPipeline {
    registry: ProviderRegistry,
    catalog: FallbackCatalog,
    config: PipelineConfig,
}

impl ItineraryPipeline {
    pub fn new(registry: ProviderRegistry, config: PipelineConfig) -> Self {
        Self {
            registry,
            catalog: FallbackCatalog::new(),
            config,
        }
    }

    /// Resolve options for `mode`.
    ///
    /// Fails only when the draft lacks an origin or destination. The list is
    /// never empty otherwise: if the provider is missing, unavailable, or
    /// its results do not survive the mode's view, the catalog serves.
    pub async fn resolve(
        &self,
        draft: &TripDraft,
        mode: ModeId,
        sort: SortPolicy,
    ) -> Result<Vec<ItineraryOption>, ResolveError> {
        let (origin, destination) = require_places(draft)?;
        let limit = self.config.aggregator_limit;

        let live = match self.registry.get(mode) {
            Some(provider) => {
                let request = ProviderRequest {
                    origin: origin.clone(),
                    destination: destination.clone(),
                    mode,
                    departure: draft.departure,
                    route_preference: draft.route_preference,
                };
                match provider.resolve(&request).await {
                    Availability::Available(options) => {
                        let view = aggregator_view(mode, options, limit);
                        if view.is_empty() {
                            tracing::debug!(%mode, "no live options survive the mode view");
                        }
                        Some(view).filter(|v| !v.is_empty())
                    }
                    Availability::Unavailable(reason) => {
                        tracing::debug!(%mode, provider = provider.name(), %reason, "using catalog");
                        None
                    }
                }
            }
            None => None,
        };

        let mut options = match live {
            Some(options) => options,
            None => aggregator_view(mode, self.catalog.lookup(mode, draft), limit),
        };
        sort_by_policy(&mut options, sort);

        tracing::debug!(%mode, ?sort, count = options.len(), "resolved itineraries");
        Ok(options)
    }

    /// Resolve several modes concurrently.
    ///
    /// Results come back in the order of `modes`; nothing is stored.
    pub async fn prefetch(
        &self,
        draft: &TripDraft,
        modes: &[ModeId],
        sort: SortPolicy,
    ) -> Vec<(ModeId, Result<Vec<ItineraryOption>, ResolveError>)> {
        let futures = modes.iter().map(|&mode| async move {
            (mode, self.resolve(draft, mode, sort).await)
        });
        join_all(futures).await
    }
}

fn require_places(draft: &TripDraft) -> Result<(&Place, &Place), ResolveError> {
    let origin = draft.origin.as_ref().ok_or(ResolveError::IncompletePlan {
        missing: MissingPlace::Origin,
    })?;
    let destination = draft.destination.as_ref().ok_or(ResolveError::IncompletePlan {
        missing: MissingPlace::Destination,
    })?;
    Ok((origin, destination))
}
