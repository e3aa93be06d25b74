//! Itinerary resolution.
//!
//! The pipeline picks a provider for the requested mode from the registry,
//! falls back to the static catalog when the provider has nothing, and
//! orders the result by the aggregator view and the sort policy.

mod config;
mod pipeline;
mod rank;
mod registry;

#[cfg(test)]
mod pipeline_tests;

pub use config::PipelineConfig;
pub use pipeline::{ItineraryPipeline, MissingPlace, ResolveError};
pub use rank::{aggregator_view, sort_by_policy};
pub use registry::ProviderRegistry;
