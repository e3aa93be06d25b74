//! Travel-data provider adapters.
//!
//! Each adapter wraps exactly one upstream source and converts its
//! responses into [`ItineraryOption`]s. Adapters never fail: a missing
//! credential, a transport error, an upstream error code, a malformed body
//! or an empty result all come back as [`Availability::Unavailable`], which
//! the resolution pipeline absorbs by falling back to the static catalog.
//!
//! Upstream sources:
//! - `tago` - Korean public-data express bus and train schedules
//! - `kakao` - Kakao Mobility road routing
//! - `odsay` - ODsay urban public-transit path search

mod error;
mod http;
pub mod hub;
pub mod kakao;
pub mod odsay;
pub mod tago;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::domain::{ItineraryOption, ModeId, Place, RoutePreference};

pub use error::ProviderError;
pub use hub::{Hub, HubTable};

/// What an adapter is asked to resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub origin: Place,
    pub destination: Place,
    pub mode: ModeId,
    pub departure: Option<NaiveDateTime>,
    pub route_preference: RoutePreference,
}

/// Why an adapter could not serve a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Unavailable {
    /// No credential configured for this source
    #[error("provider not configured")]
    NotConfigured,

    /// Origin or destination is not near any hub the source knows
    #[error("no {0} near the requested place")]
    NoNearbyHub(&'static str),

    /// The call failed (transport, upstream error, malformed body)
    #[error("provider call failed: {0}")]
    Failed(String),

    /// The call succeeded but produced nothing usable
    #[error("provider returned no usable records")]
    NoRecords,
}

/// Outcome of one adapter call.
#[derive(Debug, Clone, PartialEq)]
pub enum Availability {
    Available(Vec<ItineraryOption>),
    Unavailable(Unavailable),
}

impl Availability {
    /// Wrap a converted list, treating an empty one as unavailable.
    pub fn from_options(options: Vec<ItineraryOption>) -> Self {
        if options.is_empty() {
            Availability::Unavailable(Unavailable::NoRecords)
        } else {
            Availability::Available(options)
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available(_))
    }
}

/// One upstream travel-data source.
///
/// Implementations must be cheap to share (`Arc<dyn ItineraryProvider>`)
/// and must not touch any state outside their own client.
#[async_trait]
pub trait ItineraryProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Resolve options for the request, or report why not.
    async fn resolve(&self, request: &ProviderRequest) -> Availability;
}

/// Turn an adapter's internal result into an [`Availability`], logging
/// the reason when it is unavailable.
pub(crate) fn settle(
    provider: &'static str,
    mode: ModeId,
    result: Result<Vec<ItineraryOption>, ProviderError>,
) -> Availability {
    match result {
        Ok(options) => {
            let availability = Availability::from_options(options);
            if !availability.is_available() {
                tracing::debug!(provider, %mode, "provider returned no usable records");
            }
            availability
        }
        Err(ProviderError::NotConfigured(what)) => {
            tracing::debug!(provider, %mode, missing = what, "provider not configured");
            Availability::Unavailable(Unavailable::NotConfigured)
        }
        Err(e) => {
            tracing::warn!(provider, %mode, error = %e, "provider call failed");
            Availability::Unavailable(Unavailable::Failed(e.to_string()))
        }
    }
}
