//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::geocode::Geocoder;
use crate::planner::ItineraryPipeline;
use crate::trip::TripPlanner;

/// Shared application state.
///
/// The server hosts a single planning session. The session lock is never
/// held while providers are queried.
#[derive(Clone)]
pub struct AppState {
    /// Resolution pipeline (registry, catalog, config)
    pub pipeline: Arc<ItineraryPipeline>,

    /// Address lookup for destination search
    pub geocoder: Arc<dyn Geocoder>,

    /// The planning session
    pub session: Arc<Mutex<TripPlanner>>,
}

impl AppState {
    /// Create a new app state with a fresh session.
    pub fn new(pipeline: ItineraryPipeline, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            geocoder,
            session: Arc::new(Mutex::new(TripPlanner::new())),
        }
    }
}
