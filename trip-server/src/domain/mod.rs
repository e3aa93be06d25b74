//! Domain types for the trip planner.
//!
//! This module contains the core value types shared by the providers, the
//! fallback catalog, the resolution pipeline and the trip state machine.
//! Types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod draft;
mod error;
mod geo;
mod itinerary;
mod measure;
mod mode;

pub use draft::{CURRENT_LOCATION_LABEL, DESTINATION_LABEL, Selection, TripDraft};
pub use error::DomainError;
pub use geo::{Distance, GeoPoint, Place};
pub use itinerary::{ItineraryOption, RouteStep, RouteSteps, SourceQuality, StepRole};
pub use measure::{Price, TravelDuration, parse_duration_minutes, parse_price};
pub use mode::{ModeId, RoutePreference, SortPolicy, UnknownMode, Vehicle};
