//! The trip being planned.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::geo::Place;
use super::mode::{ModeId, RoutePreference};

/// Label shown for an origin that has not been named.
pub const CURRENT_LOCATION_LABEL: &str = "current location";

/// Label shown for a destination that has not been named.
pub const DESTINATION_LABEL: &str = "destination";

/// A selected option: which mode's list, and which entry in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub mode: ModeId,
    pub index: usize,
}

impl Selection {
    pub fn new(mode: ModeId, index: usize) -> Self {
        Self { mode, index }
    }
}

/// The user's draft trip.
///
/// Owned by the trip planner; resolution only ever reads it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripDraft {
    pub origin: Option<Place>,
    pub destination: Option<Place>,
    pub departure: Option<NaiveDateTime>,
    pub travel_days: u32,
    pub route_preference: RoutePreference,
    pub requested_mode: Option<ModeId>,
    pub selected: Option<Selection>,
}

impl Default for TripDraft {
    fn default() -> Self {
        Self {
            origin: None,
            destination: None,
            departure: None,
            travel_days: 1,
            route_preference: RoutePreference::default(),
            requested_mode: None,
            selected: None,
        }
    }
}

impl TripDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address of the origin, or the current-location placeholder.
    pub fn origin_label(&self) -> &str {
        self.origin
            .as_ref()
            .map_or(CURRENT_LOCATION_LABEL, |p| p.address.as_str())
    }

    /// Address of the destination, or the generic placeholder.
    pub fn destination_label(&self) -> &str {
        self.destination
            .as_ref()
            .map_or(DESTINATION_LABEL, |p| p.address.as_str())
    }

    pub fn set_travel_days(&mut self, days: u32) -> Result<(), DomainError> {
        if days == 0 {
            return Err(DomainError::InvalidTravelDays);
        }
        self.travel_days = days;
        Ok(())
    }
}
