//! Data transfer objects for web requests and responses.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{
    GeoPoint, ItineraryOption, ModeId, Place, RoutePreference, RouteStep, SortPolicy,
    SourceQuality, StepRole, TripDraft, Vehicle,
};
use crate::trip::{Stage, TripPlanner};

/// Formats accepted for a departure time.
const DEPARTURE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// A confirmed place.
#[derive(Debug, Deserialize)]
pub struct PlaceRequest {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl PlaceRequest {
    /// Validate coordinates and build a place.
    pub fn into_place(self) -> Result<Place, String> {
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude)
        {
            return Err(format!(
                "coordinates out of range: {}, {}",
                self.latitude, self.longitude
            ));
        }
        let address = self.address.trim();
        if address.is_empty() {
            return Err("address must not be empty".to_string());
        }
        Ok(Place::new(address, GeoPoint::new(self.latitude, self.longitude)))
    }
}

/// Free-text destination lookup.
#[derive(Debug, Deserialize)]
pub struct DestinationSearchRequest {
    pub query: String,
}

/// Where the device currently is. Both fields absent clears it.
#[derive(Debug, Deserialize)]
pub struct DeviceLocationRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Departure time and length of stay.
#[derive(Debug, Deserialize)]
pub struct DepartureRequest {
    /// `YYYY-MM-DDTHH:MM`; absent clears the departure time
    pub departure: Option<String>,
    pub travel_days: Option<u32>,
}

impl DepartureRequest {
    pub fn parsed_departure(&self) -> Result<Option<NaiveDateTime>, String> {
        let Some(text) = self.departure.as_deref().map(str::trim) else {
            return Ok(None);
        };
        DEPARTURE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .map(Some)
            .ok_or_else(|| format!("invalid departure time: {text}"))
    }
}

/// Request to resolve a mode's options.
#[derive(Debug, Deserialize)]
pub struct OptionsRequest {
    pub mode: ModeId,
    #[serde(default)]
    pub sort: SortPolicy,
    pub route_preference: Option<RoutePreference>,
}

/// Select an option from the stored list.
#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub mode: ModeId,
    pub index: usize,
}

/// Read-only resolution; all modes when `mode` is absent.
#[derive(Debug, Deserialize)]
pub struct ItinerariesQuery {
    pub mode: Option<ModeId>,
    #[serde(default)]
    pub sort: SortPolicy,
}

/// A route step.
#[derive(Debug, Serialize)]
pub struct StepView {
    pub label: String,
    pub role: StepRole,
    pub walk_minutes: Option<i64>,
    pub transit_minutes: Option<i64>,
    pub vehicle: Option<Vehicle>,
}

impl From<&RouteStep> for StepView {
    fn from(step: &RouteStep) -> Self {
        Self {
            label: step.label.clone(),
            role: step.role,
            walk_minutes: step.walk.map(|d| d.num_minutes()),
            transit_minutes: step.transit.map(|d| d.num_minutes()),
            vehicle: step.vehicle,
        }
    }
}

/// An itinerary option as rendered to clients.
#[derive(Debug, Serialize)]
pub struct OptionView {
    pub mode: ModeId,
    pub display_name: String,
    pub price: String,
    pub total_duration: String,
    /// HH:MM
    pub departure_clock: Option<String>,
    /// HH:MM
    pub arrival_clock: Option<String>,
    pub distance: Option<String>,
    pub steps: Vec<StepView>,
    pub rank_label: Option<String>,
    pub note: Option<String>,
    pub source_quality: SourceQuality,
}

impl From<&ItineraryOption> for OptionView {
    fn from(option: &ItineraryOption) -> Self {
        Self {
            mode: option.mode,
            display_name: option.display_name.clone(),
            price: option.price.to_string(),
            total_duration: option.total_duration.to_string(),
            departure_clock: option.departure_clock.map(|t| t.format("%H:%M").to_string()),
            arrival_clock: option.arrival_clock.map(|t| t.format("%H:%M").to_string()),
            distance: option.distance.map(|d| d.to_string()),
            steps: option.steps.iter().map(StepView::from).collect(),
            rank_label: option.rank_label.clone(),
            note: option.note.clone(),
            source_quality: option.source_quality,
        }
    }
}

pub fn option_views(options: &[ItineraryOption]) -> Vec<OptionView> {
    options.iter().map(OptionView::from).collect()
}

/// The planning session.
#[derive(Debug, Serialize)]
pub struct TripView {
    pub stage: Stage,
    pub draft: TripDraft,
    pub options: Option<Vec<OptionView>>,
    pub selected: Option<OptionView>,
}

impl From<&TripPlanner> for TripView {
    fn from(planner: &TripPlanner) -> Self {
        Self {
            stage: planner.stage(),
            draft: planner.draft().clone(),
            options: planner.options().map(option_views),
            selected: planner.selected_option().map(OptionView::from),
        }
    }
}

/// Result of entering option selection.
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub mode: ModeId,
    pub sort: SortPolicy,
    /// False when a newer request replaced this one before it finished
    pub committed: bool,
    pub options: Vec<OptionView>,
}

/// One mode's read-only resolution.
#[derive(Debug, Serialize)]
pub struct ModeItineraries {
    pub mode: ModeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
