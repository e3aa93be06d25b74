//! Itinerary options and their route steps.

use chrono::{Duration, NaiveTime};
use serde::Serialize;

use super::error::DomainError;
use super::geo::Distance;
use super::measure::{Price, TravelDuration};
use super::mode::{ModeId, Vehicle};

/// Position of a step within a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepRole {
    Start,
    Via,
    End,
}

/// One labelled segment of an itinerary's physical path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteStep {
    pub label: String,
    pub role: StepRole,
    /// Walking needed to reach this step.
    pub walk: Option<Duration>,
    /// Time spent riding this step.
    pub transit: Option<Duration>,
    pub vehicle: Option<Vehicle>,
}

impl RouteStep {
    pub fn new(label: impl Into<String>, role: StepRole) -> Self {
        Self {
            label: label.into(),
            role,
            walk: None,
            transit: None,
            vehicle: None,
        }
    }

    pub fn start(label: impl Into<String>) -> Self {
        Self::new(label, StepRole::Start)
    }

    pub fn via(label: impl Into<String>) -> Self {
        Self::new(label, StepRole::Via)
    }

    pub fn end(label: impl Into<String>) -> Self {
        Self::new(label, StepRole::End)
    }

    pub fn with_walk(mut self, walk: Duration) -> Self {
        self.walk = Some(walk);
        self
    }

    pub fn with_transit(mut self, transit: Duration) -> Self {
        self.transit = Some(transit);
        self
    }

    pub fn with_vehicle(mut self, vehicle: Vehicle) -> Self {
        self.vehicle = Some(vehicle);
        self
    }
}

/// An ordered route: one start, any number of vias, one end.
///
/// The invariant is checked at construction, so code holding a
/// `RouteSteps` can rely on `first()` and `last()` being the endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSteps(Vec<RouteStep>);

impl RouteSteps {
    pub fn new(steps: Vec<RouteStep>) -> Result<Self, DomainError> {
        if steps.len() < 2 {
            return Err(DomainError::RouteTooShort);
        }
        let last = steps.len() - 1;
        for (idx, step) in steps.iter().enumerate() {
            let expected = match idx {
                0 => StepRole::Start,
                i if i == last => StepRole::End,
                _ => StepRole::Via,
            };
            if step.role != expected {
                return Err(DomainError::InvalidRoute(match expected {
                    StepRole::Start => "first step must be a start",
                    StepRole::End => "last step must be an end",
                    StepRole::Via => "interior steps must be vias",
                }));
            }
        }
        Ok(Self(steps))
    }

    /// The minimal synthesized route: start, one provider segment, end.
    pub fn through(start: impl Into<String>, via: RouteStep, end: impl Into<String>) -> Self {
        let via = RouteStep { role: StepRole::Via, ..via };
        Self(vec![RouteStep::start(start), via, RouteStep::end(end)])
    }

    pub fn as_slice(&self) -> &[RouteStep] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteStep> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> &RouteStep {
        &self.0[0]
    }

    pub fn last(&self) -> &RouteStep {
        &self.0[self.0.len() - 1]
    }

    /// Whether any step rides the given vehicle.
    pub fn uses(&self, vehicle: Vehicle) -> bool {
        self.0.iter().any(|s| s.vehicle == Some(vehicle))
    }
}

/// Where an option's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceQuality {
    Live,
    Fallback,
}

/// One concrete travel proposal for a mode.
///
/// Options are values: a resolution produces fresh ones and nothing edits
/// them afterwards, except the pipeline attaching a rank label before the
/// list is handed out.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryOption {
    pub mode: ModeId,
    pub display_name: String,
    pub price: Price,
    pub total_duration: TravelDuration,
    pub departure_clock: Option<NaiveTime>,
    pub arrival_clock: Option<NaiveTime>,
    pub distance: Option<Distance>,
    pub steps: RouteSteps,
    pub rank_label: Option<String>,
    pub note: Option<String>,
    pub source_quality: SourceQuality,
}

impl ItineraryOption {
    /// Create an option with the required fields; the rest start empty.
    pub fn new(
        mode: ModeId,
        display_name: impl Into<String>,
        price: Price,
        total_duration: TravelDuration,
        steps: RouteSteps,
        source_quality: SourceQuality,
    ) -> Self {
        Self {
            mode,
            display_name: display_name.into(),
            price,
            total_duration,
            departure_clock: None,
            arrival_clock: None,
            distance: None,
            steps,
            rank_label: None,
            note: None,
            source_quality,
        }
    }

    pub fn with_clocks(mut self, departure: Option<NaiveTime>, arrival: Option<NaiveTime>) -> Self {
        self.departure_clock = departure;
        self.arrival_clock = arrival;
        self
    }

    pub fn with_distance(mut self, distance: Distance) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn with_rank_label(mut self, label: impl Into<String>) -> Self {
        self.rank_label = Some(label.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Parsed price used for sorting.
    pub fn price_amount(&self) -> Option<u64> {
        self.price.amount()
    }

    /// Parsed duration used for sorting.
    pub fn duration_minutes(&self) -> u32 {
        self.total_duration.minutes()
    }
}
