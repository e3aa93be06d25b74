//! The trip planning state machine.
//!
//! The planner owns the draft and the most recently resolved option list,
//! and decides which transitions are legal. Resolution itself is done by
//! the pipeline, in three steps so a caller can release its lock while the
//! providers run: [`TripPlanner::begin_resolution`] hands out a [`Ticket`],
//! the caller resolves, and [`TripPlanner::commit`] stores the result only
//! if the ticket is still current.
//!
//! Tickets carry a per-mode generation. A commit is superseded when a newer
//! ticket was issued for the mode, when another mode has been requested
//! since, or when the origin or destination changed in between. Ordering is
//! decided by the generation check, never by timing.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::{
    CURRENT_LOCATION_LABEL, GeoPoint, ItineraryOption, ModeId, Place, RoutePreference, Selection,
    SortPolicy, TripDraft,
};
use crate::geocode::{GeocodeError, Geocoder, reverse_or_coordinates};
use crate::planner::{ItineraryPipeline, MissingPlace, ResolveError};

use super::error::{PlanError, SelectionError};

/// Origin used when the device location is unknown (Seoul City Hall).
pub const DEFAULT_ORIGIN: GeoPoint = GeoPoint::new(37.5665, 126.9780);

/// Planning stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Idle,
    PlanningRoute,
    ModeSelection,
    OptionSelection,
    ResultsReady,
}

/// Permission to commit one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    mode: ModeId,
    generation: u64,
}

impl Ticket {
    pub fn mode(&self) -> ModeId {
        self.mode
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Committed,
    /// The ticket was no longer current; the result was discarded.
    Superseded,
}

#[derive(Debug, Clone)]
struct StoredList {
    mode: ModeId,
    generation: u64,
    options: Vec<ItineraryOption>,
}

/// One user's planning session.
#[derive(Debug, Clone)]
pub struct TripPlanner {
    stage: Stage,
    draft: TripDraft,
    device_place: Option<Place>,
    generations: HashMap<ModeId, u64>,
    stored: Option<StoredList>,
}

impl Default for TripPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl TripPlanner {
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            draft: TripDraft::new(),
            device_place: None,
            generations: HashMap::new(),
            stored: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn draft(&self) -> &TripDraft {
        &self.draft
    }

    /// The stored list, if it belongs to the requested mode.
    pub fn options(&self) -> Option<&[ItineraryOption]> {
        self.stored
            .as_ref()
            .filter(|s| Some(s.mode) == self.draft.requested_mode)
            .map(|s| s.options.as_slice())
    }

    /// The option the current selection points at.
    pub fn selected_option(&self) -> Option<&ItineraryOption> {
        let selection = self.draft.selected?;
        self.options()?.get(selection.index)
    }

    /// Record where the device is, for defaulting the origin.
    ///
    /// The place is expected to be named already; see [`name_location`].
    pub fn set_device_location(&mut self, place: Option<Place>) {
        self.device_place = place;
    }

    /// Reverse-geocode `location` and record it as the device location.
    ///
    /// The geocoder only names the fix; the coordinates stay the device's.
    pub async fn locate_device(&mut self, geocoder: &dyn Geocoder, location: GeoPoint) {
        let place = name_location(geocoder, location).await;
        self.set_device_location(Some(place));
    }

    /// Begin a new plan from scratch. Legal from any stage.
    pub fn start_planning(&mut self) {
        self.draft = TripDraft::new();
        self.stored = None;
        self.bump_all();
        self.stage = Stage::PlanningRoute;
        tracing::debug!("planning started");
    }

    pub fn set_origin(&mut self, origin: Place) -> Result<(), PlanError> {
        self.require_plan()?;
        self.draft.origin = Some(origin);
        self.inputs_changed();
        Ok(())
    }

    pub fn set_destination(&mut self, destination: Place) -> Result<(), PlanError> {
        self.require_plan()?;
        self.draft.destination = Some(destination);
        self.inputs_changed();
        Ok(())
    }

    /// Look `text` up and make it the destination.
    pub async fn confirm_destination(
        &mut self,
        geocoder: &dyn Geocoder,
        text: &str,
    ) -> Result<Place, PlanError> {
        self.require_plan()?;
        let place = find_place(geocoder, text).await?;
        self.set_destination(place.clone())?;
        Ok(place)
    }

    pub fn set_departure_time(&mut self, departure: Option<NaiveDateTime>) -> Result<(), PlanError> {
        self.require_plan()?;
        if self.draft.departure != departure {
            self.draft.departure = departure;
            self.inputs_changed();
        }
        Ok(())
    }

    pub fn set_route_preference(&mut self, preference: RoutePreference) -> Result<(), PlanError> {
        self.require_plan()?;
        self.apply_route_preference(preference);
        Ok(())
    }

    pub fn set_travel_days(&mut self, days: u32) -> Result<(), PlanError> {
        self.require_plan()?;
        self.draft
            .set_travel_days(days)
            .map_err(|e| PlanError::validation(e.to_string()))
    }

    /// Move to mode selection, defaulting the origin if none was chosen.
    ///
    /// The default origin is the device location when known, otherwise
    /// [`DEFAULT_ORIGIN`] labelled "current location". Coming back from a
    /// later stage drops the selection.
    pub fn enter_mode_selection(&mut self) -> Result<(), PlanError> {
        self.require_plan()?;
        if self.draft.destination.is_none() {
            return Err(PlanError::validation("choose a destination first"));
        }
        if self.draft.origin.is_none() {
            let origin = self
                .device_place
                .clone()
                .unwrap_or_else(|| Place::new(CURRENT_LOCATION_LABEL, DEFAULT_ORIGIN));
            self.draft.origin = Some(origin);
        }
        self.draft.selected = None;
        self.stage = Stage::ModeSelection;
        Ok(())
    }

    /// Request `mode` and issue a ticket for resolving it.
    ///
    /// Returns a snapshot of the draft to resolve against. A route
    /// preference is applied only once the stage and places check out.
    /// Requesting a different mode clears the selection.
    pub fn begin_resolution(
        &mut self,
        mode: ModeId,
        preference: Option<RoutePreference>,
    ) -> Result<(Ticket, TripDraft), PlanError> {
        if self.stage < Stage::ModeSelection {
            return Err(PlanError::validation("choose where you are going first"));
        }
        if self.draft.origin.is_none() {
            return Err(ResolveError::IncompletePlan {
                missing: MissingPlace::Origin,
            }
            .into());
        }
        if self.draft.destination.is_none() {
            return Err(ResolveError::IncompletePlan {
                missing: MissingPlace::Destination,
            }
            .into());
        }

        if let Some(preference) = preference {
            self.apply_route_preference(preference);
        }
        if self.draft.requested_mode != Some(mode) {
            self.draft.selected = None;
            if self.stage == Stage::ResultsReady {
                self.stage = Stage::OptionSelection;
            }
        }
        self.draft.requested_mode = Some(mode);

        let generation = self.generations.entry(mode).or_insert(0);
        *generation += 1;
        let ticket = Ticket {
            mode,
            generation: *generation,
        };
        tracing::debug!(%mode, generation = ticket.generation, "resolution started");
        Ok((ticket, self.draft.clone()))
    }

    /// Store a resolved list if `ticket` is still current.
    pub fn commit(&mut self, ticket: Ticket, options: Vec<ItineraryOption>) -> Commit {
        if !self.is_current(ticket) {
            tracing::debug!(
                mode = %ticket.mode,
                generation = ticket.generation,
                "discarding superseded resolution"
            );
            return Commit::Superseded;
        }

        self.stored = Some(StoredList {
            mode: ticket.mode,
            generation: ticket.generation,
            options,
        });
        self.draft.selected = None;
        self.stage = Stage::OptionSelection;
        Commit::Committed
    }

    /// Begin, resolve and commit in one call.
    pub async fn enter_option_selection(
        &mut self,
        pipeline: &ItineraryPipeline,
        mode: ModeId,
        sort: SortPolicy,
    ) -> Result<Commit, PlanError> {
        let (ticket, draft) = self.begin_resolution(mode, None)?;
        let options = pipeline.resolve(&draft, mode, sort).await?;
        Ok(self.commit(ticket, options))
    }

    /// Select entry `index` of `mode`'s list.
    ///
    /// A list that is missing, for another mode, or from an older resolution
    /// is stale: the selection is refused and the list dropped so it gets
    /// resolved again. An index out of range leaves everything unchanged.
    pub fn select_option(&mut self, mode: ModeId, index: usize) -> Result<(), PlanError> {
        if self.draft.requested_mode != Some(mode) {
            return Err(SelectionError::WrongMode { selected: mode }.into());
        }
        let Some(stored) = &self.stored else {
            return Err(SelectionError::NoList.into());
        };
        let latest = self.generations.get(&mode).copied().unwrap_or(0);
        if stored.mode != mode || stored.generation != latest {
            self.stored = None;
            self.draft.selected = None;
            if self.stage > Stage::ModeSelection {
                self.stage = Stage::ModeSelection;
            }
            return Err(SelectionError::Stale(mode).into());
        }
        if index >= stored.options.len() {
            return Err(SelectionError::OutOfRange {
                index,
                len: stored.options.len(),
            }
            .into());
        }

        self.draft.selected = Some(Selection::new(mode, index));
        self.stage = Stage::OptionSelection;
        Ok(())
    }

    /// Show the chosen option.
    pub fn enter_results(&mut self) -> Result<&ItineraryOption, PlanError> {
        if self.stage < Stage::OptionSelection || self.selected_option().is_none() {
            return Err(PlanError::validation("select an option first"));
        }
        self.stage = Stage::ResultsReady;
        self.selected_option()
            .ok_or_else(|| PlanError::validation("select an option first"))
    }

    fn require_plan(&self) -> Result<(), PlanError> {
        if self.stage == Stage::Idle {
            return Err(PlanError::validation("start planning a trip first"));
        }
        Ok(())
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.draft.requested_mode == Some(ticket.mode)
            && self.generations.get(&ticket.mode) == Some(&ticket.generation)
    }

    /// Outdate every issued ticket.
    fn bump_all(&mut self) {
        for generation in self.generations.values_mut() {
            *generation += 1;
        }
    }

    fn apply_route_preference(&mut self, preference: RoutePreference) {
        if self.draft.route_preference != preference {
            self.draft.route_preference = preference;
            self.inputs_changed();
        }
    }

    /// Something the stored list was resolved from changed: a place, the
    /// departure time or the route preference.
    fn inputs_changed(&mut self) {
        self.bump_all();
        self.stored = None;
        self.draft.selected = None;
        if self.stage > Stage::ModeSelection {
            self.stage = Stage::ModeSelection;
        }
    }
}

/// Name a device fix by reverse geocoding, keeping its coordinates.
///
/// Needs no session, so callers can run it without holding one.
pub async fn name_location(geocoder: &dyn Geocoder, location: GeoPoint) -> Place {
    let named = reverse_or_coordinates(geocoder, location).await;
    Place::new(named.address, location)
}

/// Forward-geocode `text`, mapping lookup failures to user-facing messages.
///
/// Needs no session, so callers can run it without holding one.
pub async fn find_place(geocoder: &dyn Geocoder, text: &str) -> Result<Place, PlanError> {
    geocoder.forward(text).await.map_err(|e| match e {
        GeocodeError::NotFound(_) => {
            PlanError::validation(format!("could not find a place called \"{text}\""))
        }
        GeocodeError::Service(_) => PlanError::validation("address lookup is unavailable"),
    })
}
