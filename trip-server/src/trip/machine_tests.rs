//! Tests for the trip planning state machine.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::*;
use crate::domain::{
    GeoPoint, ModeId, Place, RoutePreference, Selection, SortPolicy, SourceQuality,
};
use crate::geocode::Gazetteer;
use crate::planner::{ItineraryPipeline, PipelineConfig, ProviderRegistry};
use crate::providers::{Availability, ItineraryProvider, ProviderRequest, Unavailable};

/// Never has data; counts how often it was asked.
#[derive(Default)]
struct Offline {
    calls: AtomicUsize,
}

#[async_trait]
impl ItineraryProvider for Offline {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn resolve(&self, _request: &ProviderRequest) -> Availability {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Availability::Unavailable(Unavailable::NotConfigured)
    }
}

fn busan_station() -> Place {
    Place::new("Busan Station", GeoPoint::new(35.1151, 129.0422))
}

fn daejeon_station() -> Place {
    Place::new("Daejeon Station", GeoPoint::new(36.3324, 127.4342))
}

fn catalog_pipeline() -> ItineraryPipeline {
    ItineraryPipeline::new(ProviderRegistry::new(), PipelineConfig::default())
}

/// A planner sitting in mode selection with Busan Station as destination.
fn ready_planner() -> TripPlanner {
    let mut planner = TripPlanner::new();
    planner.start_planning();
    planner.set_destination(busan_station()).unwrap();
    planner.enter_mode_selection().unwrap();
    planner
}

fn is_validation(result: Result<(), PlanError>) -> bool {
    matches!(result, Err(PlanError::ValidationFailed(_)))
}

#[test]
fn starts_idle_and_rejects_edits() {
    let mut planner = TripPlanner::new();
    assert_eq!(planner.stage(), Stage::Idle);
    assert!(is_validation(planner.set_destination(busan_station())));
    assert!(is_validation(planner.set_travel_days(2)));
    assert!(is_validation(planner.enter_mode_selection()));
    assert_eq!(planner.draft().destination, None);
}

#[test]
fn start_planning_resets_the_draft() {
    let mut planner = ready_planner();
    planner.set_travel_days(3).unwrap();

    planner.start_planning();

    assert_eq!(planner.stage(), Stage::PlanningRoute);
    assert_eq!(planner.draft().destination, None);
    assert_eq!(planner.draft().travel_days, 1);
    assert!(planner.options().is_none());
}

#[test]
fn mode_selection_needs_a_destination() {
    let mut planner = TripPlanner::new();
    planner.start_planning();

    let err = planner.enter_mode_selection().unwrap_err();
    assert_eq!(err.to_string(), "choose a destination first");
    assert_eq!(planner.stage(), Stage::PlanningRoute);
}

#[test]
fn origin_defaults_to_city_hall() {
    let planner = ready_planner();

    let origin = planner.draft().origin.as_ref().unwrap();
    assert_eq!(origin.address, "current location");
    assert_eq!(origin.location, DEFAULT_ORIGIN);
    assert_eq!(origin.location, GeoPoint::new(37.5665, 126.9780));
}

#[tokio::test]
async fn origin_prefers_reverse_geocoded_device_location() {
    let mut planner = TripPlanner::new();
    let here = GeoPoint::new(37.4979, 127.0276);
    planner.locate_device(&Gazetteer::korea(), here).await;
    planner.start_planning();
    planner.set_destination(busan_station()).unwrap();
    planner.enter_mode_selection().unwrap();

    let origin = planner.draft().origin.as_ref().unwrap();
    assert_eq!(origin.address, "강남역");
    assert_eq!(origin.location, GeoPoint::new(37.4979, 127.0276));
}

#[tokio::test]
async fn unnamed_device_location_uses_coordinates() {
    let mut planner = TripPlanner::new();
    planner
        .locate_device(&Gazetteer::korea(), GeoPoint::new(36.0, 128.0))
        .await;
    planner.start_planning();
    planner.set_destination(busan_station()).unwrap();
    planner.enter_mode_selection().unwrap();

    let origin = planner.draft().origin.as_ref().unwrap();
    assert_eq!(origin.address, "36.00000, 128.00000");
}

#[test]
fn travel_days_must_be_positive() {
    let mut planner = ready_planner();
    let err = planner.set_travel_days(0).unwrap_err();
    assert_eq!(err, PlanError::ValidationFailed("travel days must be at least 1".into()));
    assert_eq!(planner.draft().travel_days, 1);
}

#[test]
fn resolution_needs_mode_selection() {
    let mut planner = TripPlanner::new();
    planner.start_planning();
    planner.set_destination(busan_station()).unwrap();

    assert!(matches!(
        planner.begin_resolution(ModeId::Rail, None),
        Err(PlanError::ValidationFailed(_))
    ));
    assert_eq!(planner.draft().requested_mode, None);
}

#[tokio::test]
async fn busan_station_by_rail_end_to_end() {
    let mut planner = ready_planner();
    let pipeline = catalog_pipeline();

    let commit = planner
        .enter_option_selection(&pipeline, ModeId::Rail, SortPolicy::Default)
        .await
        .unwrap();
    assert_eq!(commit, Commit::Committed);
    assert_eq!(planner.stage(), Stage::OptionSelection);

    let options = planner.options().unwrap();
    assert_eq!(options.len(), 3);
    assert!(options.iter().all(|o| o.source_quality == SourceQuality::Fallback));
    assert_eq!(options[0].steps.first().label, "current location");
    assert_eq!(options[0].steps.last().label, "Busan Station");

    planner
        .enter_option_selection(&pipeline, ModeId::Rail, SortPolicy::Cost)
        .await
        .unwrap();
    assert_eq!(planner.options().unwrap()[0].display_name, "ITX-새마을");

    planner.select_option(ModeId::Rail, 0).unwrap();
    let chosen = planner.enter_results().unwrap();
    assert_eq!(chosen.display_name, "ITX-새마을");
    assert_eq!(planner.stage(), Stage::ResultsReady);
}

#[tokio::test]
async fn bus_selection_in_and_out_of_range() {
    let mut planner = ready_planner();
    planner
        .enter_option_selection(&catalog_pipeline(), ModeId::Bus, SortPolicy::Default)
        .await
        .unwrap();

    planner.select_option(ModeId::Bus, 1).unwrap();
    assert_eq!(planner.draft().selected, Some(Selection::new(ModeId::Bus, 1)));

    let err = planner.select_option(ModeId::Bus, 5).unwrap_err();
    assert_eq!(
        err,
        PlanError::InvalidSelection(SelectionError::OutOfRange { index: 5, len: 3 })
    );
    assert_eq!(planner.draft().selected, Some(Selection::new(ModeId::Bus, 1)));
    assert_eq!(planner.options().map(<[_]>::len), Some(3));
}

#[tokio::test]
async fn results_need_a_selection() {
    let mut planner = ready_planner();
    planner
        .enter_option_selection(&catalog_pipeline(), ModeId::Air, SortPolicy::Default)
        .await
        .unwrap();

    assert!(matches!(
        planner.enter_results(),
        Err(PlanError::ValidationFailed(_))
    ));
    assert_eq!(planner.stage(), Stage::OptionSelection);
}

#[tokio::test]
async fn selection_for_another_mode_is_refused() {
    let mut planner = ready_planner();
    planner
        .enter_option_selection(&catalog_pipeline(), ModeId::Bus, SortPolicy::Default)
        .await
        .unwrap();

    let err = planner.select_option(ModeId::Rail, 0).unwrap_err();
    assert_eq!(
        err,
        PlanError::InvalidSelection(SelectionError::WrongMode {
            selected: ModeId::Rail
        })
    );
}

#[tokio::test]
async fn changing_mode_clears_selection() {
    let mut planner = ready_planner();
    let pipeline = catalog_pipeline();
    planner
        .enter_option_selection(&pipeline, ModeId::Bus, SortPolicy::Default)
        .await
        .unwrap();
    planner.select_option(ModeId::Bus, 2).unwrap();

    planner
        .enter_option_selection(&pipeline, ModeId::Drive, SortPolicy::Default)
        .await
        .unwrap();

    assert_eq!(planner.draft().selected, None);
    assert_eq!(planner.draft().requested_mode, Some(ModeId::Drive));
    assert_eq!(planner.options().unwrap()[0].display_name, "자가용 (경부고속도로)");
}

#[tokio::test]
async fn destination_change_invalidates_and_re_resolves() {
    let rail = Arc::new(Offline::default());
    let registry = ProviderRegistry::new().with(ModeId::Rail, rail.clone());
    let pipeline = ItineraryPipeline::new(registry, PipelineConfig::default());

    let mut planner = ready_planner();
    planner
        .enter_option_selection(&pipeline, ModeId::Rail, SortPolicy::Default)
        .await
        .unwrap();
    planner.select_option(ModeId::Rail, 0).unwrap();
    assert_eq!(rail.calls.load(Ordering::SeqCst), 1);

    planner.set_destination(daejeon_station()).unwrap();

    assert_eq!(planner.stage(), Stage::ModeSelection);
    assert!(planner.options().is_none());
    assert_eq!(planner.draft().selected, None);

    planner
        .enter_option_selection(&pipeline, ModeId::Rail, SortPolicy::Default)
        .await
        .unwrap();
    assert_eq!(rail.calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        planner.options().unwrap()[0].steps.last().label,
        "Daejeon Station"
    );
}

#[tokio::test]
async fn preference_change_clears_the_list() {
    let mut planner = ready_planner();
    planner
        .enter_option_selection(&catalog_pipeline(), ModeId::Drive, SortPolicy::Default)
        .await
        .unwrap();

    planner.set_route_preference(RoutePreference::AvoidHighway).unwrap();

    assert!(planner.options().is_none());
    assert_eq!(planner.stage(), Stage::ModeSelection);
}

#[test]
fn refused_resolution_keeps_route_preference() {
    let mut planner = TripPlanner::new();
    planner.start_planning();
    planner.set_destination(busan_station()).unwrap();

    let result = planner.begin_resolution(ModeId::Drive, Some(RoutePreference::AvoidHighway));
    assert!(matches!(result, Err(PlanError::ValidationFailed(_))));
    assert_eq!(planner.draft().route_preference, RoutePreference::Recommended);
}

#[tokio::test]
async fn resolution_applies_route_preference() {
    let mut planner = ready_planner();
    planner
        .enter_option_selection(&catalog_pipeline(), ModeId::Drive, SortPolicy::Default)
        .await
        .unwrap();
    planner.select_option(ModeId::Drive, 0).unwrap();

    let (ticket, snapshot) = planner
        .begin_resolution(ModeId::Drive, Some(RoutePreference::TimeOptimized))
        .unwrap();
    assert_eq!(snapshot.route_preference, RoutePreference::TimeOptimized);
    assert_eq!(planner.draft().selected, None);
    assert!(planner.options().is_none());
    assert_eq!(planner.commit(ticket, Vec::new()), Commit::Committed);
}

#[tokio::test]
async fn back_to_mode_selection_drops_selection() {
    let mut planner = ready_planner();
    planner
        .enter_option_selection(&catalog_pipeline(), ModeId::Bus, SortPolicy::Default)
        .await
        .unwrap();
    planner.select_option(ModeId::Bus, 1).unwrap();
    planner.enter_results().unwrap();

    planner.enter_mode_selection().unwrap();
    assert_eq!(planner.stage(), Stage::ModeSelection);
    assert_eq!(planner.draft().selected, None);
    assert!(matches!(
        planner.enter_results(),
        Err(PlanError::ValidationFailed(_))
    ));
    assert_eq!(planner.stage(), Stage::ModeSelection);
}

#[test]
fn newer_ticket_supersedes_older() {
    let mut planner = ready_planner();
    let (first, _) = planner.begin_resolution(ModeId::Rail, None).unwrap();
    let (second, _) = planner.begin_resolution(ModeId::Rail, None).unwrap();
    assert!(second.generation() > first.generation());

    assert_eq!(planner.commit(second, Vec::new()), Commit::Committed);
    assert_eq!(planner.commit(first, Vec::new()), Commit::Superseded);
}

#[test]
fn other_mode_request_supersedes_ticket() {
    let mut planner = ready_planner();
    let (rail, _) = planner.begin_resolution(ModeId::Rail, None).unwrap();
    let (bus, _) = planner.begin_resolution(ModeId::Bus, None).unwrap();

    assert_eq!(planner.commit(rail, Vec::new()), Commit::Superseded);
    assert_eq!(planner.commit(bus, Vec::new()), Commit::Committed);
    assert_eq!(planner.draft().requested_mode, Some(ModeId::Bus));
}

#[tokio::test]
async fn place_change_during_resolution_discards_result() {
    let mut planner = ready_planner();
    let (ticket, snapshot) = planner.begin_resolution(ModeId::Rail, None).unwrap();

    planner.set_destination(daejeon_station()).unwrap();
    let options = catalog_pipeline()
        .resolve(&snapshot, ModeId::Rail, SortPolicy::Default)
        .await
        .unwrap();

    assert_eq!(planner.commit(ticket, options), Commit::Superseded);
    assert!(planner.options().is_none());
}

#[tokio::test]
async fn stale_list_selection_clears_it() {
    let mut planner = ready_planner();
    planner
        .enter_option_selection(&catalog_pipeline(), ModeId::Rail, SortPolicy::Default)
        .await
        .unwrap();

    // A newer resolution is in flight; the stored list is outdated.
    let _ticket = planner.begin_resolution(ModeId::Rail, None).unwrap();
    let err = planner.select_option(ModeId::Rail, 0).unwrap_err();

    assert_eq!(err, PlanError::InvalidSelection(SelectionError::Stale(ModeId::Rail)));
    assert!(planner.options().is_none());
    assert_eq!(planner.draft().selected, None);

    let err = planner.select_option(ModeId::Rail, 0).unwrap_err();
    assert_eq!(err, PlanError::InvalidSelection(SelectionError::NoList));
}

#[tokio::test]
async fn confirm_destination_uses_geocoder() {
    let mut planner = TripPlanner::new();
    planner.start_planning();
    let gazetteer = Gazetteer::korea();

    let place = planner
        .confirm_destination(&gazetteer, "Busan Station")
        .await
        .unwrap();
    assert_eq!(place.address, "부산역");
    assert_eq!(planner.draft().destination.as_ref(), Some(&place));

    let err = planner
        .confirm_destination(&gazetteer, "Atlantis")
        .await
        .unwrap_err();
    assert!(matches!(err, PlanError::ValidationFailed(msg) if msg.contains("Atlantis")));
    assert_eq!(planner.draft().destination.as_ref(), Some(&place));
}
