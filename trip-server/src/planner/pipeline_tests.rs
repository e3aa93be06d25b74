//! Tests for the resolution pipeline with stub providers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::*;
use crate::config::Credentials;
use crate::domain::{
    GeoPoint, ItineraryOption, ModeId, Place, Price, RouteStep, RouteSteps, SortPolicy,
    SourceQuality, TravelDuration, TripDraft, Vehicle,
};
use crate::providers::{Availability, ItineraryProvider, ProviderRequest, Unavailable};

/// Returns a fixed answer and counts calls.
struct Stub {
    answer: Availability,
    calls: AtomicUsize,
}

impl Stub {
    fn new(answer: Availability) -> Arc<Self> {
        Arc::new(Self {
            answer,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItineraryProvider for Stub {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn resolve(&self, _request: &ProviderRequest) -> Availability {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}

fn live(mode: ModeId, name: &str, price: u64, minutes: u32, vehicle: Vehicle) -> ItineraryOption {
    ItineraryOption::new(
        mode,
        name,
        Price::from_won(price),
        TravelDuration::from_minutes(minutes),
        RouteSteps::through("서울역", RouteStep::via(name).with_vehicle(vehicle), "부산역"),
        SourceQuality::Live,
    )
}

fn draft() -> TripDraft {
    TripDraft {
        origin: Some(Place::new("서울역", GeoPoint::new(37.5547, 126.9707))),
        destination: Some(Place::new("부산역", GeoPoint::new(35.1151, 129.0422))),
        ..TripDraft::default()
    }
}

fn names(options: &[ItineraryOption]) -> Vec<&str> {
    options.iter().map(|o| o.display_name.as_str()).collect()
}

fn pipeline(registry: ProviderRegistry) -> ItineraryPipeline {
    ItineraryPipeline::new(registry, PipelineConfig::default())
}

#[tokio::test]
async fn missing_places_are_reported() {
    let pipeline = pipeline(ProviderRegistry::new());

    let mut no_destination = draft();
    no_destination.destination = None;
    assert_eq!(
        pipeline.resolve(&no_destination, ModeId::Bus, SortPolicy::Default).await,
        Err(ResolveError::IncompletePlan {
            missing: MissingPlace::Destination
        })
    );

    let mut no_origin = draft();
    no_origin.origin = None;
    let err = pipeline
        .resolve(&no_origin, ModeId::Bus, SortPolicy::Default)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "incomplete plan: origin is not set");
}

#[tokio::test]
async fn every_mode_resolves_without_credentials() {
    let registry =
        ProviderRegistry::from_credentials(&Credentials::default(), &PipelineConfig::default());
    let pipeline = pipeline(registry);

    for mode in ModeId::ALL {
        for sort in [SortPolicy::Default, SortPolicy::Time, SortPolicy::Cost] {
            let options = pipeline.resolve(&draft(), mode, sort).await.unwrap();
            assert!(!options.is_empty(), "{mode} resolved to nothing");
            assert!(
                options
                    .iter()
                    .all(|o| o.source_quality == SourceQuality::Fallback)
            );
        }
    }
}

#[tokio::test]
async fn live_results_replace_the_catalog() {
    let stub = Stub::new(Availability::Available(vec![
        live(ModeId::Rail, "KTX 101", 59_800, 160, Vehicle::Train),
        live(ModeId::Rail, "무궁화호 1201", 28_600, 330, Vehicle::Train),
    ]));
    let pipeline = pipeline(ProviderRegistry::new().with(ModeId::Rail, stub.clone()));

    let options = pipeline
        .resolve(&draft(), ModeId::Rail, SortPolicy::Cost)
        .await
        .unwrap();

    assert_eq!(names(&options), ["무궁화호 1201", "KTX 101"]);
    assert!(options.iter().all(|o| o.source_quality == SourceQuality::Live));
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn unavailable_provider_falls_back() {
    let stub = Stub::new(Availability::Unavailable(Unavailable::Failed("timeout".into())));
    let pipeline = pipeline(ProviderRegistry::new().with(ModeId::Bus, stub.clone()));

    let options = pipeline
        .resolve(&draft(), ModeId::Bus, SortPolicy::Default)
        .await
        .unwrap();

    assert_eq!(names(&options), ["고속버스", "시외버스", "프리미엄 고속버스"]);
    assert_eq!(options[0].steps.first().label, "서울역");
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn modes_without_provider_use_catalog() {
    let stub = Stub::new(Availability::Unavailable(Unavailable::NoRecords));
    let pipeline = pipeline(ProviderRegistry::new().with(ModeId::Rail, stub.clone()));

    let options = pipeline
        .resolve(&draft(), ModeId::Air, SortPolicy::Cost)
        .await
        .unwrap();

    assert_eq!(names(&options), ["제주항공", "아시아나항공", "대한항공"]);
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn vehicle_view_without_matches_falls_back() {
    let stub = Stub::new(Availability::Available(vec![live(
        ModeId::Subway,
        "472번",
        1_500,
        70,
        Vehicle::CityBus,
    )]));
    let pipeline = pipeline(ProviderRegistry::new().with(ModeId::Subway, stub));

    let options = pipeline
        .resolve(&draft(), ModeId::Subway, SortPolicy::Default)
        .await
        .unwrap();

    assert!(options.iter().all(|o| o.steps.uses(Vehicle::Subway)));
    assert!(options.iter().all(|o| o.source_quality == SourceQuality::Fallback));
}

#[tokio::test]
async fn ranking_mode_is_ranked_and_truncated() {
    let paths = (0..7)
        .map(|i| {
            live(
                ModeId::TransitMinTime,
                &format!("path-{i}"),
                1_500,
                90 - i * 10,
                Vehicle::Subway,
            )
        })
        .collect();
    let stub = Stub::new(Availability::Available(paths));
    let pipeline = pipeline(ProviderRegistry::new().with(ModeId::TransitMinTime, stub));

    let options = pipeline
        .resolve(&draft(), ModeId::TransitMinTime, SortPolicy::Default)
        .await
        .unwrap();

    assert_eq!(options.len(), 5);
    assert_eq!(options[0].display_name, "path-6");
    assert_eq!(options[0].rank_label.as_deref(), Some("1위 - 최단시간"));
    assert_eq!(options[4].rank_label.as_deref(), Some("5위"));
}

#[tokio::test]
async fn explicit_sort_runs_after_ranking() {
    let pipeline = pipeline(ProviderRegistry::new());

    let options = pipeline
        .resolve(&draft(), ModeId::TransitMinTime, SortPolicy::Cost)
        .await
        .unwrap();

    assert_eq!(names(&options), ["SRT", "KTX", "비행기 (대한항공)"]);
    // Authored labels travel with their option.
    assert_eq!(options[2].rank_label.as_deref(), Some("1위 - 최단시간"));
}

#[tokio::test]
async fn resolve_is_idempotent() {
    let pipeline = pipeline(ProviderRegistry::new());

    for mode in ModeId::ALL {
        let first = pipeline.resolve(&draft(), mode, SortPolicy::Time).await;
        let second = pipeline.resolve(&draft(), mode, SortPolicy::Time).await;
        assert_eq!(first, second);
    }
}

#[tokio::test]
async fn prefetch_returns_one_result_per_mode() {
    let rail = Stub::new(Availability::Available(vec![live(
        ModeId::Rail,
        "KTX 101",
        59_800,
        160,
        Vehicle::Train,
    )]));
    let pipeline = pipeline(ProviderRegistry::new().with(ModeId::Rail, rail.clone()));

    let modes = [ModeId::Bus, ModeId::Rail, ModeId::Cycle];
    let results = pipeline.prefetch(&draft(), &modes, SortPolicy::Default).await;

    let got: Vec<ModeId> = results.iter().map(|(mode, _)| *mode).collect();
    assert_eq!(got, modes);
    assert!(results.iter().all(|(_, r)| r.as_ref().is_ok_and(|o| !o.is_empty())));
    assert_eq!(rail.calls(), 1);

    let mut incomplete = draft();
    incomplete.origin = None;
    let results = pipeline.prefetch(&incomplete, &modes, SortPolicy::Default).await;
    assert!(results.iter().all(|(_, r)| r.is_err()));
}
