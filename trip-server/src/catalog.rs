//! Static fallback itineraries.
//!
//! Hand-authored exemplars per mode, served whenever no live provider
//! produces data. Entries are shaped exactly like live options and differ
//! only in being tagged [`SourceQuality::Fallback`]. Ranking modes carry
//! their rank labels pre-assigned; the order of each table is the order
//! served.

use chrono::{Duration, NaiveTime};

use crate::domain::{
    Distance, ItineraryOption, ModeId, Price, RouteStep, RouteSteps, SourceQuality,
    TravelDuration, TripDraft, Vehicle,
};

/// One authored catalog row.
struct Entry {
    name: &'static str,
    price: &'static str,
    duration: &'static str,
    /// Departure and arrival as (hour, minute).
    clocks: Option<((u32, u32), (u32, u32))>,
    /// Text of the via step.
    via: &'static str,
    vehicle: Vehicle,
    distance_km: Option<u32>,
    rank: Option<&'static str>,
    note: Option<&'static str>,
}

impl Entry {
    const fn scheduled(
        name: &'static str,
        price: &'static str,
        duration: &'static str,
        departure: (u32, u32),
        arrival: (u32, u32),
        via: &'static str,
        vehicle: Vehicle,
    ) -> Self {
        Self {
            name,
            price,
            duration,
            clocks: Some((departure, arrival)),
            via,
            vehicle,
            distance_km: None,
            rank: None,
            note: None,
        }
    }

    const fn ranked(self, rank: &'static str) -> Self {
        Self {
            rank: Some(rank),
            ..self
        }
    }
}

const EXPRESS_BUS: Entry = Entry::scheduled(
    "고속버스",
    "15,000원",
    "4시간 30분",
    (9, 0),
    (13, 30),
    "서울고속버스터미널 → 부산종합버스터미널",
    Vehicle::ExpressBus,
);
const INTERCITY_BUS: Entry = Entry::scheduled(
    "시외버스",
    "12,000원",
    "5시간",
    (10, 0),
    (15, 0),
    "동서울터미널 → 부산서부터미널",
    Vehicle::ExpressBus,
);
const PREMIUM_BUS: Entry = Entry::scheduled(
    "프리미엄 고속버스",
    "25,000원",
    "4시간 15분",
    (8, 30),
    (12, 45),
    "서울고속버스터미널 → 부산종합버스터미널",
    Vehicle::ExpressBus,
);

const KTX: Entry = Entry::scheduled(
    "KTX",
    "59,800원",
    "2시간 40분",
    (9, 0),
    (11, 40),
    "서울역 → 부산역",
    Vehicle::Train,
);
const SRT: Entry = Entry::scheduled(
    "SRT",
    "52,300원",
    "2시간 50분",
    (10, 0),
    (12, 50),
    "수서역 → 부산역",
    Vehicle::Train,
);
const ITX_SAEMAEUL: Entry = Entry::scheduled(
    "ITX-새마을",
    "42,100원",
    "4시간 20분",
    (8, 30),
    (12, 50),
    "서울역 → 부산역",
    Vehicle::Train,
);

const KOREAN_AIR: Entry = Entry::scheduled(
    "대한항공",
    "89,000원",
    "1시간 10분",
    (9, 0),
    (10, 10),
    "김포공항 → 김해공항",
    Vehicle::Airplane,
);

static BUS: [Entry; 3] = [EXPRESS_BUS, INTERCITY_BUS, PREMIUM_BUS];

static RAIL: [Entry; 3] = [KTX, SRT, ITX_SAEMAEUL];

static AIR: [Entry; 3] = [
    KOREAN_AIR,
    Entry::scheduled(
        "아시아나항공",
        "85,000원",
        "1시간 5분",
        (10, 30),
        (11, 35),
        "김포공항 → 김해공항",
        Vehicle::Airplane,
    ),
    Entry::scheduled(
        "제주항공",
        "65,000원",
        "1시간 10분",
        (11, 0),
        (12, 10),
        "김포공항 → 김해공항",
        Vehicle::Airplane,
    ),
];

static DRIVE: [Entry; 1] = [Entry {
    name: "자가용 (경부고속도로)",
    price: "통행료 약 45,000원 + 유류비",
    duration: "약 4시간 30분",
    clocks: None,
    via: "경부고속도로",
    vehicle: Vehicle::Car,
    distance_km: Some(400),
    rank: None,
    note: None,
}];

static CYCLE: [Entry; 1] = [Entry {
    name: "자전거 (국토종주 코스)",
    price: "0원 (무료)",
    duration: "약 2-3일",
    clocks: None,
    via: "국토종주 자전거길",
    vehicle: Vehicle::Bicycle,
    distance_km: Some(400),
    rank: None,
    note: Some("숙박 및 식사 비용 별도"),
}];

static MIN_TIME: [Entry; 3] = [
    Entry {
        name: "비행기 (대한항공)",
        ..KOREAN_AIR
    }
    .ranked("1위 - 최단시간"),
    KTX.ranked("2위"),
    SRT.ranked("3위"),
];

static MIN_COST: [Entry; 3] = [
    INTERCITY_BUS.ranked("1위 - 최저비용"),
    EXPRESS_BUS.ranked("2위"),
    ITX_SAEMAEUL.ranked("3위"),
];

static CITY_BUS: [Entry; 2] = [
    Entry::scheduled(
        "간선버스 472번",
        "1,500원",
        "1시간 10분",
        (9, 0),
        (10, 10),
        "472번 신사역 → 시청",
        Vehicle::CityBus,
    ),
    Entry::scheduled(
        "광역버스 M4101번",
        "3,000원",
        "55분",
        (9, 10),
        (10, 5),
        "M4101번 세종시청 → 서울역",
        Vehicle::CityBus,
    ),
];

static SUBWAY: [Entry; 2] = [
    Entry::scheduled(
        "수도권 2호선",
        "1,400원",
        "40분",
        (9, 0),
        (9, 40),
        "2호선 시청 → 강남",
        Vehicle::Subway,
    ),
    Entry::scheduled(
        "수도권 1호선 → 신분당선",
        "1,650원",
        "1시간 5분",
        (9, 5),
        (10, 10),
        "1호선 서울역 → 신분당선 판교",
        Vehicle::Subway,
    ),
];

/// Static itineraries keyed by mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackCatalog;

impl FallbackCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Authored options for `mode`, routed between the draft's place labels.
    ///
    /// Never empty. Missing places render as the "current location" and
    /// "destination" placeholders.
    pub fn lookup(&self, mode: ModeId, draft: &TripDraft) -> Vec<ItineraryOption> {
        let origin = draft.origin_label();
        let destination = draft.destination_label();

        entries(mode)
            .iter()
            .map(|entry| build(mode, entry, origin, destination))
            .collect()
    }
}

fn entries(mode: ModeId) -> &'static [Entry] {
    match mode {
        ModeId::Bus => &BUS,
        ModeId::Rail => &RAIL,
        ModeId::Air => &AIR,
        ModeId::Drive => &DRIVE,
        ModeId::Cycle => &CYCLE,
        ModeId::TransitMinTime => &MIN_TIME,
        ModeId::TransitMinCost => &MIN_COST,
        ModeId::CityBus => &CITY_BUS,
        ModeId::Subway => &SUBWAY,
    }
}

fn build(mode: ModeId, entry: &Entry, origin: &str, destination: &str) -> ItineraryOption {
    let duration = TravelDuration::label(entry.duration);
    let via = RouteStep::via(entry.via)
        .with_transit(Duration::minutes(i64::from(duration.minutes())))
        .with_vehicle(entry.vehicle);

    let mut option = ItineraryOption::new(
        mode,
        entry.name,
        Price::label(entry.price),
        duration,
        RouteSteps::through(origin, via, destination),
        SourceQuality::Fallback,
    );

    if let Some(((dh, dm), (ah, am))) = entry.clocks {
        option = option.with_clocks(
            NaiveTime::from_hms_opt(dh, dm, 0),
            NaiveTime::from_hms_opt(ah, am, 0),
        );
    }
    if let Some(km) = entry.distance_km {
        option = option.with_distance(Distance::approx_km(km));
    }
    if let Some(rank) = entry.rank {
        option = option.with_rank_label(rank);
    }
    if let Some(note) = entry.note {
        option = option.with_note(note);
    }
    option
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeoPoint, Place, StepRole};

    fn names(options: &[ItineraryOption]) -> Vec<&str> {
        options.iter().map(|o| o.display_name.as_str()).collect()
    }

    #[test]
    fn every_mode_has_entries() {
        let draft = TripDraft::new();
        for mode in ModeId::ALL {
            let options = FallbackCatalog::new().lookup(mode, &draft);
            assert!(!options.is_empty(), "{mode} has no catalog entries");
            assert!(options.iter().all(|o| o.mode == mode));
            assert!(
                options
                    .iter()
                    .all(|o| o.source_quality == SourceQuality::Fallback)
            );
        }
    }

    #[test]
    fn authored_counts() {
        let draft = TripDraft::new();
        let count = |mode| FallbackCatalog::new().lookup(mode, &draft).len();
        assert_eq!(count(ModeId::Bus), 3);
        assert_eq!(count(ModeId::Rail), 3);
        assert_eq!(count(ModeId::Air), 3);
        assert_eq!(count(ModeId::Drive), 1);
        assert_eq!(count(ModeId::Cycle), 1);
        assert_eq!(count(ModeId::TransitMinTime), 3);
        assert_eq!(count(ModeId::TransitMinCost), 3);
        assert_eq!(count(ModeId::CityBus), 2);
        assert_eq!(count(ModeId::Subway), 2);
    }

    #[test]
    fn rail_table() {
        let options = FallbackCatalog::new().lookup(ModeId::Rail, &TripDraft::new());
        assert_eq!(names(&options), ["KTX", "SRT", "ITX-새마을"]);
        assert_eq!(options[0].price.as_str(), "59,800원");
        assert_eq!(options[0].total_duration.as_str(), "2시간 40분");
        assert_eq!(options[0].departure_clock, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(options[0].arrival_clock, NaiveTime::from_hms_opt(11, 40, 0));
    }

    #[test]
    fn steps_use_draft_labels() {
        let mut draft = TripDraft::new();
        let options = FallbackCatalog::new().lookup(ModeId::Bus, &draft);
        assert_eq!(options[0].steps.first().label, "current location");
        assert_eq!(options[0].steps.last().label, "destination");

        draft.destination = Some(Place::new("Busan Station", GeoPoint::new(35.1151, 129.0422)));
        let options = FallbackCatalog::new().lookup(ModeId::Bus, &draft);
        let steps = options[0].steps.as_slice();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[1].role, StepRole::Via);
        assert_eq!(steps[1].vehicle, Some(Vehicle::ExpressBus));
        assert_eq!(steps[2].label, "Busan Station");
    }

    #[test]
    fn ranking_modes_are_prelabelled_in_key_order() {
        let draft = TripDraft::new();

        let by_time = FallbackCatalog::new().lookup(ModeId::TransitMinTime, &draft);
        assert_eq!(by_time[0].display_name, "비행기 (대한항공)");
        assert_eq!(by_time[0].rank_label.as_deref(), Some("1위 - 최단시간"));
        assert!(by_time.windows(2).all(|w| w[0].duration_minutes() <= w[1].duration_minutes()));

        let by_cost = FallbackCatalog::new().lookup(ModeId::TransitMinCost, &draft);
        assert_eq!(names(&by_cost), ["시외버스", "고속버스", "ITX-새마을"]);
        assert_eq!(by_cost[0].rank_label.as_deref(), Some("1위 - 최저비용"));
        assert_eq!(by_cost[2].rank_label.as_deref(), Some("3위"));
        assert!(by_cost.windows(2).all(|w| w[0].price_amount() <= w[1].price_amount()));
    }

    #[test]
    fn cycling_route_carries_note_and_distance() {
        let options = FallbackCatalog::new().lookup(ModeId::Cycle, &TripDraft::new());
        let bike = &options[0];
        assert_eq!(bike.note.as_deref(), Some("숙박 및 식사 비용 별도"));
        assert_eq!(bike.distance.map(|d| d.to_string()).as_deref(), Some("약 400km"));
        assert_eq!(bike.price_amount(), Some(0));
        assert_eq!(bike.duration_minutes(), 3 * 24 * 60);
        assert!(bike.departure_clock.is_none());
    }

    #[test]
    fn aggregator_views_ride_their_vehicle() {
        let draft = TripDraft::new();
        for (mode, vehicle) in [(ModeId::CityBus, Vehicle::CityBus), (ModeId::Subway, Vehicle::Subway)] {
            let options = FallbackCatalog::new().lookup(mode, &draft);
            assert!(options.iter().all(|o| o.steps.uses(vehicle)));
        }
    }
}
