//! Conversion from a Kakao directions response to one driving option.
//!
//! Only the summary is used; geometry (vertexes) is never rendered. A
//! response without a usable route is an error here so the adapter reports
//! `Unavailable` instead of showing a partial result.

use chrono::{Duration, NaiveDateTime};

use crate::domain::{
    Distance, ItineraryOption, ModeId, Price, RouteStep, RouteSteps, SourceQuality,
    TravelDuration, Vehicle,
};
use crate::providers::error::ProviderError;

use super::types::{DirectionsResponse, ROUTE_OK, Road};

/// How many road names the via step lists.
const MAX_VIA_ROADS: usize = 3;

/// Convert the first route of a directions response.
pub fn convert_route(
    response: &DirectionsResponse,
    origin: &str,
    destination: &str,
    departure: Option<NaiveDateTime>,
) -> Result<ItineraryOption, ProviderError> {
    let route = response
        .routes
        .first()
        .ok_or_else(|| ProviderError::Malformed("no routes in response".to_string()))?;

    if route.result_code != ROUTE_OK {
        return Err(ProviderError::Upstream {
            code: route.result_code.to_string(),
            message: route.result_msg.clone().unwrap_or_default(),
        });
    }

    let summary = route
        .summary
        .as_ref()
        .ok_or_else(|| ProviderError::Malformed("route has no summary".to_string()))?;
    if summary.distance == 0 || summary.duration == 0 {
        return Err(ProviderError::Malformed("route summary is empty".to_string()));
    }

    let minutes = (summary.duration + 30) / 60;
    let drive_time = Duration::seconds(i64::from(summary.duration));
    let toll = summary.fare.as_ref().and_then(|f| f.toll).unwrap_or(0);

    let roads: Vec<&Road> = route.sections.iter().flat_map(|s| s.roads.iter()).collect();
    let major = major_roads(&roads);

    let name = match major.first() {
        Some(main) => format!("자가용 ({main})"),
        None => "자가용".to_string(),
    };
    let via_label = if major.is_empty() {
        "도로 주행".to_string()
    } else {
        major.join(" → ")
    };

    let steps = RouteSteps::through(
        origin,
        RouteStep::via(via_label)
            .with_transit(drive_time)
            .with_vehicle(Vehicle::Car),
        destination,
    );

    let option = ItineraryOption::new(
        ModeId::Drive,
        name,
        Price::label(format!("통행료 {} + 유류비", Price::from_won(toll))),
        TravelDuration::from_minutes(minutes),
        steps,
        SourceQuality::Live,
    )
    .with_distance(Distance::from_meters(summary.distance))
    .with_clocks(
        departure.map(|d| d.time()),
        departure.map(|d| (d + drive_time).time()),
    );

    Ok(option)
}

/// The longest named roads, listed in driving order.
fn major_roads(roads: &[&Road]) -> Vec<String> {
    let mut totals: Vec<(String, u32, usize)> = Vec::new();
    for (order, road) in roads.iter().enumerate() {
        let name = road.name.trim();
        if name.is_empty() {
            continue;
        }
        match totals.iter_mut().find(|(n, _, _)| n == name) {
            Some((_, distance, _)) => *distance += road.distance,
            None => totals.push((name.to_string(), road.distance, order)),
        }
    }

    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals.truncate(MAX_VIA_ROADS);
    totals.sort_by_key(|(_, _, order)| *order);
    totals.into_iter().map(|(name, _, _)| name).collect()
}
