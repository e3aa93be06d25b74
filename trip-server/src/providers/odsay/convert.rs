//! Conversion from ODsay paths to itinerary options.
//!
//! Walking sub-paths never become steps of their own: their time is carried
//! as the walk needed to reach the next ride (or the destination).

use chrono::{Duration, NaiveDateTime};

use crate::domain::{
    Distance, DomainError, ItineraryOption, ModeId, Price, RouteStep, RouteSteps, SourceQuality,
    TravelDuration, Vehicle,
};

use super::client::TrafficCodes;
use super::types::{Path, SubPath};

/// Error converting one path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("path has zero total time")]
    ZeroDuration,

    #[error("unknown trafficType {0}")]
    UnknownTraffic(u8),

    #[error(transparent)]
    Route(#[from] DomainError),
}

/// Convert every path, skipping the ones that cannot be represented.
pub fn convert_paths(
    paths: &[Path],
    codes: TrafficCodes,
    mode: ModeId,
    origin: &str,
    destination: &str,
    departure: Option<NaiveDateTime>,
) -> Vec<ItineraryOption> {
    let mut results = Vec::with_capacity(paths.len());
    for (idx, path) in paths.iter().enumerate() {
        match convert_path(path, codes, mode, origin, destination, departure) {
            Ok(option) => results.push(option),
            Err(e) => tracing::warn!(path = idx, error = %e, "skipping transit path"),
        }
    }
    results
}

/// Convert one path into an option for `mode`.
pub fn convert_path(
    path: &Path,
    codes: TrafficCodes,
    mode: ModeId,
    origin: &str,
    destination: &str,
    departure: Option<NaiveDateTime>,
) -> Result<ItineraryOption, ConversionError> {
    if path.info.total_time == 0 {
        return Err(ConversionError::ZeroDuration);
    }

    let mut steps = vec![RouteStep::start(origin)];
    let mut lines = Vec::new();
    let mut pending_walk = 0u32;

    for sub in &path.sub_path {
        let minutes = sub.section_time.unwrap_or(0);
        let vehicle = if sub.traffic_type == codes.walk {
            pending_walk += minutes;
            continue;
        } else if sub.traffic_type == codes.subway {
            Vehicle::Subway
        } else if sub.traffic_type == codes.bus {
            Vehicle::CityBus
        } else {
            return Err(ConversionError::UnknownTraffic(sub.traffic_type));
        };

        let line = line_name(sub, vehicle);
        let mut step = RouteStep::via(ride_label(&line, sub))
            .with_transit(Duration::minutes(i64::from(minutes)))
            .with_vehicle(vehicle);
        if pending_walk > 0 {
            step = step.with_walk(Duration::minutes(i64::from(pending_walk)));
            pending_walk = 0;
        }
        steps.push(step);
        lines.push(line);
    }

    if lines.is_empty() {
        steps.push(
            RouteStep::via("도보 이동").with_walk(Duration::minutes(i64::from(pending_walk))),
        );
        pending_walk = 0;
    }

    let mut end = RouteStep::end(destination);
    if pending_walk > 0 {
        end = end.with_walk(Duration::minutes(i64::from(pending_walk)));
    }
    steps.push(end);

    let name = if lines.is_empty() {
        "도보".to_string()
    } else {
        lines.join(" → ")
    };
    let price = match path.info.payment {
        Some(won) => Price::from_won(won),
        None => Price::unknown(),
    };
    let total = Duration::minutes(i64::from(path.info.total_time));

    let mut option = ItineraryOption::new(
        mode,
        name,
        price,
        TravelDuration::from_minutes(path.info.total_time),
        RouteSteps::new(steps)?,
        SourceQuality::Live,
    )
    .with_clocks(
        departure.map(|d| d.time()),
        departure.map(|d| (d + total).time()),
    );
    if let Some(meters) = path.info.total_distance.filter(|m| *m > 0.0) {
        option = option.with_distance(Distance::from_meters(meters.round() as u32));
    }

    Ok(option)
}

fn line_name(sub: &SubPath, vehicle: Vehicle) -> String {
    let lane = sub.lane.first();
    match vehicle {
        Vehicle::CityBus => match lane.and_then(|l| l.bus_no.as_deref()) {
            Some(no) => format!("{no}번"),
            None => "버스".to_string(),
        },
        _ => lane
            .and_then(|l| l.name.clone())
            .unwrap_or_else(|| "지하철".to_string()),
    }
}

fn ride_label(line: &str, sub: &SubPath) -> String {
    match (sub.start_name.as_deref(), sub.end_name.as_deref()) {
        (Some(from), Some(to)) => format!("{line} {from} → {to}"),
        _ => line.to_string(),
    }
}
