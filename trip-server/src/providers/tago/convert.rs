//! Conversion from TAGO DTOs to itinerary options.
//!
//! The portal gives only endpoint terminals, so every option gets a
//! synthesized three-step route: the draft's origin, the scheduled ride,
//! and the draft's destination.

use chrono::NaiveDateTime;

use crate::domain::{
    ItineraryOption, ModeId, Price, RouteStep, RouteSteps, SourceQuality, TravelDuration, Vehicle,
};

use super::types::{CompactTime, ExpressBusItem, NumberOrText, TrainItem};

/// Error converting one schedule record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Failed to parse a compact timestamp
    #[error("invalid time: {0}")]
    InvalidTime(String),

    /// Arrival is not after departure
    #[error("arrival precedes departure")]
    NegativeDuration,
}

/// Place labels the synthesized route starts and ends at.
#[derive(Debug, Clone, Copy)]
pub struct Endpoints<'a> {
    pub origin: &'a str,
    pub destination: &'a str,
}

/// Common shape of a scheduled ride, whichever service it came from.
struct Ride<'a> {
    name: String,
    vehicle: Vehicle,
    departure: Option<&'a CompactTime>,
    arrival: Option<&'a CompactTime>,
    from: Option<&'a str>,
    to: Option<&'a str>,
    fare: Option<&'a NumberOrText>,
}

/// Convert express bus records, skipping any that are malformed.
pub fn convert_express_bus_items(
    items: &[ExpressBusItem],
    endpoints: Endpoints<'_>,
) -> Vec<ItineraryOption> {
    convert_all(items, |item| {
        let name = match item.grade_nm.as_deref().map(str::trim) {
            Some(grade) if !grade.is_empty() => format!("{grade} 고속버스"),
            _ => "고속버스".to_string(),
        };
        convert_ride(
            ModeId::Bus,
            Ride {
                name,
                vehicle: Vehicle::ExpressBus,
                departure: item.dep_pland_time.as_ref(),
                arrival: item.arr_pland_time.as_ref(),
                from: item.dep_place_nm.as_deref(),
                to: item.arr_place_nm.as_deref(),
                fare: item.charge.as_ref(),
            },
            endpoints,
        )
    })
}

/// Convert train records, skipping any that are malformed.
pub fn convert_train_items(items: &[TrainItem], endpoints: Endpoints<'_>) -> Vec<ItineraryOption> {
    convert_all(items, |item| {
        let grade = item
            .traingradename
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .ok_or(ConversionError::MissingField("traingradename"))?;
        let name = match &item.trainno {
            Some(no) => format!("{grade} {no}"),
            None => grade.to_string(),
        };
        convert_ride(
            ModeId::Rail,
            Ride {
                name,
                vehicle: Vehicle::Train,
                departure: item.depplandtime.as_ref(),
                arrival: item.arrplandtime.as_ref(),
                from: item.depplacename.as_deref(),
                to: item.arrplacename.as_deref(),
                fare: item.adultcharge.as_ref(),
            },
            endpoints,
        )
    })
}

fn convert_all<T>(
    items: &[T],
    convert: impl Fn(&T) -> Result<ItineraryOption, ConversionError>,
) -> Vec<ItineraryOption> {
    let mut results = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        match convert(item) {
            Ok(option) => results.push(option),
            // Skip invalid records rather than failing the whole response
            Err(e) => tracing::warn!(record = idx, error = %e, "skipping schedule record"),
        }
    }
    results
}

fn convert_ride(
    mode: ModeId,
    ride: Ride<'_>,
    endpoints: Endpoints<'_>,
) -> Result<ItineraryOption, ConversionError> {
    let departure = parse_time(ride.departure, "departure time")?;
    let arrival = parse_time(ride.arrival, "arrival time")?;

    let ride_time = arrival - departure;
    let minutes = ride_time.num_minutes();
    if minutes <= 0 {
        return Err(ConversionError::NegativeDuration);
    }

    let price = ride
        .fare
        .and_then(NumberOrText::as_u64)
        .map_or_else(Price::unknown, Price::from_won);

    let segment = format!(
        "{} {} → {}",
        ride.name,
        ride.from.unwrap_or(endpoints.origin),
        ride.to.unwrap_or(endpoints.destination)
    );
    let steps = RouteSteps::through(
        endpoints.origin,
        RouteStep::via(segment)
            .with_transit(ride_time)
            .with_vehicle(ride.vehicle),
        endpoints.destination,
    );

    let duration = TravelDuration::from_minutes(u32::try_from(minutes).unwrap_or(u32::MAX));

    Ok(ItineraryOption::new(
        mode,
        ride.name,
        price,
        duration,
        steps,
        SourceQuality::Live,
    )
    .with_clocks(Some(departure.time()), Some(arrival.time())))
}

fn parse_time(
    time: Option<&CompactTime>,
    field: &'static str,
) -> Result<NaiveDateTime, ConversionError> {
    let time = time.ok_or(ConversionError::MissingField(field))?;
    time.to_datetime()
        .ok_or_else(|| ConversionError::InvalidTime(format!("{time:?}")))
}
