//! Geocoding boundary.
//!
//! Address lookup is an external collaborator; the planner only needs
//! [`Geocoder`]. [`Gazetteer`] is a fixed in-memory table of well-known
//! places, enough to run the server without a geocoding service.

use async_trait::async_trait;

use crate::domain::{GeoPoint, Place};

/// Error from a geocoding lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeocodeError {
    #[error("no place found for {0:?}")]
    NotFound(String),

    #[error("geocoding service failed: {0}")]
    Service(String),
}

/// Forward and reverse address lookup.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve free text to a place.
    async fn forward(&self, text: &str) -> Result<Place, GeocodeError>;

    /// Name a coordinate.
    async fn reverse(&self, point: GeoPoint) -> Result<Place, GeocodeError>;
}

/// Reverse-geocode `point`, labelling it with its coordinates on failure.
pub async fn reverse_or_coordinates(geocoder: &dyn Geocoder, point: GeoPoint) -> Place {
    match geocoder.reverse(point).await {
        Ok(place) => place,
        Err(e) => {
            tracing::debug!(%point, error = %e, "reverse geocoding failed");
            Place::new(point.to_string(), point)
        }
    }
}

/// How close a point must be to a gazetteer entry to reverse to it.
const REVERSE_RADIUS_M: f64 = 500.0;

/// A fixed list of named places.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    places: Vec<(Vec<String>, Place)>,
}

impl Gazetteer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a place reachable by its address and any of `aliases`.
    pub fn with_place(mut self, place: Place, aliases: &[&str]) -> Self {
        let mut names: Vec<String> = aliases.iter().map(|a| normalize(a)).collect();
        names.push(normalize(&place.address));
        self.places.push((names, place));
        self
    }

    /// Major stations and landmarks.
    pub fn korea() -> Self {
        Self::new()
            .with_place(
                Place::new("서울시청", GeoPoint::new(37.5665, 126.9780)),
                &["Seoul City Hall"],
            )
            .with_place(
                Place::new("서울역", GeoPoint::new(37.5547, 126.9707)),
                &["Seoul Station"],
            )
            .with_place(
                Place::new("부산역", GeoPoint::new(35.1151, 129.0422)),
                &["Busan Station"],
            )
            .with_place(
                Place::new("대전역", GeoPoint::new(36.3324, 127.4342)),
                &["Daejeon Station"],
            )
            .with_place(
                Place::new("동대구역", GeoPoint::new(35.8797, 128.6286)),
                &["Dongdaegu Station"],
            )
            .with_place(
                Place::new("광주송정역", GeoPoint::new(35.1374, 126.7910)),
                &["Gwangju Songjeong Station"],
            )
            .with_place(
                Place::new("강남역", GeoPoint::new(37.4979, 127.0276)),
                &["Gangnam Station"],
            )
            .with_place(
                Place::new("제주국제공항", GeoPoint::new(33.5104, 126.4914)),
                &["Jeju Airport"],
            )
    }
}

#[async_trait]
impl Geocoder for Gazetteer {
    async fn forward(&self, text: &str) -> Result<Place, GeocodeError> {
        let wanted = normalize(text);
        self.places
            .iter()
            .find(|(names, _)| names.contains(&wanted))
            .map(|(_, place)| place.clone())
            .ok_or_else(|| GeocodeError::NotFound(text.to_string()))
    }

    async fn reverse(&self, point: GeoPoint) -> Result<Place, GeocodeError> {
        self.places
            .iter()
            .map(|(_, place)| (place, place.location.distance_to(&point)))
            .filter(|(_, d)| *d <= REVERSE_RADIUS_M)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(place, _)| place.clone())
            .ok_or_else(|| GeocodeError::NotFound(point.to_string()))
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
