//! Geographic value types: points, places and distances.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres, used by the haversine formula.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another point, in metres.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c * 1000.0
    }

    /// Key usable for hashing: coordinates rounded to roughly 10 m.
    pub fn grid_key(&self) -> (i64, i64) {
        (
            (self.latitude * 10_000.0).round() as i64,
            (self.longitude * 10_000.0).round() as i64,
        )
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// A confirmed, labelled location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub address: String,
    pub location: GeoPoint,
}

impl Place {
    pub fn new(address: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            address: address.into(),
            location,
        }
    }
}

/// A travelled length.
///
/// Catalog data only knows rough figures ("약 400km"), so a distance may be
/// flagged as approximate; it then renders with the `약` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Distance {
    meters: u32,
    approximate: bool,
}

impl Distance {
    pub const fn from_meters(meters: u32) -> Self {
        Self {
            meters,
            approximate: false,
        }
    }

    pub const fn approx_km(km: u32) -> Self {
        Self {
            meters: km * 1000,
            approximate: true,
        }
    }

    pub fn meters(&self) -> u32 {
        self.meters
    }

    pub fn is_approximate(&self) -> bool {
        self.approximate
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.approximate {
            write!(f, "약 {}km", self.meters / 1000)
        } else if self.meters < 1000 {
            write!(f, "{}m", self.meters)
        } else {
            write!(f, "{:.1}km", f64::from(self.meters) / 1000.0)
        }
    }
}
