//! Provider hubs: the terminals and stations a schedule source is keyed by.
//!
//! Schedule sources want a terminal or station id, but a trip draft only
//! holds geocoded places. Each adapter carries a table of hubs and matches
//! a place to the nearest hub within a radius. The ids are the provider's
//! own codes and are configuration data, not part of the algorithm.

use crate::domain::GeoPoint;

/// Default match radius in metres.
pub const DEFAULT_HUB_RADIUS_M: f64 = 30_000.0;

/// A terminal or station known to one provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Hub {
    /// Provider-specific id (e.g. "NAEK010", "NAT010000").
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
}

impl Hub {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
        }
    }
}

/// A set of hubs with a maximum matching distance.
#[derive(Debug, Clone, PartialEq)]
pub struct HubTable {
    hubs: Vec<Hub>,
    radius_m: f64,
}

impl HubTable {
    pub fn new(hubs: Vec<Hub>) -> Self {
        Self {
            hubs,
            radius_m: DEFAULT_HUB_RADIUS_M,
        }
    }

    /// Set the match radius.
    pub fn with_radius(mut self, radius_m: f64) -> Self {
        self.radius_m = radius_m;
        self
    }

    /// The closest hub within the radius, if any.
    pub fn nearest(&self, point: &GeoPoint) -> Option<&Hub> {
        self.hubs
            .iter()
            .map(|hub| (hub, hub.location.distance_to(point)))
            .filter(|(_, d)| *d <= self.radius_m)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(hub, _)| hub)
    }

    pub fn len(&self) -> usize {
        self.hubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hubs.is_empty()
    }

    /// Major express bus terminals (TAGO terminal ids).
    pub fn express_bus_terminals() -> Self {
        Self::new(vec![
            Hub::new("NAEK010", "서울경부", GeoPoint::new(37.5049, 127.0049)),
            Hub::new("NAEK032", "동서울", GeoPoint::new(37.5346, 127.0945)),
            Hub::new("NAEK300", "대전복합", GeoPoint::new(36.3505, 127.4373)),
            Hub::new("NAEK500", "광주(유·스퀘어)", GeoPoint::new(35.1602, 126.8790)),
            Hub::new("NAEK700", "부산", GeoPoint::new(35.2840, 129.0960)),
        ])
    }

    /// Major rail stations (TAGO station ids).
    pub fn rail_stations() -> Self {
        Self::new(vec![
            Hub::new("NAT010000", "서울", GeoPoint::new(37.5547, 126.9707)),
            Hub::new("NAT010032", "용산", GeoPoint::new(37.5298, 126.9648)),
            Hub::new("NAT011668", "대전", GeoPoint::new(36.3323, 127.4346)),
            Hub::new("NAT013271", "동대구", GeoPoint::new(35.8794, 128.6285)),
            Hub::new("NAT014445", "부산", GeoPoint::new(35.1151, 129.0422)),
            Hub::new("NAT031857", "광주송정", GeoPoint::new(35.1378, 126.7930)),
        ])
    }
}
