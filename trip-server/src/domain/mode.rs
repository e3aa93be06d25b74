//! Travel modes and the options that shape a resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown mode identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown travel mode: {0}")]
pub struct UnknownMode(pub String);

/// A category of travel the user can request.
///
/// The last four variants are views over the urban-transit aggregator: two
/// cross-vehicle rankings and two single-vehicle filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeId {
    Bus,
    #[serde(alias = "train")]
    Rail,
    #[serde(alias = "plane")]
    Air,
    #[serde(alias = "car")]
    Drive,
    #[serde(alias = "bike")]
    Cycle,
    #[serde(alias = "minTime")]
    TransitMinTime,
    #[serde(alias = "minCost")]
    TransitMinCost,
    CityBus,
    Subway,
}

impl ModeId {
    /// Every mode, in tab order.
    pub const ALL: [ModeId; 9] = [
        ModeId::Bus,
        ModeId::Rail,
        ModeId::Air,
        ModeId::Drive,
        ModeId::Cycle,
        ModeId::TransitMinTime,
        ModeId::TransitMinCost,
        ModeId::CityBus,
        ModeId::Subway,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeId::Bus => "bus",
            ModeId::Rail => "rail",
            ModeId::Air => "air",
            ModeId::Drive => "drive",
            ModeId::Cycle => "cycle",
            ModeId::TransitMinTime => "transit-min-time",
            ModeId::TransitMinCost => "transit-min-cost",
            ModeId::CityBus => "city-bus",
            ModeId::Subway => "subway",
        }
    }

    /// Whether results for this mode come from the urban-transit aggregator.
    pub fn is_aggregator(&self) -> bool {
        matches!(
            self,
            ModeId::TransitMinTime | ModeId::TransitMinCost | ModeId::CityBus | ModeId::Subway
        )
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModeId {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s {
            "bus" => ModeId::Bus,
            "rail" | "train" => ModeId::Rail,
            "air" | "plane" => ModeId::Air,
            "drive" | "car" => ModeId::Drive,
            "cycle" | "bike" => ModeId::Cycle,
            "transit-min-time" | "minTime" => ModeId::TransitMinTime,
            "transit-min-cost" | "minCost" => ModeId::TransitMinCost,
            "city-bus" => ModeId::CityBus,
            "subway" => ModeId::Subway,
            other => return Err(UnknownMode(other.to_string())),
        };
        Ok(mode)
    }
}

/// How a resolved list should be ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortPolicy {
    /// Keep provider or catalog order.
    #[default]
    Default,
    /// Shortest total duration first.
    Time,
    /// Cheapest first; unknown prices last.
    Cost,
}

/// Road-routing priority requested by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoutePreference {
    #[default]
    Recommended,
    TimeOptimized,
    DistanceOptimized,
    AvoidHighway,
}

/// The kind of vehicle used on one route step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Vehicle {
    ExpressBus,
    CityBus,
    Train,
    Subway,
    Airplane,
    Car,
    Bicycle,
}
