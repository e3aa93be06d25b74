//! ODsay public-transit path search DTOs.
//!
//! A search answers with either `result` or `error`. The error is a single
//! object on some failures and an array on others, with the message under
//! `msg` or `message`.

use serde::Deserialize;

/// Response from `searchPubTransPathT`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub result: Option<SearchResult>,
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Many(Vec<ErrorDetail>),
    One(ErrorDetail),
}

impl ErrorBody {
    /// The first error's code and message.
    pub fn first(&self) -> Option<&ErrorDetail> {
        match self {
            ErrorBody::Many(errors) => errors.first(),
            ErrorBody::One(error) => Some(error),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    /// A string on most errors, a number on some.
    pub code: Option<serde_json::Value>,
    #[serde(alias = "message")]
    pub msg: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub search_type: Option<u8>,
    #[serde(default)]
    pub path: Vec<Path>,
}

/// One candidate itinerary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    /// 1 subway, 2 bus, 3 both.
    pub path_type: Option<u8>,
    pub info: PathInfo,
    #[serde(default)]
    pub sub_path: Vec<SubPath>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathInfo {
    /// Minutes.
    pub total_time: u32,
    /// Won.
    pub payment: Option<u64>,
    /// Metres.
    pub total_distance: Option<f64>,
    pub bus_transit_count: Option<u32>,
    pub subway_transit_count: Option<u32>,
    pub first_start_station: Option<String>,
    pub last_end_station: Option<String>,
}

/// One leg of a path: a walk or a ride.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubPath {
    pub traffic_type: u8,
    /// Minutes.
    pub section_time: Option<u32>,
    pub distance: Option<f64>,
    pub start_name: Option<String>,
    pub end_name: Option<String>,
    #[serde(default)]
    pub lane: Vec<Lane>,
}

/// The line ridden on a sub-path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lane {
    /// Subway line name, e.g. "수도권 2호선".
    pub name: Option<String>,
    /// Bus route number, e.g. "402".
    pub bus_no: Option<String>,
}
