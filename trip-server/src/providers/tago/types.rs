//! TAGO (Korean public-data transport portal) response DTOs.
//!
//! Every TAGO service wraps its records in the same envelope:
//! `response.header` carries a result code, `response.body.items.item`
//! carries the records. Two quirks of the portal's JSON rendering are
//! modelled here: `item` is a bare object when there is exactly one record,
//! and `items` is an empty string when there are none.

use chrono::NaiveDateTime;
use serde::Deserialize;

/// Result code the portal uses for success.
pub const RESULT_OK: &str = "00";

/// Top-level TAGO response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub response: Response<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Response<T> {
    pub header: Header,
    pub body: Option<Body<T>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub result_code: String,
    pub result_msg: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body<T> {
    pub items: Items<T>,
    pub total_count: Option<u32>,
}

/// The `items` field: a wrapper object, or `""` when empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Items<T> {
    Present { item: OneOrMany<T> },
    Empty(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Envelope<T> {
    /// Unwrap the records, regardless of how the portal shaped them.
    pub fn into_items(self) -> Vec<T> {
        match self.response.body.map(|b| b.items) {
            Some(Items::Present {
                item: OneOrMany::Many(items),
            }) => items,
            Some(Items::Present {
                item: OneOrMany::One(item),
            }) => vec![item],
            Some(Items::Empty(_)) | None => Vec::new(),
        }
    }
}

/// A compact timestamp such as `202510160900` or `20251016090000`.
///
/// The portal renders these as JSON numbers, but some services quote them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CompactTime {
    Number(u64),
    Text(String),
}

impl CompactTime {
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        let digits = match self {
            CompactTime::Number(n) => n.to_string(),
            CompactTime::Text(s) => s.trim().to_string(),
        };
        let format = match digits.len() {
            12 => "%Y%m%d%H%M",
            14 => "%Y%m%d%H%M%S",
            _ => return None,
        };
        NaiveDateTime::parse_from_str(&digits, format).ok()
    }
}

/// A number the portal may render as a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(u64),
    Text(String),
}

impl NumberOrText {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            NumberOrText::Number(n) => Some(*n),
            NumberOrText::Text(s) => s.trim().replace(',', "").parse().ok(),
        }
    }
}

impl std::fmt::Display for NumberOrText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberOrText::Number(n) => write!(f, "{n}"),
            NumberOrText::Text(s) => f.write_str(s),
        }
    }
}

/// One express bus departure (`ExpBusInfoService`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressBusItem {
    pub route_id: Option<String>,
    /// Service grade, e.g. "우등", "일반", "프리미엄".
    pub grade_nm: Option<String>,
    pub dep_pland_time: Option<CompactTime>,
    pub arr_pland_time: Option<CompactTime>,
    pub dep_place_nm: Option<String>,
    pub arr_place_nm: Option<String>,
    /// Adult fare in won.
    pub charge: Option<NumberOrText>,
}

/// One train departure (`TrainInfoService`). Field names are all lowercase.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainItem {
    pub traingradename: Option<String>,
    pub trainno: Option<NumberOrText>,
    pub depplandtime: Option<CompactTime>,
    pub arrplandtime: Option<CompactTime>,
    pub depplacename: Option<String>,
    pub arrplacename: Option<String>,
    /// Adult fare in won.
    pub adultcharge: Option<NumberOrText>,
}
