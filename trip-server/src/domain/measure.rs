//! Price and duration labels, and the one parsing rule used to compare them.
//!
//! Itineraries keep price and duration as human-readable Korean labels
//! ("59,800원", "2시간 40분") because catalog entries are authored that way.
//! Live adapters format numeric upstream values into the same labels, and
//! every comparison goes back through [`parse_price`] and
//! [`parse_duration_minutes`], so live and fallback data always sort by the
//! same rule.

use std::fmt;

use serde::Serialize;

/// A displayed fare. May be non-numeric ("요금 정보 없음").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Price(String);

impl Price {
    /// A price exactly as authored.
    pub fn label(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Format an integer amount of won, e.g. `59800` → `"59,800원"`.
    pub fn from_won(won: u64) -> Self {
        Self(format!("{}원", group_thousands(won)))
    }

    /// A fare the provider did not report.
    pub fn unknown() -> Self {
        Self("요금 정보 없음".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parsed amount in won, or `None` if the label has no digits.
    pub fn amount(&self) -> Option<u64> {
        parse_price(&self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A displayed travel duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TravelDuration(String);

impl TravelDuration {
    pub fn label(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Format minutes as `"2시간 40분"`, `"5시간"` or `"45분"`.
    pub fn from_minutes(minutes: u32) -> Self {
        let (hours, mins) = (minutes / 60, minutes % 60);
        let label = match (hours, mins) {
            (0, m) => format!("{m}분"),
            (h, 0) => format!("{h}시간"),
            (h, m) => format!("{h}시간 {m}분"),
        };
        Self(label)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn minutes(&self) -> u32 {
        parse_duration_minutes(&self.0)
    }
}

impl fmt::Display for TravelDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip every non-digit and parse what remains.
///
/// ```
/// use trip_server::domain::parse_price;
///
/// assert_eq!(parse_price("59,800원"), Some(59_800));
/// assert_eq!(parse_price("통행료 약 45,000원 + 유류비"), Some(45_000));
/// assert_eq!(parse_price("0원 (무료)"), Some(0));
/// assert_eq!(parse_price("요금 정보 없음"), None);
/// ```
pub fn parse_price(label: &str) -> Option<u64> {
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    // Saturate rather than fail on absurdly long digit runs.
    Some(digits.parse().unwrap_or(u64::MAX))
}

/// Extract day, hour and minute components from a duration label.
///
/// Each unit marker (`일`, `시간`, `분`) takes the number written
/// immediately before it; missing units count as zero. A range such as
/// "2-3일" therefore reads as its upper bound.
///
/// ```
/// use trip_server::domain::parse_duration_minutes;
///
/// assert_eq!(parse_duration_minutes("4시간 30분"), 270);
/// assert_eq!(parse_duration_minutes("5시간"), 300);
/// assert_eq!(parse_duration_minutes("45분"), 45);
/// assert_eq!(parse_duration_minutes("약 2-3일"), 3 * 24 * 60);
/// ```
pub fn parse_duration_minutes(label: &str) -> u32 {
    let mut total: u32 = 0;
    let mut pending: Option<u32> = None;
    let mut rest = label;

    while let Some(c) = rest.chars().next() {
        if let Some(d) = c.to_digit(10) {
            pending = Some(pending.unwrap_or(0).saturating_mul(10).saturating_add(d));
            rest = &rest[c.len_utf8()..];
            continue;
        }
        if c.is_whitespace() {
            rest = &rest[c.len_utf8()..];
            continue;
        }

        let (unit, marker_len) = if rest.starts_with("시간") {
            (60, "시간".len())
        } else if rest.starts_with('분') {
            (1, '분'.len_utf8())
        } else if rest.starts_with('일') {
            (24 * 60, '일'.len_utf8())
        } else {
            (0, c.len_utf8())
        };

        if let Some(n) = pending.take() {
            total = total.saturating_add(n.saturating_mul(unit));
        }
        rest = &rest[marker_len..];
    }

    total
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
