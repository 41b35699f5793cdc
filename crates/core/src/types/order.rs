//! Order records.

use core::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::id::OrderId;

/// Top-level keys owned by [`Order::id`] and [`Order::date`].
///
/// These never appear in [`Order::details`] when an order is written.
pub const RESERVED_FIELDS: &[&str] = &["id", "date"];

/// Naive timestamp layouts accepted for order dates, tried in order.
///
/// Naive timestamps are interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Whether `key` is one of [`RESERVED_FIELDS`].
#[must_use]
pub fn is_reserved_field(key: &str) -> bool {
    RESERVED_FIELDS.contains(&key)
}

/// The `date` of an order, kept in the JSON form it was supplied in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderDate {
    /// A date or timestamp string.
    Text(String),
    /// Milliseconds since the Unix epoch.
    Millis(i64),
}

impl OrderDate {
    /// Parse into a UTC timestamp, if the value is recognized.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Text(s) => parse_order_date(s),
            Self::Millis(ms) => DateTime::from_timestamp_millis(*ms),
        }
    }
}

impl fmt::Display for OrderDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Millis(ms) => write!(f, "{ms}"),
        }
    }
}

impl From<String> for OrderDate {
    fn from(date: String) -> Self {
        Self::Text(date)
    }
}

impl From<&str> for OrderDate {
    fn from(date: &str) -> Self {
        Self::Text(date.to_owned())
    }
}

impl From<i64> for OrderDate {
    fn from(millis: i64) -> Self {
        Self::Millis(millis)
    }
}

impl PartialEq<&str> for OrderDate {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Self::Text(s) if s == other)
    }
}

/// A single booking or purchase.
///
/// Only `id` and `date` are interpreted by the store. Every other field is
/// kept in [`Order::details`] and written back verbatim, flattened into the
/// same JSON object. A `details` entry named `id` or `date` is dropped on
/// write so it cannot shadow the real fields.
///
/// ```rust
/// use travel_planner_core::Order;
///
/// let order: Order = serde_json::from_str(
///     r#"{"id":"h-1","date":"2024-03-01","hotel":"Grand","nights":2}"#,
/// ).unwrap();
///
/// assert_eq!(order.id, "h-1");
/// assert_eq!(order.details["nights"], 2);
/// assert!(order.timestamp().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    /// Caller-assigned identifier.
    pub id: OrderId,
    /// Order date, kept as supplied.
    pub date: OrderDate,
    /// Opaque payload.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Order {
    /// Create an order with no payload fields.
    #[must_use]
    pub fn new(id: impl Into<OrderId>, date: impl Into<OrderDate>) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            details: Map::new(),
        }
    }

    /// Add a payload field, replacing any existing value under `key`.
    ///
    /// `id` and `date` are set through [`Order::new`]; passing either as
    /// `key` leaves the order unchanged.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if is_reserved_field(&key) {
            tracing::debug!(%key, "Ignoring payload field that shadows a reserved key");
        } else {
            self.details.insert(key, value.into());
        }
        self
    }

    /// Parse [`Order::date`] into a UTC timestamp.
    ///
    /// Returns `None` if the date is not in a recognized format.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.date.timestamp()
    }
}

impl Serialize for Order {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let payload = self.details.iter().filter(|(key, _)| !is_reserved_field(key));

        let mut map = serializer.serialize_map(Some(2 + payload.clone().count()))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("date", &self.date)?;
        for (key, value) in payload {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Parse an order date string.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DD[T| ]HH:MM[:SS[.fff]]`
/// timestamps (read as UTC), and bare `YYYY-MM-DD` dates (UTC midnight).
#[must_use]
pub fn parse_order_date(date: &str) -> Option<DateTime<Utc>> {
    let date = date.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(date, fmt).ok())
    {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_bare_date_is_utc_midnight() {
        let ts = parse_order_date("2024-03-01").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let ts = parse_order_date("2024-03-01T10:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_datetime_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 0).unwrap();
        assert_eq!(parse_order_date("2024-05-06T07:08").unwrap(), expected);
        assert_eq!(parse_order_date("2024-05-06 07:08:00").unwrap(), expected);
        assert_eq!(parse_order_date("2024-05-06T07:08:00.000").unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_order_date("").is_none());
        assert!(parse_order_date("next tuesday").is_none());
        assert!(parse_order_date("2024-13-01").is_none());
    }

    #[test]
    fn test_epoch_millis_date() {
        let order: Order =
            serde_json::from_value(json!({"id": "c", "date": 1_714_000_000_000_i64})).unwrap();

        assert_eq!(order.date, OrderDate::Millis(1_714_000_000_000));
        assert_eq!(
            order.timestamp().unwrap(),
            DateTime::from_timestamp_millis(1_714_000_000_000).unwrap()
        );
        assert_eq!(serde_json::to_value(&order).unwrap()["date"], 1_714_000_000_000_i64);
    }

    #[test]
    fn test_payload_fields_survive_serialization() {
        let order = Order::new("o-1", "2024-01-01")
            .with_field("destination", "Kyoto")
            .with_field("travelers", 3);

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["id"], "o-1");
        assert_eq!(json["destination"], "Kyoto");
        assert_eq!(json["travelers"], 3);

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn test_with_field_ignores_reserved_keys() {
        let order = Order::new("o-1", "2024-01-01")
            .with_field("date", "tomorrow")
            .with_field("id", 99);

        assert_eq!(order.id, "o-1");
        assert_eq!(order.date, "2024-01-01");
        assert!(order.details.is_empty());
    }

    #[test]
    fn test_reserved_details_never_reach_output() {
        let mut order = Order::new("o-1", "2024-01-01");
        order.details.insert("date".to_owned(), json!("tomorrow"));
        order.details.insert("id".to_owned(), json!(99));
        order.details.insert("city".to_owned(), json!("Oslo"));

        let text = serde_json::to_string(&order).unwrap();
        assert_eq!(text.matches("\"date\"").count(), 1);
        assert_eq!(text.matches("\"id\"").count(), 1);

        let back: Order = serde_json::from_str(&text).unwrap();
        assert_eq!(back.id, "o-1");
        assert_eq!(back.date, "2024-01-01");
        assert_eq!(back.details["city"], "Oslo");
    }

    #[test]
    fn test_missing_date_is_rejected() {
        let result = serde_json::from_str::<Order>(r#"{"id":"x"}"#);
        assert!(result.is_err());
    }
}
