//! Order identifiers.
//!
//! Order ids are assigned by the caller, so the store never generates or
//! validates them. Persisted data may carry either string or numeric ids.
//! An [`OrderId`] remembers which, writes it back the same way, and never
//! treats `7` and `"7"` as the same id.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Caller-assigned identifier of an order record.
///
/// # Example
///
/// ```rust
/// use travel_planner_core::OrderId;
///
/// let id = OrderId::from("A-100");
/// assert_eq!(id.as_str(), Some("A-100"));
///
/// // Numeric ids stay numeric.
/// let from_json: OrderId = serde_json::from_str("42").unwrap();
/// assert_eq!(from_json, OrderId::from(42));
/// assert_ne!(from_json, OrderId::from("42"));
/// assert_eq!(serde_json::to_string(&from_json).unwrap(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    /// A string id.
    Text(String),
    /// A numeric id, such as a millisecond timestamp.
    Number(Number),
}

impl OrderId {
    /// The id as a string slice, if it is a string id.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

impl From<&OrderId> for OrderId {
    fn from(id: &OrderId) -> Self {
        id.clone()
    }
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self::Number(id.into())
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self::Number(id.into())
    }
}

impl From<i32> for OrderId {
    fn from(id: i32) -> Self {
        Self::Number(id.into())
    }
}

impl PartialEq<str> for OrderId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for OrderId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_string_id() {
        let id: OrderId = serde_json::from_str("\"trip-7\"").unwrap();
        assert_eq!(id, "trip-7");
    }

    #[test]
    fn test_integer_id_keeps_its_type() {
        let id: OrderId = serde_json::from_str("1700000000000").unwrap();
        assert_eq!(id, OrderId::from(1_700_000_000_000_i64));
        assert_eq!(id.as_str(), None);
        assert_eq!(serde_json::to_string(&id).unwrap(), "1700000000000");
    }

    #[test]
    fn test_number_and_string_ids_differ() {
        assert_ne!(OrderId::from(7), OrderId::from("7"));
        assert_ne!(OrderId::from(7), "7");
        assert_eq!(OrderId::from(7).to_string(), "7");
    }

    #[test]
    fn test_deserialize_rejects_other_shapes() {
        assert!(serde_json::from_str::<OrderId>("true").is_err());
        assert!(serde_json::from_str::<OrderId>("{}").is_err());
        assert!(serde_json::from_str::<OrderId>("null").is_err());
    }

    #[test]
    fn test_string_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&OrderId::from("B2")).unwrap();
        assert_eq!(json, "\"B2\"");
    }
}
