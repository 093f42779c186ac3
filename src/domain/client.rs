//! Client entity and its value objects.
//!
//! A client is identified by a store-assigned integer, belongs to exactly one
//! status group, and carries a priority that only has meaning relative to the
//! other members of that group. Every other stored column is kept verbatim in
//! [`Client::attributes`] and flattened back into the JSON representation.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ClientError;

// =============================================================================
// ClientId
// =============================================================================

/// Store-assigned client identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(i64);

impl ClientId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<i64> for ClientId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

// =============================================================================
// ClientStatus
// =============================================================================

/// The swimlane a client currently sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientStatus {
    Backlog,
    InProgress,
    Complete,
}

impl ClientStatus {
    /// Every status, in board order.
    pub const ALL: [Self; 3] = [Self::Backlog, Self::InProgress, Self::Complete];

    /// Returns the wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::InProgress => "in-progress",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ClientStatus {
    type Err = ClientError;

    /// Parses a status. Matching is exact: no trimming, no case folding.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "backlog" => Ok(Self::Backlog),
            "in-progress" => Ok(Self::InProgress),
            "complete" => Ok(Self::Complete),
            other => Err(ClientError::InvalidStatus(other.to_string())),
        }
    }
}

// =============================================================================
// Priority
// =============================================================================

/// Position of a client inside its status group.
///
/// After re-sequencing every priority is an [`Priority::Ordinal`]. Callers may
/// however write any finite number (the API only checks that the value is
/// numeric), so a fractional value can be stored until the next re-sequencing
/// pass over its group. Both variants serialize as a bare JSON number.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Priority {
    Ordinal(i64),
    Fractional(f64),
}

impl Priority {
    /// Builds a priority from an arbitrary finite number, keeping integral
    /// values as ordinals.
    ///
    /// Returns `None` for `NaN` and infinities.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_number(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let integral = value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64;
        if integral {
            Some(Self::Ordinal(value as i64))
        } else {
            Some(Self::Fractional(value))
        }
    }

    /// Converts a JSON number into a priority.
    #[must_use]
    pub fn from_json_number(number: &serde_json::Number) -> Option<Self> {
        number
            .as_i64()
            .map(Self::Ordinal)
            .or_else(|| number.as_f64().and_then(Self::from_number))
    }

    /// The 1-based priority for the element at `index` of an ordered group.
    #[must_use]
    pub fn at_position(index: usize) -> Self {
        Self::Ordinal(i64::try_from(index).map_or(i64::MAX, |index| index.saturating_add(1)))
    }

    /// Returns the ordinal value, if this priority is integral.
    #[must_use]
    pub const fn as_ordinal(self) -> Option<i64> {
        match self {
            Self::Ordinal(value) => Some(value),
            Self::Fractional(_) => None,
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Ordinal(value) => value as f64,
            Self::Fractional(value) => value,
        }
    }
}

impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Priority {}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Ordinal(left), Self::Ordinal(right)) => left.cmp(right),
            _ => self.as_f64().total_cmp(&other.as_f64()),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ordinal(value) => write!(formatter, "{value}"),
            Self::Fractional(value) => write!(formatter, "{value}"),
        }
    }
}

impl From<i64> for Priority {
    fn from(value: i64) -> Self {
        Self::Ordinal(value)
    }
}

// =============================================================================
// Client
// =============================================================================

/// A client record as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub status: ClientStatus,
    pub priority: Priority,
    /// Columns the service does not interpret (`name`, `description`, ...).
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Client {
    #[must_use]
    pub fn new(id: ClientId, status: ClientStatus, priority: Priority) -> Self {
        Self {
            id,
            status,
            priority,
            attributes: Map::new(),
        }
    }

    /// Adds a pass-through attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("backlog", ClientStatus::Backlog)]
    #[case("in-progress", ClientStatus::InProgress)]
    #[case("complete", ClientStatus::Complete)]
    fn status_parses_known_values(#[case] input: &str, #[case] expected: ClientStatus) {
        assert_eq!(input.parse::<ClientStatus>().unwrap(), expected);
        assert_eq!(expected.as_str(), input);
    }

    #[rstest]
    #[case("Backlog")]
    #[case(" backlog")]
    #[case("in_progress")]
    #[case("done")]
    fn status_rejects_unknown_values(#[case] input: &str) {
        assert_eq!(
            input.parse::<ClientStatus>(),
            Err(ClientError::InvalidStatus(input.to_string()))
        );
    }

    #[rstest]
    fn status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(ClientStatus::InProgress).unwrap(),
            json!("in-progress")
        );
    }

    #[rstest]
    #[case(3.0, Priority::Ordinal(3))]
    #[case(0.0, Priority::Ordinal(0))]
    #[case(-2.0, Priority::Ordinal(-2))]
    #[case(1.5, Priority::Fractional(1.5))]
    fn priority_from_number_keeps_integral_values_ordinal(
        #[case] input: f64,
        #[case] expected: Priority,
    ) {
        let priority = Priority::from_number(input).unwrap();
        assert_eq!(priority, expected);
        assert_eq!(priority.as_ordinal().is_some(), input.fract() == 0.0);
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn priority_from_number_rejects_non_finite(#[case] input: f64) {
        assert!(Priority::from_number(input).is_none());
    }

    #[rstest]
    fn priority_orders_across_variants() {
        let mut priorities = vec![
            Priority::Ordinal(2),
            Priority::Fractional(1.5),
            Priority::Ordinal(-1),
            Priority::Ordinal(1),
        ];
        priorities.sort();
        assert_eq!(
            priorities,
            vec![
                Priority::Ordinal(-1),
                Priority::Ordinal(1),
                Priority::Fractional(1.5),
                Priority::Ordinal(2),
            ]
        );
    }

    #[rstest]
    fn priority_at_position_is_one_based() {
        assert_eq!(Priority::at_position(0), Priority::Ordinal(1));
        assert_eq!(Priority::at_position(9), Priority::Ordinal(10));
    }

    #[rstest]
    fn priority_serializes_as_bare_number() {
        assert_eq!(serde_json::to_value(Priority::Ordinal(4)).unwrap(), json!(4));
        assert_eq!(
            serde_json::to_value(Priority::Fractional(2.5)).unwrap(),
            json!(2.5)
        );
    }

    #[rstest]
    fn client_flattens_attributes() {
        let client = Client::new(ClientId::new(7), ClientStatus::Backlog, Priority::Ordinal(1))
            .with_attribute("name", "Stark, White and Abbott")
            .with_attribute("description", "Cloned Optimal Architecture");

        let value = serde_json::to_value(&client).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 7,
                "status": "backlog",
                "priority": 1,
                "name": "Stark, White and Abbott",
                "description": "Cloned Optimal Architecture",
            })
        );

        let decoded: Client = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, client);
    }
}
