//! Validation of caller-supplied identifiers, priorities and statuses.
//!
//! Inputs arrive as raw strings (path segments, query parameters) or raw JSON
//! values (request body fields). Each validator is a pure function returning
//! `Either::Right` with a domain value or `Either::Left` with the
//! `ClientError` the API edge reports.
//!
//! # Validation Rules
//!
//! - Identifiers use a lenient integer parse: leading whitespace and an
//!   optional sign, then the longest run of digits. Trailing text is ignored,
//!   so `"12abc"` is client 12 and `"1.5"` is client 1.
//! - Priorities only need to be numeric. Zero, negative and fractional values
//!   pass; the re-sequencing pass turns them into positions. An explicit
//!   `null` is not numeric and is rejected.
//! - Statuses must match exactly. A blank status (absent, `null`, `""`,
//!   `false` or `0`) means "no change".

use lambars::control::Either;
use lambars::pipe;
use serde_json::Value;

use super::ServiceError;
use crate::domain::{Client, ClientError, ClientId, ClientResult, ClientStatus, Priority};
use crate::infrastructure::ClientRepository;

/// Converts a validation outcome into a `Result` so it can be `?`-propagated
/// inside async workflows.
///
/// # Errors
///
/// Returns the `Left` value as `Err`.
pub fn either_to_result<T>(either: ClientResult<T>) -> Result<T, ClientError> {
    either.into()
}

// =============================================================================
// Identifier
// =============================================================================

/// Parses a raw identifier without touching the store.
///
/// Yields `ClientError::InvalidIdentifier` if no digits follow the optional
/// whitespace and sign, or if the number does not fit in an `i64`.
///
/// # Examples
///
/// ```rust
/// use shiptivity_api::application::parse_client_id;
///
/// assert_eq!(parse_client_id(" 12abc").unwrap_right().value(), 12);
/// assert!(parse_client_id("abc").is_left());
/// ```
pub fn parse_client_id(raw_id: &str) -> ClientResult<ClientId> {
    let (negative, digits) = pipe!(raw_id, trim_leading_whitespace, split_sign);
    let length = digits.bytes().take_while(u8::is_ascii_digit).count();

    match digits[..length].parse::<i64>() {
        Ok(magnitude) if length > 0 => {
            Either::Right(ClientId::new(if negative { -magnitude } else { magnitude }))
        }
        _ => Either::Left(ClientError::InvalidIdentifier(raw_id.to_string())),
    }
}

fn trim_leading_whitespace(raw: &str) -> &str {
    raw.trim_start_matches(|character: char| character.is_ascii_whitespace())
}

fn split_sign(unsigned: &str) -> (bool, &str) {
    match unsigned.as_bytes().first() {
        Some(b'-') => (true, &unsigned[1..]),
        Some(b'+') => (false, &unsigned[1..]),
        _ => (false, unsigned),
    }
}

/// Parses a raw identifier and loads the client it names.
///
/// Performs exactly one point lookup. The loaded record is returned so the
/// caller does not need a second read.
///
/// # Errors
///
/// - `ClientError::InvalidIdentifier` if the identifier is not an integer
/// - `ClientError::IdentifierNotFound` if no client carries it
/// - `ServiceError::Repository` if the lookup fails
pub async fn validate_client_id(
    repository: &dyn ClientRepository,
    raw_id: &str,
) -> Result<Client, ServiceError> {
    let id = either_to_result(parse_client_id(raw_id))?;
    repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ClientError::IdentifierNotFound(id).into())
}

// =============================================================================
// Priority
// =============================================================================

/// Validates the raw `priority` field of an update request.
///
/// Accepts a JSON number, or a string holding a finite number. Every other
/// value, including `null`, `"NaN"` and `"Infinity"`, yields
/// `ClientError::InvalidPriority`.
pub fn validate_priority(raw_priority: &Value) -> ClientResult<Priority> {
    let priority = match raw_priority {
        Value::Number(number) => Priority::from_json_number(number),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Priority::from_number),
        _ => None,
    };
    priority.map_or_else(
        || Either::Left(ClientError::InvalidPriority(raw_priority.to_string())),
        Either::Right,
    )
}

// =============================================================================
// Status
// =============================================================================

/// Parses the optional `status` query filter.
///
/// `None` and the empty string mean "no filter"; any other unknown value
/// yields `ClientError::InvalidStatus`.
pub fn parse_status_filter(raw_status: Option<&str>) -> ClientResult<Option<ClientStatus>> {
    match raw_status {
        None | Some("") => Either::Right(None),
        Some(status) => Either::from(status.parse::<ClientStatus>().map(Some)),
    }
}

/// Parses the raw `status` field of an update request.
///
/// Absent and blank values leave the status unchanged. Unknown strings and
/// other non-blank values yield `ClientError::InvalidStatus`.
pub fn parse_status_change(raw_status: Option<&Value>) -> ClientResult<Option<ClientStatus>> {
    match raw_status {
        None => Either::Right(None),
        Some(value) if is_blank(value) => Either::Right(None),
        Some(Value::String(status)) => parse_status_filter(Some(status.as_str())),
        Some(other) => Either::Left(ClientError::InvalidStatus(other.to_string())),
    }
}

/// `null`, `false`, `0` and `""`.
#[allow(clippy::float_cmp)]
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryClientRepository;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("1", 1)]
    #[case("42", 42)]
    #[case("  7", 7)]
    #[case("\t\n8", 8)]
    #[case("+5", 5)]
    #[case("-3", -3)]
    #[case("12abc", 12)]
    #[case("1.5", 1)]
    #[case("0x10", 0)]
    #[case("007", 7)]
    fn parse_client_id_takes_the_leading_integer(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(parse_client_id(raw), Either::Right(ClientId::new(expected)));
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("-")]
    #[case("+-1")]
    #[case(" x1")]
    #[case("99999999999999999999")]
    fn parse_client_id_rejects_non_integers(#[case] raw: &str) {
        assert_eq!(
            parse_client_id(raw),
            Either::Left(ClientError::InvalidIdentifier(raw.to_string()))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn validate_client_id_distinguishes_malformed_from_missing() {
        let repository = InMemoryClientRepository::with_clients(vec![Client::new(
            ClientId::new(1),
            ClientStatus::Backlog,
            Priority::Ordinal(1),
        )]);

        let found = validate_client_id(&repository, "1").await.unwrap();
        assert_eq!(found.id, ClientId::new(1));

        assert_eq!(
            validate_client_id(&repository, "2").await,
            Err(ServiceError::Client(ClientError::IdentifierNotFound(
                ClientId::new(2)
            )))
        );
        assert!(matches!(
            validate_client_id(&repository, "two").await,
            Err(ServiceError::Client(ClientError::InvalidIdentifier(_)))
        ));
    }

    #[rstest]
    #[case(json!(1), Priority::Ordinal(1))]
    #[case(json!(0), Priority::Ordinal(0))]
    #[case(json!(-4), Priority::Ordinal(-4))]
    #[case(json!(2.5), Priority::Fractional(2.5))]
    #[case(json!("3"), Priority::Ordinal(3))]
    #[case(json!(" 1.25 "), Priority::Fractional(1.25))]
    #[case(json!("1e2"), Priority::Ordinal(100))]
    fn validate_priority_accepts_numbers(#[case] raw: Value, #[case] expected: Priority) {
        assert_eq!(validate_priority(&raw), Either::Right(expected));
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!(true))]
    #[case(json!([1]))]
    #[case(json!({"value": 1}))]
    #[case(json!("high"))]
    #[case(json!(""))]
    #[case(json!("NaN"))]
    #[case(json!("Infinity"))]
    #[case(json!("-inf"))]
    fn validate_priority_rejects_non_numbers(#[case] raw: Value) {
        assert_eq!(
            validate_priority(&raw),
            Either::Left(ClientError::InvalidPriority(raw.to_string()))
        );
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("backlog"), Some(ClientStatus::Backlog))]
    #[case(Some("in-progress"), Some(ClientStatus::InProgress))]
    fn parse_status_filter_accepts_known_or_empty(
        #[case] raw: Option<&str>,
        #[case] expected: Option<ClientStatus>,
    ) {
        assert_eq!(parse_status_filter(raw), Either::Right(expected));
    }

    #[rstest]
    fn parse_status_filter_rejects_unknown() {
        assert_eq!(
            parse_status_filter(Some("bogus-status")),
            Either::Left(ClientError::InvalidStatus("bogus-status".to_string()))
        );
    }

    #[rstest]
    #[case(None, Either::Right(None))]
    #[case(Some(json!(null)), Either::Right(None))]
    #[case(Some(json!("")), Either::Right(None))]
    #[case(Some(json!(false)), Either::Right(None))]
    #[case(Some(json!(0)), Either::Right(None))]
    #[case(Some(json!(0.0)), Either::Right(None))]
    #[case(Some(json!("complete")), Either::Right(Some(ClientStatus::Complete)))]
    #[case(Some(json!("Complete")), Either::Left(ClientError::InvalidStatus("Complete".to_string())))]
    #[case(Some(json!(5)), Either::Left(ClientError::InvalidStatus("5".to_string())))]
    #[case(Some(json!(true)), Either::Left(ClientError::InvalidStatus("true".to_string())))]
    #[case(Some(json!([])), Either::Left(ClientError::InvalidStatus("[]".to_string())))]
    fn parse_status_change_cases(
        #[case] raw: Option<Value>,
        #[case] expected: ClientResult<Option<ClientStatus>>,
    ) {
        assert_eq!(parse_status_change(raw.as_ref()), expected);
    }

    #[rstest]
    fn either_to_result_keeps_both_sides() {
        assert_eq!(either_to_result(parse_client_id("4")), Ok(ClientId::new(4)));
        assert_eq!(
            either_to_result(parse_client_id("four")),
            Err(ClientError::InvalidIdentifier("four".to_string()))
        );
    }
}
