//! Data Transfer Objects for API requests and responses.
//!
//! Client records are returned as-is (`domain::Client` already serializes to
//! the wire shape), so only request bodies and fixed responses live here.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::application::UpdateClientCommand;

/// Query string of `GET /api/v1/clients`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListClientsQuery {
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of `PUT /api/v1/clients/{id}`.
///
/// Both fields are kept as raw JSON so the workflow can report exactly which
/// one is invalid. `None` means the field was absent; an explicit `null` is
/// `Some(Value::Null)`. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateClientRequest {
    #[serde(default, deserialize_with = "present_field")]
    pub status: Option<Value>,
    #[serde(default, deserialize_with = "present_field")]
    pub priority: Option<Value>,
}

/// Only runs for fields present in the body, so `null` stays distinguishable
/// from a missing key.
fn present_field<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl UpdateClientRequest {
    /// Builds the workflow command for the client at `raw_id`.
    #[must_use]
    pub fn into_command(self, raw_id: String) -> UpdateClientCommand {
        UpdateClientCommand {
            raw_id,
            status: self.status,
            priority: self.priority,
        }
    }
}

/// Response of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

impl Default for RootResponse {
    fn default() -> Self {
        Self {
            message: "SHIPTIVITY API. Read documentation to see API docs".to_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status ("healthy").
    pub status: String,
    /// Service version.
    pub version: String,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn update_request_keeps_raw_values() {
        let request: UpdateClientRequest =
            serde_json::from_value(json!({"status": "complete", "priority": "2", "name": "x"}))
                .unwrap();
        assert_eq!(request.status, Some(json!("complete")));
        assert_eq!(request.priority, Some(json!("2")));
    }

    #[rstest]
    fn update_request_keeps_explicit_null_apart_from_absent() {
        let request: UpdateClientRequest =
            serde_json::from_value(json!({"priority": null})).unwrap();
        assert_eq!(request.priority, Some(Value::Null));
        assert_eq!(request.status, None);
    }

    #[rstest]
    fn update_request_fields_are_optional() {
        let request: UpdateClientRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request, UpdateClientRequest::default());

        let command = request.into_command("4".to_string());
        assert_eq!(command, UpdateClientCommand::new("4"));
    }
}
