//! Response types for the benefits allocation API.
//!
//! This module defines the success payloads, the error response structure
//! and the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{CurrencyNames, describe_amount};
use crate::error::EngineError;
use crate::models::{AllocationResult, Client, ClientId, Employee, EmployeeId, Money};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying the given error body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    format!("Invalid value for '{}': {}", field, message),
                    "The request contains a value the engine cannot accept",
                ),
            },
            EngineError::NotFound { entity, id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", format!("{} not found: {}", entity, id)),
            },
        }
    }
}

/// One client as listed by `GET /clients`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSummary {
    /// The client.
    #[serde(flatten)]
    pub client: Client,
    /// The limit written out in words.
    pub global_limit_in_words: String,
}

impl ClientSummary {
    /// Builds a summary, verbalizing the limit with the given currency.
    pub fn new(client: Client, currency: &CurrencyNames) -> Self {
        let global_limit_in_words = describe_amount(client.global_limit, currency);
        Self {
            client,
            global_limit_in_words,
        }
    }
}

/// The allocation dashboard of one client.
///
/// The embedded [`AllocationResult`] is deterministic; the report id and
/// timestamp identify this particular rendering of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Version of the engine that produced the report.
    pub engine_version: String,
    /// The client the allocation belongs to.
    pub client_id: ClientId,
    /// The client's name.
    pub client_name: String,
    /// The limit written out in words.
    pub global_limit_in_words: String,
    /// The allocated total written out in words.
    pub total_allocated_in_words: String,
    /// The roster, in insertion order, with assigned benefits.
    pub employees: Vec<Employee>,
    /// The allocation itself.
    pub allocation: AllocationResult,
}

impl AllocationReport {
    /// Wraps an allocation for presentation.
    pub fn new(
        client: &Client,
        employees: &[Employee],
        allocation: &AllocationResult,
        currency: &CurrencyNames,
    ) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            client_id: client.id,
            client_name: client.name.clone(),
            global_limit_in_words: describe_amount(allocation.global_limit, currency),
            total_allocated_in_words: describe_amount(allocation.total_allocated, currency),
            employees: employees.to_vec(),
            allocation: allocation.clone(),
        }
    }
}

/// Response body for `POST /clients/:client_id/employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeAdded {
    /// The new employee's identifier.
    pub employee_id: EmployeeId,
    /// The client's dashboard after the addition.
    pub report: AllocationReport,
}

/// Response body for `GET /words`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordsResponse {
    /// The amount in minor units.
    pub amount: Money,
    /// The amount written out with its currency names.
    pub words: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let api_error: ApiErrorResponse = EngineError::not_found("client", "abc").into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "NOT_FOUND");
        assert_eq!(api_error.error.message, "client not found: abc");
    }

    #[test]
    fn test_invalid_input_maps_to_400() {
        let api_error: ApiErrorResponse =
            EngineError::invalid_input("amount", "amount cannot be negative").into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_INPUT");
        assert!(api_error.error.message.contains("amount"));
    }

    #[test]
    fn test_config_errors_map_to_500() {
        let api_error: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "program.yaml".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_client_summary_flattens_client() {
        let client = Client::new("Acme", Money::from_minor_units(500_000)).unwrap();
        let summary = ClientSummary::new(client, &CurrencyNames::default());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["name"], "Acme");
        assert_eq!(json["global_limit"], 500_000);
        assert_eq!(json["global_limit_in_words"], "cinco mil reais");
    }
}
