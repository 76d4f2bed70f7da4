//! Response types for the Attendant Care Cost Engine API.
//!
//! This module defines the error response structures and the body returned
//! by the rates endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TierRates;
use crate::error::EngineError;

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

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid query string error response.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::with_details(
            "INVALID_QUERY",
            message,
            "effective_date must be a date in YYYY-MM-DD form",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::InvalidRate { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("INVALID_RATE", "Configured rate is unusable", message),
            },
            EngineError::InvalidSetting { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Server setting error", message),
            },
            EngineError::ScheduleNotInForce { date } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "SCHEDULE_NOT_IN_FORCE",
                    message,
                    format!("No rate file is effective on or before {}", date),
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}

/// The framework rates in force on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatesResponse {
    /// Short identifier of the assessment framework.
    pub schedule: String,
    /// The date the rates were requested for.
    pub requested_date: NaiveDate,
    /// Effective date of the rate file that applies.
    pub effective_date: NaiveDate,
    /// Weekly-to-monthly conversion factor.
    pub weekly_to_monthly: Decimal,
    /// Hourly rate per tier.
    pub hourly: TierRates,
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
    fn test_schedule_not_in_force_is_unprocessable() {
        let date = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
        let response: ApiErrorResponse = EngineError::ScheduleNotInForce { date }.into();

        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.error.code, "SCHEDULE_NOT_IN_FORCE");
        assert_eq!(response.error.message, "No rate schedule in force on 2001-01-01");
    }

    #[test]
    fn test_config_errors_are_server_errors() {
        let response: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "rates".to_string(),
        }
        .into();

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "CONFIG_ERROR");
        assert_eq!(
            response.error.details.as_deref(),
            Some("Configuration file not found: rates")
        );
    }

    #[test]
    fn test_invalid_query_has_details() {
        let error = ApiError::invalid_query("bad date");
        assert_eq!(error.code, "INVALID_QUERY");
        assert!(error.details.is_some());
    }
}
