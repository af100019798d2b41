//! Response types for the Hifz Engine API.
//!
//! This module defines the success bodies that wrap engine results and the
//! error response structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::MasterySummary;
use crate::error::EngineError;
use crate::models::{CoverageReport, RateReport, WeekId};

/// Response body for the `/coverage` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageResponse {
    /// Surah, corpus and collection coverage.
    pub coverage: CoverageReport,
    /// Mastery records per status.
    pub mastery: MasterySummary,
}

/// Response body for the `/rates` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateResponse {
    /// The computed rates.
    #[serde(flatten)]
    pub report: RateReport,
    /// False when the owner's attendance is hidden from the viewer; the
    /// attendance figures are then computed from no rows.
    pub attendance_visible: bool,
}

/// Response body for the `/calendar/week` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekResponse {
    /// The date described.
    pub date: NaiveDate,
    /// Sunday of the local week containing the date.
    pub local_week_start: NaiveDate,
    /// Local week identifier.
    pub local: WeekId,
    /// ISO week identifier.
    pub iso: WeekId,
}

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
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn bad_request(error: ApiError) -> Self {
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
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::ConfigInvalid { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::SurahNotFound { number } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "SURAH_NOT_FOUND",
                    message,
                    format!("Surah numbers run from 1 to 114, got {}", number),
                ))
            }
            EngineError::InvalidVerseRange { .. } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "INVALID_VERSE_RANGE",
                    message,
                    "Verse ranges are inclusive, start at 1 and may not exceed the surah",
                ))
            }
            EngineError::InvalidStatusCode { .. } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "INVALID_STATUS_CODE",
                    message,
                    "Expected one of AM, 50%, 51%, 90%, S, V, X",
                ))
            }
            EngineError::InvalidPeriodKind { .. } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "INVALID_PERIOD_KIND",
                    message,
                    "Expected one of week, month, year",
                ))
            }
            EngineError::InvalidWeekStart { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_WEEK_START", message))
            }
            EngineError::RecordMismatch { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("RECORD_MISMATCH", message))
            }
            EngineError::DateOutOfRange { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("DATE_OUT_OF_RANGE", message))
            }
            EngineError::AccessDenied { .. } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::new("ACCESS_DENIED", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DataKind;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::InvalidStatusCode {
            code: "75%".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_STATUS_CODE");
        assert!(api_error.error.message.contains("75%"));
    }

    #[test]
    fn test_access_denied_maps_to_forbidden() {
        let api_error: ApiErrorResponse = EngineError::AccessDenied {
            viewer_id: "v".to_string(),
            owner_id: "o".to_string(),
            data_kind: DataKind::Progress,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::FORBIDDEN);
        assert_eq!(api_error.error.code, "ACCESS_DENIED");
    }

    #[test]
    fn test_date_out_of_range_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::DateOutOfRange {
            date: chrono::NaiveDate::MIN,
            min_year: 1,
            max_year: 9999,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "DATE_OUT_OF_RANGE");
    }

    #[test]
    fn test_config_errors_map_to_internal_error() {
        let api_error: ApiErrorResponse = EngineError::ConfigInvalid {
            path: "surahs.yaml".to_string(),
            message: "bad".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
