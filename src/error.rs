//! Custom error types and handling
//!
//! This module defines the engine's error types and implements
//! conversion to HTTP responses for the Axum framework. Field-level
//! validation failures are data (`ValidationResult`) inside the engine;
//! they only become an `AppError` at the service boundary so the transport
//! layer can tell a 422 apart from a 5xx.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use indexmap::IndexMap;
use serde::Serialize;

use crate::{config::ConfigError, db::StoreError, rules::RuleSetError};

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authorization errors
    #[error("Forbidden: missing capability '{0}'")]
    AuthorizationDenied(String),

    // Validation errors
    #[error("The given data was invalid")]
    ValidationFailed(ValidationDetails),

    #[error("Unknown request: {0}")]
    UnknownRequest(String),

    // Configuration errors
    #[error("Malformed rule set: {0}")]
    MalformedRuleSet(#[from] RuleSetError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // External store errors
    #[error("Validation store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Field-level failures surfaced to the caller.
///
/// `errors` holds the rendered messages, `codes` the machine-readable
/// rule codes for clients that do their own localization. Both keep the
/// rule set's field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationDetails {
    pub errors: IndexMap<String, Vec<String>>,
    pub codes: IndexMap<String, Vec<String>>,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AuthorizationDenied(_) => "FORBIDDEN",
            Self::ValidationFailed(_) => "VALIDATION_ERROR",
            Self::UnknownRequest(_) => "UNKNOWN_REQUEST",
            Self::MalformedRuleSet(_) => "MALFORMED_RULE_SET",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthorizationDenied(_) => StatusCode::FORBIDDEN,
            Self::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UnknownRequest(_) => StatusCode::NOT_FOUND,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::MalformedRuleSet(_) | Self::Configuration(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// True for errors caused by infrastructure rather than by the input.
    ///
    /// Callers use this to decide whether a retry makes sense.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }

    /// Returns the validation details when this is a validation failure
    pub fn validation_details(&self) -> Option<&ValidationDetails> {
        match self {
            Self::ValidationFailed(details) => Some(details),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log infrastructure errors but don't expose details to clients
        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                "An internal error occurred".to_string()
            }
            AppError::StoreUnavailable(e) => {
                tracing::error!("Validation store error: {}", e);
                "The validation store is temporarily unavailable".to_string()
            }
            AppError::MalformedRuleSet(e) => {
                tracing::error!("Malformed rule set: {}", e);
                "An internal error occurred".to_string()
            }
            AppError::Configuration(e) => {
                tracing::error!("Configuration error: {}", e);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        };

        let details = match &self {
            AppError::ValidationFailed(details) => serde_json::to_value(details).ok(),
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.error_code().to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::StoreUnavailable(StoreError::from(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Configuration(format!("invalid request definition: {err}"))
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ValidationDetails {
        let mut details = ValidationDetails::default();
        details
            .errors
            .insert("email".to_string(), vec!["Email harus diisi".to_string()]);
        details
            .codes
            .insert("email".to_string(), vec!["required".to_string()]);
        details
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::ValidationFailed(details()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::AuthorizationDenied("users.create".to_string()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::StoreUnavailable(StoreError::Timeout(2000)).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::UnknownRequest("nope".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_only_store_errors_are_transient() {
        assert!(AppError::StoreUnavailable(StoreError::Timeout(10)).is_transient());
        assert!(!AppError::ValidationFailed(details()).is_transient());
        assert!(!AppError::AuthorizationDenied("x".to_string()).is_transient());
    }

    #[tokio::test]
    async fn test_validation_failure_response_carries_details() {
        let response = AppError::ValidationFailed(details()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["details"]["errors"]["email"][0], "Email harus diisi");
        assert_eq!(body["error"]["details"]["codes"]["email"][0], "required");
    }

    #[tokio::test]
    async fn test_store_error_response_hides_details() {
        let err = AppError::StoreUnavailable(StoreError::Unavailable(
            "connection refused (10.0.0.5:5432)".to_string(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!text.contains("10.0.0.5"));
        assert!(text.contains("STORE_UNAVAILABLE"));
    }
}
