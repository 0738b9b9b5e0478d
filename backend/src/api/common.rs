//! Error handling utilities for API responses.
//!
//! Provides structured responses and conversion between service-layer errors
//! and HTTP responses. Includes:
//! - Standard response envelope
//! - ServiceError to HTTP status code mapping
//! - Validation error formatting helpers
//!
//! # Response Format
//! All responses share a consistent JSON envelope containing:
//! - `success`: whether the request succeeded
//! - `data`: payload (present on success, when there is one)
//! - `message`: human-readable message
//! - `error`: machine-readable error category (present on failure)
//!
//! # Error Handling Flow
//! 1. Service layer returns a domain-specific `ServiceError`
//! 2. `service_error_to_http` converts it to an HTTP response
//! 3. Server-side faults are logged in full and returned sanitized; the raw
//!    error never reaches the client

use crate::errors::ServiceError;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    /// Request timestamp
    pub timestamp: String,
}

/// Error details for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Machine-readable error type identifier
    pub error_type: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a successful response that carries no data
    pub fn message_only(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: true,
            data: None,
            message: message.into(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>, error_type: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: message.into(),
            error: Some(ErrorDetails {
                error_type: error_type.into(),
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Converts ServiceError to appropriate HTTP response with standard format
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, String) {
    let (status, error_type, message) = match error {
        ServiceError::Validation { message } => {
            (StatusCode::BAD_REQUEST, "validation_error", message)
        }
        ServiceError::AlreadyExists { message } => {
            (StatusCode::BAD_REQUEST, "already_exists", message)
        }
        ServiceError::InvalidCredentials { message } => {
            (StatusCode::BAD_REQUEST, "invalid_credentials", message)
        }
        ServiceError::Configuration { message } => {
            tracing::error!("Configuration error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "configuration_error",
                "Internal server error".to_string(),
            )
        }
        ServiceError::Database { source } => {
            tracing::error!("Database error: {}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                "Internal server error".to_string(),
            )
        }
        ServiceError::Internal { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
            )
        }
    };

    let error_response = ApiResponse::<()>::error(message, error_type);
    (status, serde_json::to_string(&error_response).unwrap())
}

/// Returns the message of the first failed rule, following the declared
/// field order of the request type.
///
/// `validator` collects failures into a map, so without this the reported
/// field would depend on hash ordering.
pub fn first_validation_message(errors: &ValidationErrors, field_order: &[&str]) -> String {
    let field_errors = errors.field_errors();

    for field in field_order {
        if let Some(failures) = field_errors.get(*field) {
            if let Some(failure) = failures.first() {
                return failure
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("{field}: invalid value"));
            }
        }
    }

    "Invalid request".to_string()
}
