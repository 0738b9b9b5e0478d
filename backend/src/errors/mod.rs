//! Global application error types and handlers.
//!
//! This module defines custom error types that are used across the entire
//! backend application and provides mechanisms for consistent error handling
//! and response formatting.

use thiserror::Error;

/// Errors surfaced by the storage layer.
///
/// Identity uniqueness is enforced by the store itself (unique indexes), so
/// a constraint violation on insert arrives here as its own variant rather
/// than as an opaque backend failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Insert collided with an existing identity.
    #[error("duplicate identity")]
    DuplicateIdentity,

    /// Any other storage failure.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Generic service error that can be used across the credential workflow
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{message}")]
    AlreadyExists { message: String },

    #[error("{message}")]
    InvalidCredentials { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists {
            message: message.into(),
        }
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
