//! Data structures for authentication-related entities.
//!
//! This module defines the request payloads for both identity shapes and the
//! response payloads returned on success. Field rules live here as validator
//! attributes; each request type also declares its field order so failures
//! can report the first invalid field deterministically.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Registration payload for contact-identity accounts.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(
        min = 2,
        max = 50,
        message = "First name must be between 2-50 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 2,
        max = 50,
        message = "Last name must be between 2-50 characters"
    ))]
    pub last_name: String,

    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(length(
        min = 6,
        max = 128,
        message = "Password must be between 6-128 characters"
    ))]
    pub password: String,
}

impl RegisterRequest {
    /// Declaration order used for first-failure reporting.
    pub const FIELD_ORDER: &'static [&'static str] =
        &["first_name", "last_name", "email", "phone", "password"];
}

/// Registration payload for username-identity accounts.
#[derive(Debug, Deserialize, Validate)]
pub struct BasicRegisterRequest {
    #[validate(length(
        min = 3,
        max = 30,
        message = "Username must be between 3-30 characters"
    ))]
    pub username: String,

    #[validate(length(
        min = 6,
        max = 128,
        message = "Password must be between 6-128 characters"
    ))]
    pub password: String,
}

impl BasicRegisterRequest {
    pub const FIELD_ORDER: &'static [&'static str] = &["username", "password"];
}

/// Login payload for contact-identity accounts.
///
/// Login only checks that the fields are present; shape rules apply at
/// registration, and a malformed identity simply fails the lookup.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginRequest {
    pub const FIELD_ORDER: &'static [&'static str] = &["phone", "password"];
}

/// Login payload for username-identity accounts.
#[derive(Debug, Deserialize, Validate)]
pub struct BasicLoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl BasicLoginRequest {
    pub const FIELD_ORDER: &'static [&'static str] = &["username", "password"];
}

/// Login response data carried inside the standard envelope.
#[derive(Debug, Serialize)]
pub struct LoginData {
    pub token: String,
    pub expires_in: u64, // Token expiration in seconds
}

// Custom validation function
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
        let mut error = ValidationError::new("phone");
        error.message = Some("Phone must be exactly 10 digits".into());
        return Err(error);
    }
    Ok(())
}
