//! JWT token utilities for session issuance.
//!
//! Provides secure token creation and claims management for authenticated
//! users. Verification beyond expiry checking is left to token consumers.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult};

/// JWT claims embedded in an issued session token.
///
/// Carries the user id plus whichever display/identity fields the account's
/// identity shape has. The password hash never enters the claim set.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// JWT token utility for creating and validating session tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl JwtUtils {
    /// Creates a new JwtUtils instance from explicit configuration.
    ///
    /// An empty signing secret is a configuration fault: tokens must never
    /// be signed with an empty key.
    pub fn new(config: &Config) -> ServiceResult<Self> {
        if config.jwt_secret.trim().is_empty() {
            return Err(ServiceError::configuration("JWT_SECRET must not be empty"));
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            expires_in_seconds: config.jwt_expires_in_seconds,
        })
    }

    /// Signs a session token for an authenticated user.
    pub fn issue_token(&self, user: &User) -> ServiceResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in_seconds as i64);

        let claims = Claims {
            sub: user.id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal(format!("Token generation failed: {}", e)))
    }

    /// Validate and decode a session token, enforcing its expiry.
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| ServiceError::invalid_credentials(format!("Token validation failed: {}", e)))
    }

    /// Configured token lifetime in seconds.
    pub fn expires_in_seconds(&self) -> u64 {
        self.expires_in_seconds
    }
}
