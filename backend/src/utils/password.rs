//! Password hashing for credential storage.
//!
//! Wraps bcrypt with the cost factor used across the service. The digest
//! embeds its own salt and cost, so no separate salt storage is needed.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{DEFAULT_COST, hash, verify};

/// Hashes a plaintext password before it is stored.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| ServiceError::internal(format!("Password hashing failed: {}", e)))
}

/// Verifies a plaintext password against a stored digest.
///
/// A malformed digest verifies as `false` rather than erroring, so a corrupt
/// row is indistinguishable from a wrong password to the caller.
pub fn verify_password(password: &str, digest: &str) -> bool {
    verify(password, digest).unwrap_or(false)
}
