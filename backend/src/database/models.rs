//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Note that these may differ from API-specific models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted user account.
///
/// Exactly one identity shape is populated per row: contact accounts carry
/// first_name/last_name/email/phone and leave username NULL, basic accounts
/// carry only username. `password_hash` is the bcrypt digest; the plaintext
/// password is never stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub username: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity shape a new account is keyed by.
#[derive(Debug, Clone)]
pub enum Identity {
    Contact {
        first_name: String,
        last_name: String,
        email: String,
        phone: String,
    },
    Username { username: String },
}

impl Identity {
    /// Client-facing message when this identity is already taken.
    pub fn conflict_message(&self) -> &'static str {
        match self {
            Identity::Contact { .. } => "Phone or email already exists",
            Identity::Username { .. } => "Username already exists",
        }
    }
}

/// Field a login request resolves its user by.
#[derive(Debug, Clone)]
pub enum LoginKey {
    Phone(String),
    Username(String),
}

impl LoginKey {
    /// Generic rejection message, identical for an unknown identity and a
    /// wrong password so callers cannot probe which accounts exist.
    pub fn rejection_message(&self) -> &'static str {
        match self {
            LoginKey::Phone(_) => "Invalid phone or password",
            LoginKey::Username(_) => "Invalid username or password",
        }
    }
}

/// A new user ready to be materialized into a row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub identity: Identity,
    pub password_hash: String,
}

impl NewUser {
    /// Builds the row that will be persisted, assigning the id and
    /// creation timestamps.
    pub fn into_user(self) -> User {
        let now = Utc::now();
        let (first_name, last_name, email, phone, username) = match self.identity {
            Identity::Contact {
                first_name,
                last_name,
                email,
                phone,
            } => (Some(first_name), Some(last_name), Some(email), Some(phone), None),
            Identity::Username { username } => (None, None, None, None, Some(username)),
        };

        User {
            id: Uuid::now_v7().to_string(),
            first_name,
            last_name,
            email,
            phone,
            username,
            password_hash: self.password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
