//! Database repository for user management operations.
//!
//! Provides the sqlx-backed [`UserStore`] implementation used in production.

use crate::database::models::{LoginKey, User};
use crate::errors::StoreError;
use crate::repositories::UserStore;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, phone, username, password_hash, created_at, updated_at";

/// Repository for user database operations.
///
/// Handles all persistence operations for the User entity. Duplicate
/// identities are rejected by the unique indexes on email, phone and
/// username rather than by a check-then-insert sequence, so two racing
/// registrations cannot both succeed.
pub struct UserRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository<'_> {
    async fn find_by_login_key(&self, key: &LoginKey) -> Result<Option<User>> {
        let (column, value) = match key {
            LoginKey::Phone(phone) => ("phone", phone),
            LoginKey::Username(username) => ("username", username),
        };

        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = ?");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(value)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, first_name, last_name, email, phone, username, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(self.pool)
        .await
        .map_err(into_store_error)?;

        Ok(user)
    }
}

fn into_store_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateIdentity,
        _ => StoreError::Backend(err.into()),
    }
}
